use std::collections::HashMap;
use std::rc::Rc;

use spa_nav::error::NavError;
use spa_nav::host::{Host, HostEvent, ListenerId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlElement, Window};

use super::{console_warn, Dispatcher};
use crate::location::route_key;

struct Registration {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

/// [`Host`] over the real browser: `history`, `location`, `document.title`
/// and `document.body` as the mount point.
pub(crate) struct DomHost {
    window: Window,
    document: Document,
    body: HtmlElement,
    dispatcher: Rc<Dispatcher>,
    listeners: HashMap<ListenerId, Registration>,
    next_listener: u32,
}

fn js_err(context: &str, e: JsValue) -> NavError {
    NavError::host(format!("{context}: {e:?}"))
}

impl DomHost {
    pub(crate) fn new(dispatcher: Rc<Dispatcher>) -> Result<Self, NavError> {
        let window = web_sys::window().ok_or_else(|| NavError::host("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| NavError::host("no document"))?;
        let body = document.body().ok_or_else(|| NavError::host("no body"))?;
        Ok(Self {
            window,
            document,
            body,
            dispatcher,
            listeners: HashMap::new(),
            next_listener: 0,
        })
    }

    fn subscribe(
        &mut self,
        target: EventTarget,
        event: &'static str,
        emit: HostEvent,
    ) -> Result<ListenerId, NavError> {
        let dispatcher = Rc::clone(&self.dispatcher);
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            dispatcher.schedule(emit.clone());
        });
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| js_err("addEventListener", e))?;

        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.listeners.insert(
            id,
            Registration {
                target,
                event,
                callback,
            },
        );
        Ok(id)
    }
}

impl Host for DomHost {
    fn current_path(&self) -> String {
        match self.window.location().pathname() {
            Ok(p) => route_key(&p).to_string(),
            Err(_) => "/".to_string(),
        }
    }

    fn push_path(&mut self, path: &str) -> Result<(), NavError> {
        let history = self
            .window
            .history()
            .map_err(|e| js_err("history", e))?;
        history
            .push_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(|e| js_err("pushState", e))
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn content(&self) -> String {
        self.body.inner_html()
    }

    fn replace_content(&mut self, markup: &str) -> Result<(), NavError> {
        self.body.set_inner_html(markup);
        Ok(())
    }

    fn has_element(&self, element_id: &str) -> bool {
        self.document.get_element_by_id(element_id).is_some()
    }

    fn listen_click(&mut self, element_id: &str) -> Result<ListenerId, NavError> {
        let el = self
            .document
            .get_element_by_id(element_id)
            .ok_or_else(|| NavError::MissingElement(element_id.to_string()))?;
        self.subscribe(el.into(), "click", HostEvent::click(element_id))
    }

    fn listen_history(&mut self) -> Result<ListenerId, NavError> {
        let target: EventTarget = self.window.clone().into();
        self.subscribe(target, "popstate", HostEvent::HistoryPop)
    }

    fn release(&mut self, id: ListenerId) {
        if let Some(reg) = self.listeners.remove(&id) {
            if let Err(e) = reg
                .target
                .remove_event_listener_with_callback(reg.event, reg.callback.as_ref().unchecked_ref())
            {
                console_warn(&format!("removeEventListener({}) failed: {e:?}", reg.event));
            }
        }
    }
}
