use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spa_nav::prelude::*;
use wasm_bindgen::JsValue;

mod dom_host;

use dom_host::DomHost;

type SharedNavigator = Rc<RefCell<Navigator<DomHost>>>;

thread_local! {
    // Keeps the navigator alive for the page's lifetime.
    static APP: RefCell<Option<SharedNavigator>> = const { RefCell::new(None) };
}

/// Boot the navigator against `window`/`document.body`. Only the first call does anything.
pub fn start() {
    if APP.with(|app| app.borrow().is_some()) {
        console_warn("navigator already started");
        return;
    }
    match boot() {
        Ok(nav) => APP.with(|app| *app.borrow_mut() = Some(nav)),
        Err(e) => console_error(&format!("navigator failed to start: {e}")),
    }
}

fn boot() -> Result<SharedNavigator, NavError> {
    let build = BuildInfo::current()?;
    let dispatcher = Rc::new(Dispatcher::default());
    let host = DomHost::new(Rc::clone(&dispatcher))?;
    let routes = RouteTable::from_config(&build.config);

    let nav = Rc::new(RefCell::new(Navigator::new(host, routes)));
    dispatcher.bind(&nav);
    nav.borrow_mut().start()?;
    Ok(nav)
}

/// Routes DOM callbacks back into the navigator.
///
/// Delivery is deferred to a microtask so the navigator never releases the
/// listener whose callback is still on the stack.
#[derive(Default)]
pub(crate) struct Dispatcher {
    navigator: RefCell<Weak<RefCell<Navigator<DomHost>>>>,
}

impl Dispatcher {
    fn bind(&self, nav: &SharedNavigator) {
        *self.navigator.borrow_mut() = Rc::downgrade(nav);
    }

    pub(crate) fn schedule(self: &Rc<Self>, event: HostEvent) {
        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            this.deliver(event);
        });
    }

    fn deliver(&self, event: HostEvent) {
        let Some(nav) = self.navigator.borrow().upgrade() else {
            return;
        };
        let result = match nav.try_borrow_mut() {
            Ok(mut nav) => nav.dispatch(event),
            Err(_) => {
                console_warn("navigator busy; event dropped");
                return;
            }
        };
        if let Err(e) = result {
            console_error(&format!("navigation failed: {e}"));
        }
    }
}

fn console_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}
