//! Views and the context they mount through.

use crate::error::NavError;
use crate::host::{Host, ListenerId};
use crate::route::ViewKind;

const HOME_TEMPLATE: &str = include_str!("../../templates/home.html");
const NAV_TEMPLATE: &str = include_str!("../../templates/nav.html");

/// A click trigger owned by the mounted view: clicking `element_id` navigates to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub listener: ListenerId,
    pub element_id: String,
    pub target: String,
}

/// Everything a view may touch while it is mounted.
///
/// Listeners are acquired through [`MountContext::link`] and recorded here;
/// the navigator releases whatever is left after [`View::unmount`] returns.
pub struct MountContext<'a> {
    host: &'a mut dyn Host,
    bindings: &'a mut Vec<Binding>,
}

impl<'a> MountContext<'a> {
    pub(crate) fn new(host: &'a mut dyn Host, bindings: &'a mut Vec<Binding>) -> Self {
        Self { host, bindings }
    }

    pub fn set_title(&mut self, title: &str) {
        self.host.set_title(title);
    }

    /// Replace the mount point's content.
    pub fn render(&mut self, markup: &str) -> Result<(), NavError> {
        self.host.replace_content(markup)
    }

    /// Navigate to `target` whenever `#element_id` is clicked.
    pub fn link(&mut self, element_id: &str, target: &str) -> Result<(), NavError> {
        let listener = self.host.listen_click(element_id)?;
        self.bindings.push(Binding {
            listener,
            element_id: element_id.to_string(),
            target: target.to_string(),
        });
        Ok(())
    }

    pub fn bindings(&self) -> &[Binding] {
        self.bindings
    }

    /// Drop every listener acquired through this context.
    pub fn release_all(&mut self) {
        for b in self.bindings.drain(..) {
            self.host.release(b.listener);
        }
    }
}

pub trait View {
    fn title(&self) -> &'static str;

    /// Set the title, render markup, wire triggers.
    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<(), NavError>;

    fn unmount(&mut self, ctx: &mut MountContext<'_>) {
        ctx.release_all();
    }
}

#[derive(Debug, Default)]
pub struct HomeView;

impl View for HomeView {
    fn title(&self) -> &'static str {
        ViewKind::Home.title()
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<(), NavError> {
        ctx.set_title(self.title());
        ctx.render(HOME_TEMPLATE)?;
        ctx.link("gotonav", ViewKind::Nav.path())
    }
}

#[derive(Debug, Default)]
pub struct NavView;

impl View for NavView {
    fn title(&self) -> &'static str {
        ViewKind::Nav.title()
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<(), NavError> {
        ctx.set_title(self.title());
        ctx.render(NAV_TEMPLATE)?;
        ctx.link("gotohome", ViewKind::Home.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;

    #[test]
    fn home_mount_renders_and_links_to_nav() {
        let mut host = MemoryHost::new("/");
        let mut bindings = Vec::new();
        let mut ctx = MountContext::new(&mut host, &mut bindings);
        HomeView.mount(&mut ctx).unwrap();

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].element_id, "gotonav");
        assert_eq!(bindings[0].target, "/nav");
        assert_eq!(host.title(), "home");
        assert!(host.has_element("gotonav"));
        assert_eq!(host.live_click_listeners(), 1);
    }

    #[test]
    fn unmount_releases_listeners() {
        let mut host = MemoryHost::new("/nav");
        let mut bindings = Vec::new();
        let mut view = NavView;
        {
            let mut ctx = MountContext::new(&mut host, &mut bindings);
            view.mount(&mut ctx).unwrap();
            assert_eq!(ctx.bindings()[0].target, "/home");
            view.unmount(&mut ctx);
        }
        assert!(bindings.is_empty());
        assert_eq!(host.live_click_listeners(), 0);
    }

    #[test]
    fn link_to_absent_element_fails() {
        let mut host = MemoryHost::new("/");
        let mut bindings = Vec::new();
        let mut ctx = MountContext::new(&mut host, &mut bindings);
        ctx.render("<p>empty</p>").unwrap();
        let err = ctx.link("gotonav", "/nav").unwrap_err();
        assert!(matches!(err, NavError::MissingElement(ref id) if id == "gotonav"));
        assert!(ctx.bindings().is_empty());
    }
}
