//! The navigator: single owner of "which view is mounted, and for which path".
//!
//! State is either [`NavState::Idle`] (before [`Navigator::start`]) or
//! [`NavState::Mounted`]. Every transition goes through [`Navigator::mount`],
//! which unmounts the previous view before the replacement renders, so no
//! listener outlives the view that registered it.

use tracing::{debug, info, warn};

use crate::error::NavError;
use crate::host::{Host, HostEvent, ListenerId};
use crate::route::{RouteTable, ViewKind};
use crate::view::{Binding, MountContext, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState<'a> {
    Idle,
    /// Tagged with the canonical path of the mounted view (`/` reads as `/home`).
    Mounted(&'a str),
}

struct Mounted {
    kind: ViewKind,
    view: Box<dyn View>,
    bindings: Vec<Binding>,
}

pub struct Navigator<H: Host> {
    host: H,
    routes: RouteTable,
    current: Option<Mounted>,
    history_listener: Option<ListenerId>,
    mounts: u64,
}

impl<H: Host> Navigator<H> {
    pub fn new(host: H, routes: RouteTable) -> Self {
        Self {
            host,
            routes,
            current: None,
            history_listener: None,
            mounts: 0,
        }
    }

    /// Subscribe to back/forward and mount the view for the current location.
    ///
    /// Only the first call has any effect; later calls neither re-register
    /// the history listener nor re-mount.
    pub fn start(&mut self) -> Result<(), NavError> {
        if self.history_listener.is_some() {
            warn!("navigator already started; ignoring repeated start");
            return Ok(());
        }
        let path = self.host.current_path();
        let kind = self.resolve(&path)?;
        self.mount(kind)?;
        let listener = self.host.listen_history()?;
        self.history_listener = Some(listener);
        debug!(?listener, "history listener registered");
        Ok(())
    }

    /// Mount the view for `path` and push `path` onto the history stack.
    ///
    /// An unknown path fails before anything is pushed or rendered. The
    /// entry is pushed only once the view has mounted, so a failed mount
    /// leaves history untouched.
    pub fn go(&mut self, path: &str) -> Result<(), NavError> {
        let kind = self.resolve(path)?;
        self.mount(kind)?;
        self.host.push_path(path)
    }

    /// Resolve `path` and mount its view without touching history.
    pub fn load(&mut self, path: &str) -> Result<(), NavError> {
        let kind = self.resolve(path)?;
        self.mount(kind)
    }

    /// Feed a host notification back in.
    ///
    /// Clicks are matched against the mounted view's bindings; clicks on
    /// unbound elements are ignored. A history pop re-loads whatever the
    /// location now says.
    pub fn dispatch(&mut self, event: HostEvent) -> Result<(), NavError> {
        match event {
            HostEvent::Click { element_id } => {
                let target = self.current.as_ref().and_then(|m| {
                    m.bindings
                        .iter()
                        .find(|b| b.element_id == element_id)
                        .map(|b| b.target.clone())
                });
                match target {
                    Some(target) => self.go(&target),
                    None => {
                        debug!(%element_id, "click on unbound element");
                        Ok(())
                    }
                }
            }
            HostEvent::HistoryPop => {
                let path = self.host.current_path();
                self.load(&path)
            }
        }
    }

    fn resolve(&self, path: &str) -> Result<ViewKind, NavError> {
        self.routes.resolve(path).inspect_err(|_| {
            warn!(%path, "no route for path");
        })
    }

    /// Replace the mounted view with a fresh `kind`.
    ///
    /// If the replacement fails to mount, the previous view is mounted again
    /// so a started navigator always holds a view.
    fn mount(&mut self, kind: ViewKind) -> Result<(), NavError> {
        let prev_kind = self.current.take().map(|mut prev| {
            let mut ctx = MountContext::new(&mut self.host, &mut prev.bindings);
            prev.view.unmount(&mut ctx);
            ctx.release_all();
            debug!(path = prev.kind.path(), "view unmounted");
            prev.kind
        });

        match self.mount_fresh(kind) {
            Ok(mounted) => {
                self.current = Some(mounted);
                Ok(())
            }
            Err(e) => {
                warn!(path = kind.path(), error = %e, "mount failed");
                if let Some(prev_kind) = prev_kind {
                    match self.mount_fresh(prev_kind) {
                        Ok(mounted) => self.current = Some(mounted),
                        Err(restore) => {
                            warn!(path = prev_kind.path(), error = %restore, "restore failed")
                        }
                    }
                }
                Err(e)
            }
        }
    }

    /// Create and mount `kind`; listeners are released again if mounting fails.
    fn mount_fresh(&mut self, kind: ViewKind) -> Result<Mounted, NavError> {
        let mut view = kind.create();
        let mut bindings = Vec::new();
        let mut ctx = MountContext::new(&mut self.host, &mut bindings);
        if let Err(e) = view.mount(&mut ctx) {
            ctx.release_all();
            return Err(e);
        }

        self.mounts += 1;
        info!(path = kind.path(), title = view.title(), "view mounted");
        Ok(Mounted {
            kind,
            view,
            bindings,
        })
    }

    pub fn state(&self) -> NavState<'_> {
        match &self.current {
            None => NavState::Idle,
            Some(m) => NavState::Mounted(m.kind.path()),
        }
    }

    pub fn current_view(&self) -> Option<ViewKind> {
        self.current.as_ref().map(|m| m.kind)
    }

    /// Triggers wired by the mounted view.
    pub fn bindings(&self) -> &[Binding] {
        match &self.current {
            Some(m) => &m.bindings,
            None => &[],
        }
    }

    pub fn is_started(&self) -> bool {
        self.history_listener.is_some()
    }

    /// Number of successful mounts since construction.
    pub fn mount_count(&self) -> u64 {
        self.mounts
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;

    fn navigator(at: &str) -> Navigator<MemoryHost> {
        Navigator::new(MemoryHost::new(at), RouteTable::builtin())
    }

    #[test]
    fn idle_until_started() {
        let mut nav = navigator("/nav");
        assert_eq!(nav.state(), NavState::Idle);
        assert!(!nav.is_started());

        nav.start().unwrap();
        assert_eq!(nav.state(), NavState::Mounted("/nav"));
        assert_eq!(nav.current_view(), Some(ViewKind::Nav));
        assert_eq!(nav.host().title(), "nav");
    }

    #[test]
    fn every_route_mounts_one_view_with_its_title() {
        let mut nav = navigator("/");
        nav.start().unwrap();
        let paths: Vec<&str> = nav.routes().paths().collect();
        for p in paths {
            nav.load(p).unwrap();
            assert_eq!(nav.state(), NavState::Mounted(p));
            assert_eq!(nav.bindings().len(), 1);
            assert_eq!(nav.host().live_click_listeners(), 1);
            let kind = nav.current_view().unwrap();
            assert_eq!(nav.host().title(), kind.title());
        }
    }

    #[test]
    fn root_and_default_path_mount_the_same_view() {
        let mut a = navigator("/");
        let mut b = navigator("/home");
        a.start().unwrap();
        b.start().unwrap();
        assert_eq!(a.state(), b.state());
        assert_eq!(a.host().title(), b.host().title());
        assert_eq!(a.host().content(), b.host().content());
    }

    #[test]
    fn repeated_start_registers_one_listener() {
        let mut nav = navigator("/");
        nav.start().unwrap();
        nav.start().unwrap();
        assert_eq!(nav.host().live_history_listeners(), 1);
        assert_eq!(nav.mount_count(), 1);
    }

    #[test]
    fn start_on_unknown_location_stays_idle() {
        let mut nav = navigator("/missing");
        assert!(nav.start().unwrap_err().is_unknown_path());
        assert_eq!(nav.state(), NavState::Idle);
        assert!(!nav.is_started());
        assert_eq!(nav.host().live_history_listeners(), 0);
    }

    #[test]
    fn unknown_go_changes_nothing() {
        let mut nav = navigator("/");
        nav.start().unwrap();
        let before = nav.host().content();

        let err = nav.go("/unknown").unwrap_err();
        assert!(matches!(err, NavError::UnknownPath(ref p) if p == "/unknown"));
        assert_eq!(nav.host().content(), before);
        assert_eq!(nav.host().current_path(), "/");
        assert_eq!(nav.host().history_len(), 1);
        assert_eq!(nav.state(), NavState::Mounted("/home"));
        assert_eq!(nav.host().live_click_listeners(), 1);
    }

    #[test]
    fn go_twice_pushes_twice_and_keeps_one_view() {
        let mut nav = navigator("/");
        nav.start().unwrap();
        nav.go("/nav").unwrap();
        assert_eq!(nav.host().current_path(), "/nav");
        let after_one = (nav.host().title(), nav.host().content());

        nav.go("/nav").unwrap();
        assert_eq!(nav.host().entries(), ["/", "/nav", "/nav"]);
        assert_eq!((nav.host().title(), nav.host().content()), after_one);
        assert_eq!(nav.host().live_click_listeners(), 1);
        assert_eq!(nav.mount_count(), 3);
    }

    #[test]
    fn transitions_release_previous_listeners() {
        let mut nav = navigator("/");
        nav.start().unwrap();
        for _ in 0..10 {
            nav.go("/nav").unwrap();
            nav.go("/home").unwrap();
        }
        assert_eq!(nav.host().live_click_listeners(), 1);
        assert_eq!(nav.host().live_history_listeners(), 1);
    }

    #[test]
    fn unbound_clicks_are_ignored() {
        let mut nav = navigator("/");
        nav.start().unwrap();
        nav.dispatch(HostEvent::click("gotohome")).unwrap();
        assert_eq!(nav.state(), NavState::Mounted("/home"));
        assert_eq!(nav.host().history_len(), 1);
    }

    #[test]
    fn clicks_before_start_are_ignored() {
        let mut nav = navigator("/");
        nav.dispatch(HostEvent::click("gotonav")).unwrap();
        assert_eq!(nav.state(), NavState::Idle);
    }

    struct Broken;

    impl View for Broken {
        fn title(&self) -> &'static str {
            "broken"
        }

        fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<(), NavError> {
            ctx.render(r#"<a id="ok"></a>"#)?;
            ctx.link("ok", "/home")?;
            ctx.link("absent", "/nav")
        }
    }

    #[test]
    fn failed_mount_releases_partial_bindings() {
        let mut host = MemoryHost::new("/");
        let mut bindings = Vec::new();
        let mut ctx = MountContext::new(&mut host, &mut bindings);
        let err = Broken.mount(&mut ctx).unwrap_err();
        assert!(matches!(err, NavError::MissingElement(_)));
        assert_eq!(ctx.bindings().len(), 1);
        ctx.release_all();
        assert_eq!(host.live_click_listeners(), 0);
    }

    /// Memory host that refuses click listeners on one element.
    struct Refusing {
        inner: MemoryHost,
        element_id: &'static str,
    }

    impl Host for Refusing {
        fn current_path(&self) -> String {
            self.inner.current_path()
        }

        fn push_path(&mut self, path: &str) -> Result<(), NavError> {
            self.inner.push_path(path)
        }

        fn title(&self) -> String {
            self.inner.title()
        }

        fn set_title(&mut self, title: &str) {
            self.inner.set_title(title)
        }

        fn content(&self) -> String {
            self.inner.content()
        }

        fn replace_content(&mut self, markup: &str) -> Result<(), NavError> {
            self.inner.replace_content(markup)
        }

        fn has_element(&self, element_id: &str) -> bool {
            self.inner.has_element(element_id)
        }

        fn listen_click(&mut self, element_id: &str) -> Result<ListenerId, NavError> {
            if element_id == self.element_id {
                return Err(NavError::host("refused"));
            }
            self.inner.listen_click(element_id)
        }

        fn listen_history(&mut self) -> Result<ListenerId, NavError> {
            self.inner.listen_history()
        }

        fn release(&mut self, id: ListenerId) {
            self.inner.release(id)
        }
    }

    fn refusing(at: &str, element_id: &'static str) -> Navigator<Refusing> {
        let host = Refusing {
            inner: MemoryHost::new(at),
            element_id,
        };
        Navigator::new(host, RouteTable::builtin())
    }

    #[test]
    fn failed_go_restores_previous_view() {
        let mut nav = refusing("/nav", "gotonav");
        nav.start().unwrap();
        let content = nav.host().content();

        let err = nav.go("/home").unwrap_err();
        assert!(matches!(err, NavError::Host(_)));

        assert_eq!(nav.state(), NavState::Mounted("/nav"));
        assert!(nav.is_started());
        assert_eq!(nav.host().inner.entries(), ["/nav"]);
        assert_eq!(nav.host().title(), "nav");
        assert_eq!(nav.host().content(), content);
        assert_eq!(nav.host().inner.live_click_listeners(), 1);
        assert_eq!(nav.bindings()[0].element_id, "gotohome");

        // The restored trigger still works.
        let events = nav.host().inner.click("gotohome");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn failed_click_navigation_keeps_page_usable() {
        let mut nav = refusing("/nav", "gotonav");
        nav.start().unwrap();
        let events = nav.host().inner.click("gotohome");
        assert!(nav.dispatch(events[0].clone()).is_err());

        assert_eq!(nav.state(), NavState::Mounted("/nav"));
        assert_eq!(nav.host().inner.history_len(), 1);
        assert_eq!(nav.host().inner.live_click_listeners(), 1);
    }

    #[test]
    fn failed_start_registers_nothing() {
        let mut nav = refusing("/", "gotonav");
        let err = nav.start().unwrap_err();
        assert!(matches!(err, NavError::Host(_)));

        assert_eq!(nav.state(), NavState::Idle);
        assert!(!nav.is_started());
        assert_eq!(nav.host().inner.live_history_listeners(), 0);
        assert_eq!(nav.host().inner.live_click_listeners(), 0);
    }
}
