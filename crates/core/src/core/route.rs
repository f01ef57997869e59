//! Path resolution.
//!
//! The set of views is closed ([`ViewKind`]); a [`RouteTable`] decides which of
//! them are reachable and maps path strings onto them.

use hashbrown::HashMap;

use crate::config::RuntimeConfig;
use crate::error::NavError;
use crate::view::{HomeView, NavView, View};

/// Location that is rewritten to [`DEFAULT_PATH`] before lookup.
pub const ROOT_PATH: &str = "/";
pub const DEFAULT_PATH: &str = "/home";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Home,
    Nav,
}

impl ViewKind {
    /// Canonical path the view is routed under.
    pub fn path(self) -> &'static str {
        match self {
            ViewKind::Home => DEFAULT_PATH,
            ViewKind::Nav => "/nav",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Home => "home",
            ViewKind::Nav => "nav",
        }
    }

    /// Name of the experimental-feature flag gating this view.
    pub fn feature(self) -> &'static str {
        match self {
            ViewKind::Home => "home",
            ViewKind::Nav => "nav",
        }
    }

    /// Fresh instance; the navigator never reuses one across navigations.
    pub fn create(self) -> Box<dyn View> {
        match self {
            ViewKind::Home => Box::new(HomeView),
            ViewKind::Nav => Box::new(NavView),
        }
    }

    pub fn all() -> &'static [ViewKind] {
        &[ViewKind::Home, ViewKind::Nav]
    }
}

/// `/` becomes [`DEFAULT_PATH`]; every other path is used as-is.
pub fn canonical_path(path: &str) -> &str {
    if path == ROOT_PATH {
        DEFAULT_PATH
    } else {
        path
    }
}

/// Immutable once built.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<&'static str, ViewKind>,
}

impl RouteTable {
    /// Every built-in view.
    pub fn builtin() -> Self {
        Self::with_views(ViewKind::all().iter().copied())
    }

    /// Built-in views whose feature flag is not switched off.
    pub fn from_config(cfg: &RuntimeConfig) -> Self {
        Self::with_views(
            ViewKind::all()
                .iter()
                .copied()
                .filter(|k| cfg.feature_enabled(k.feature())),
        )
    }

    fn with_views(views: impl IntoIterator<Item = ViewKind>) -> Self {
        let routes = views.into_iter().map(|k| (k.path(), k)).collect();
        Self { routes }
    }

    pub fn resolve(&self, path: &str) -> Result<ViewKind, NavError> {
        self.routes
            .get(canonical_path(path))
            .copied()
            .ok_or_else(|| NavError::UnknownPath(path.to_string()))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(canonical_path(path))
    }

    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
