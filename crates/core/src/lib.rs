//! # spa_nav
//!
//! History-routed view navigation for single-page apps.
//!
//! A [`Navigator`](navigator::Navigator) owns a route table, reads and pushes
//! history through a [`Host`](host::Host), and mounts exactly one
//! [`View`](view::View) at a time into the host's mount point. Views wire
//! their own click triggers through the [`MountContext`](view::MountContext)
//! they are handed, and every trigger is released before the next view mounts.
//!
//! ## Quick Start
//!
//! ```
//! use spa_nav::prelude::*;
//!
//! let mut nav = Navigator::new(MemoryHost::new("/"), RouteTable::builtin());
//! nav.start()?;
//! assert_eq!(nav.host().title(), "home");
//!
//! // Clicking the home view's trigger navigates to /nav.
//! let clicks = nav.host().click("gotonav");
//! for event in clicks {
//!     nav.dispatch(event)?;
//! }
//! assert_eq!(nav.host().current_path(), "/nav");
//!
//! // Back re-enters through the history listener.
//! let pops = nav.host_mut().back();
//! for event in pops {
//!     nav.dispatch(event)?;
//! }
//! assert_eq!(nav.host().title(), "home");
//! # Ok::<(), spa_nav::error::NavError>(())
//! ```
//!
//! ## Modules
//!
//! - [`navigator`]: resolution, history and the mount/unmount lifecycle
//! - [`view`]: the view contract and the built-in views
//! - [`route`]: the closed set of views and the route table
//! - [`host`]: the environment seam
//! - [`memory`]: an in-memory host
//! - [`config`]: build-time runtime configuration

#[path = "core/config.rs"]
pub mod config;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/host.rs"]
pub mod host;

#[path = "core/memory.rs"]
pub mod memory;

#[path = "core/navigator.rs"]
pub mod navigator;

#[path = "core/route.rs"]
pub mod route;

#[path = "core/view.rs"]
pub mod view;

/// Prelude module for convenient imports.
///
/// ```
/// use spa_nav::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{BuildInfo, RuntimeConfig};
    pub use crate::error::NavError;
    pub use crate::host::{Host, HostEvent, ListenerId};
    pub use crate::memory::MemoryHost;
    pub use crate::navigator::{NavState, Navigator};
    pub use crate::route::{RouteTable, ViewKind, DEFAULT_PATH, ROOT_PATH};
    pub use crate::view::{Binding, MountContext, View};
}
