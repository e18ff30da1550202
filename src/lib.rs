//! Session-aware client application shell.
//!
//! The root composition layer of a client application: a navigation bar, a
//! set of page views, and a session-gating wrapper around a path-based view
//! router. Session state is injected into the whole tree before routing
//! occurs; routing itself is a pure function from the current path and the
//! declared binding table to the set of views that render.
//!
//! # Architecture
//!
//! - **SessionProvider**: observable holder for the authenticated principal,
//!   fed by an external [`AuthBackend`](session::AuthBackend) collaborator
//! - **Router**: ordered path table resolved on every navigation event; an
//!   overlay router — every matching binding renders, in declared order
//! - **AppShell**: composes provider, history, navigation bar and table, and
//!   re-renders on session changes and navigation events
//!
//! # Modules
//!
//! - [`session`]: session value, provider, auth backend adapters
//! - [`history`]: navigation history collaborator
//! - [`router`]: route bindings and the pure resolution table
//! - [`ui`]: the view contract, pages, navigation bar, and the shell
//! - [`routes`]: the declared path constants
//! - [`config`]: layered application configuration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod history;
pub mod router;
pub mod routes;
pub mod session;
pub mod ui;

pub use error::{RouteError, ShellError};
