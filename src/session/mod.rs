//! Session state and its observable lifecycle.
//!
//! This module owns the representation of the authenticated principal and the
//! machinery that keeps the rest of the tree current as the authentication
//! collaborator pushes state changes.
//!
//! # Architecture
//!
//! - [`Session`]: the current principal, or its absence
//! - [`SessionProvider`]: observable value holder with subscription guards
//! - [`AuthBackend`]: contract the external authentication collaborator
//!   implements; [`MemoryAuthBackend`] and [`WatchAuthBackend`] are the
//!   bundled adapters
//!
//! # Example
//!
//! ```rust
//! use portal_shell::session::{MemoryAuthBackend, Session, SessionProvider};
//!
//! let backend = MemoryAuthBackend::new();
//! let provider = SessionProvider::new();
//! provider.attach(&backend);
//!
//! backend.sign_in("user42");
//! assert!(provider.current().is_present());
//!
//! provider.detach();
//! backend.sign_out();
//! // The last pre-detach value sticks.
//! assert!(provider.current().is_present());
//! ```

mod backend;
mod provider;

pub use backend::{
    AuthBackend, AuthListener, AuthSubscription, MemoryAuthBackend, WatchAuthBackend,
};
pub use provider::{AuthUser, Session, SessionProvider, SessionSubscription};
