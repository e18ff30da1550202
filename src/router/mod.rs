//! Path-to-view resolution.
//!
//! The router is the pure half of navigation: an ordered table of
//! path-pattern bindings and a [`resolve`](RouteTable::resolve) function from
//! the current path to the set of views that should render. Re-evaluation on
//! navigation events is driven by the shell, which listens to
//! [`History`](crate::history::History) and calls `resolve` on every change.
//!
//! # Overlay semantics
//!
//! This is not a single-active-view router: every binding matching the
//! current path renders, in declared order. That property is deliberate and
//! easy to misuse — prefix patterns must be chosen mutually exclusive where
//! only one view should show (`/account` also matches `/accountability`).
//! [`RouteTableBuilder::first_match_only`] opts into exclusive semantics.

mod binding;
mod table;

pub use binding::{MatchMode, RouteBinding};
pub use table::{RouteTable, RouteTableBuilder};
