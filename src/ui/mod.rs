//! Views and the shell composition root.
//!
//! # Structure
//!
//! - [`app`]: [`AppShell`](app::AppShell) composition root and [`Frame`](app::Frame)
//! - [`view`]: the [`View`](view::View) contract and [`ViewContext`](view::ViewContext)
//! - [`pages`]: the page views bound by the declared route table
//! - [`nav`]: the navigation bar

pub mod app;
pub mod nav;
pub mod pages;
pub mod view;

pub use app::{AppShell, Frame, FrameSubscription};
pub use view::{View, ViewContext};
