//! The renderable unit contract.

use crate::session::Session;

/// Inputs available to a view during one render pass.
///
/// The session is handed to the view explicitly; there is no ambient lookup.
/// A view that needs to gate on authentication reads it from here and renders
/// its own denial state — the router never gates.
#[derive(Debug, Clone)]
pub struct ViewContext {
    session: Session,
    path: String,
}

impl ViewContext {
    /// Build a context for one render pass.
    #[must_use]
    pub fn new(session: Session, path: impl Into<String>) -> Self {
        Self {
            session,
            path: path.into(),
        }
    }

    /// The session snapshot taken at the start of the pass.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The path being rendered.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// An opaque renderable unit.
///
/// Pages and the navigation bar implement this. The shell's only contract
/// with a view is: given nothing more than being mounted, produce markup.
pub trait View: Send + Sync {
    /// Stable name used in frames and logs.
    fn name(&self) -> &'static str;

    /// Produce markup for this render pass.
    fn render(&self, ctx: &ViewContext) -> String;
}
