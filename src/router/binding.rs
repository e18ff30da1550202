//! A single path-pattern binding.

use std::fmt;
use std::sync::Arc;

use crate::ui::view::View;

/// How a pattern is compared against the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The path must equal the pattern. The root binding is declared exact,
    /// otherwise it would shadow every path sharing the `/` prefix.
    Exact,
    /// The path must start with the pattern. Note that `/account` also
    /// matches `/accountability`; patterns sharing a textual prefix overlap.
    Prefix,
}

/// One entry in the route table: a pattern, a match mode, and the bound view.
pub struct RouteBinding {
    pattern: String,
    mode: MatchMode,
    view: Arc<dyn View>,
}

impl fmt::Debug for RouteBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBinding")
            .field("pattern", &self.pattern)
            .field("mode", &self.mode)
            .field("view", &self.view.name())
            .finish()
    }
}

impl RouteBinding {
    pub(crate) fn new(pattern: String, mode: MatchMode, view: Arc<dyn View>) -> Self {
        Self {
            pattern,
            mode,
            view,
        }
    }

    /// The declared pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The declared match mode.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The bound view.
    #[must_use]
    pub fn view(&self) -> &Arc<dyn View> {
        &self.view
    }

    /// Whether this binding matches the given path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self.mode {
            MatchMode::Exact => path == self.pattern,
            MatchMode::Prefix => path.starts_with(&self.pattern),
        }
    }
}
