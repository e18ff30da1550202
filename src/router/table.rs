//! Ordered route table and pure path resolution.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::RouteError;
use crate::router::binding::{MatchMode, RouteBinding};
use crate::ui::view::View;

/// Ordered table of route bindings.
///
/// Resolution is a pure function of the path and the declared bindings; the
/// table holds no navigation state of its own.
pub struct RouteTable {
    bindings: Vec<RouteBinding>,
    catch_all: Option<Arc<dyn View>>,
    first_match_only: bool,
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("bindings", &self.bindings)
            .field("catch_all", &self.catch_all.as_ref().map(|v| v.name()))
            .field("first_match_only", &self.first_match_only)
            .finish()
    }
}

impl RouteTable {
    /// Start declaring a table.
    #[must_use]
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// The declared bindings, in order.
    #[must_use]
    pub fn bindings(&self) -> &[RouteBinding] {
        &self.bindings
    }

    /// Every view whose binding matches `path`, in declared order.
    ///
    /// More than one binding may match: all matching views render
    /// simultaneously unless the table was built with
    /// [`first_match_only`](RouteTableBuilder::first_match_only). With no
    /// match the result is empty (a blank region), unless a catch-all view
    /// was installed.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Vec<Arc<dyn View>> {
        let mut matched: Vec<Arc<dyn View>> = Vec::new();
        for binding in &self.bindings {
            if binding.matches(path) {
                matched.push(Arc::clone(binding.view()));
                if self.first_match_only {
                    break;
                }
            }
        }

        if matched.is_empty() {
            if let Some(fallback) = &self.catch_all {
                matched.push(Arc::clone(fallback));
            }
        }

        trace!(
            name: "route.resolved",
            path = %path,
            views = matched.len(),
            "route table resolved"
        );
        matched
    }
}

/// Builder for [`RouteTable`]. Patterns are validated at
/// [`build`](Self::build): they must be non-empty and begin with `/`.
#[derive(Default)]
pub struct RouteTableBuilder {
    bindings: Vec<(String, MatchMode, Arc<dyn View>)>,
    catch_all: Option<Arc<dyn View>>,
    first_match_only: bool,
}

impl fmt::Debug for RouteTableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTableBuilder")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl RouteTableBuilder {
    /// Bind a view to an exact pattern.
    #[must_use]
    pub fn exact(mut self, pattern: impl Into<String>, view: Arc<dyn View>) -> Self {
        self.bindings.push((pattern.into(), MatchMode::Exact, view));
        self
    }

    /// Bind a view to a prefix pattern.
    #[must_use]
    pub fn prefix(mut self, pattern: impl Into<String>, view: Arc<dyn View>) -> Self {
        self.bindings.push((pattern.into(), MatchMode::Prefix, view));
        self
    }

    /// Install a catch-all view rendered when nothing else matches.
    #[must_use]
    pub fn not_found(mut self, view: Arc<dyn View>) -> Self {
        self.catch_all = Some(view);
        self
    }

    /// Render only the first matching binding instead of every match.
    #[must_use]
    pub fn first_match_only(mut self, enabled: bool) -> Self {
        self.first_match_only = enabled;
        self
    }

    /// Validate the declared patterns and produce the table.
    pub fn build(self) -> Result<RouteTable, RouteError> {
        let mut bindings = Vec::with_capacity(self.bindings.len());
        for (pattern, mode, view) in self.bindings {
            if pattern.is_empty() {
                return Err(RouteError::EmptyPattern);
            }
            if !pattern.starts_with('/') {
                return Err(RouteError::NotRooted(pattern));
            }
            bindings.push(RouteBinding::new(pattern, mode, view));
        }
        Ok(RouteTable {
            bindings,
            catch_all: self.catch_all,
            first_match_only: self.first_match_only,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::view::ViewContext;

    struct Stub(&'static str);

    impl View for Stub {
        fn name(&self) -> &'static str {
            self.0
        }

        fn render(&self, _ctx: &ViewContext) -> String {
            self.0.to_string()
        }
    }

    fn stub(name: &'static str) -> Arc<dyn View> {
        Arc::new(Stub(name))
    }

    fn names(views: &[Arc<dyn View>]) -> Vec<&'static str> {
        views.iter().map(|v| v.name()).collect()
    }

    fn table() -> RouteTable {
        RouteTable::builder()
            .exact("/", stub("landing"))
            .prefix("/signup", stub("signup"))
            .prefix("/account", stub("account"))
            .prefix("/admin", stub("admin"))
            .prefix("/dashboard", stub("dashboard"))
            .build()
            .expect("valid table")
    }

    #[test]
    fn test_root_is_exclusive_to_landing() {
        let resolved = table().resolve("/");
        assert_eq!(names(&resolved), vec!["landing"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let resolved = table().resolve("/nowhere");
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_prefix_resolution() {
        let resolved = table().resolve("/admin/users");
        assert_eq!(names(&resolved), vec!["admin"]);
    }

    #[test]
    fn test_overlay_renders_every_match_in_declared_order() {
        let overlapping = RouteTable::builder()
            .prefix("/app", stub("frame"))
            .prefix("/app/settings", stub("settings"))
            .build()
            .expect("valid table");

        let resolved = overlapping.resolve("/app/settings");
        assert_eq!(names(&resolved), vec!["frame", "settings"]);
    }

    #[test]
    fn test_first_match_only_truncates() {
        let exclusive = RouteTable::builder()
            .prefix("/app", stub("frame"))
            .prefix("/app/settings", stub("settings"))
            .first_match_only(true)
            .build()
            .expect("valid table");

        let resolved = exclusive.resolve("/app/settings");
        assert_eq!(names(&resolved), vec!["frame"]);
    }

    #[test]
    fn test_textual_prefix_overlap() {
        let resolved = table().resolve("/accountability");
        assert_eq!(names(&resolved), vec!["account"]);
    }

    #[test]
    fn test_catch_all_fallback() {
        let with_fallback = RouteTable::builder()
            .exact("/", stub("landing"))
            .not_found(stub("not_found"))
            .build()
            .expect("valid table");

        assert_eq!(names(&with_fallback.resolve("/nowhere")), vec!["not_found"]);
        // The fallback never shadows a real match.
        assert_eq!(names(&with_fallback.resolve("/")), vec!["landing"]);
    }

    #[test]
    fn test_pattern_validation() {
        let err = RouteTable::builder()
            .exact("", stub("x"))
            .build()
            .expect_err("empty pattern");
        assert_eq!(err, RouteError::EmptyPattern);

        let err = RouteTable::builder()
            .prefix("admin", stub("x"))
            .build()
            .expect_err("unrooted pattern");
        assert_eq!(err, RouteError::NotRooted("admin".to_string()));
    }
}
