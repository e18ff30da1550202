//! Navigation bar.

use crate::routes;
use crate::ui::view::{View, ViewContext};

/// Top navigation bar, rendered ahead of the routed views on every frame.
///
/// The link set branches on session presence: signed-out visitors get the
/// public links, a signed-in principal gets the account links.
#[derive(Debug)]
pub struct Navigation {
    title: String,
}

impl Navigation {
    /// Create a navigation bar with the given brand title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

fn link(href: &str, label: &str) -> String {
    format!(
        "<a href=\"{href}\" class=\"text-sm text-textMuted hover:text-textPrimary transition-colors\">{label}</a>"
    )
}

impl View for Navigation {
    fn name(&self) -> &'static str {
        "Navigation"
    }

    fn render(&self, ctx: &ViewContext) -> String {
        let links = if ctx.session().is_present() {
            vec![
                link(routes::LANDING, "Landing"),
                link(routes::DASHBOARD, "Dashboard"),
                link(routes::ACCOUNT, "Account"),
                link(routes::ADMIN, "Admin"),
                link(routes::SIGN_IN, "Sign Out"),
            ]
        } else {
            vec![
                link(routes::LANDING, "Landing"),
                link(routes::SIGN_IN, "Sign In"),
                link(routes::SIGN_UP, "Sign Up"),
            ]
        };

        format!(
            "<header class=\"sticky top-0 z-50 w-full border-b border-panelBorder\">\n\
             <div class=\"container mx-auto flex h-14 items-center justify-between px-4 max-w-5xl\">\n\
             <a href=\"/\" class=\"flex items-center gap-2 font-semibold\">{}</a>\n\
             <nav class=\"flex items-center gap-6\">{}</nav>\n\
             </div>\n</header>",
            self.title,
            links.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_signed_out_links() {
        let nav = Navigation::new("Portal");
        let html = nav.render(&ViewContext::new(Session::Absent, "/"));
        assert!(html.contains("Sign In"));
        assert!(!html.contains("Dashboard"));
    }

    #[test]
    fn test_signed_in_links() {
        let nav = Navigation::new("Portal");
        let html = nav.render(&ViewContext::new(Session::present("user42"), "/"));
        assert!(html.contains("Dashboard"));
        assert!(html.contains("Sign Out"));
        assert!(!html.contains("Sign Up"));
    }
}
