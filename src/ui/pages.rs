//! Page views.
//!
//! Each page is an opaque renderable unit; the shell only mounts it. Pages
//! that gate on authentication read the session from their [`ViewContext`]
//! and render their own denial state — nothing upstream gates for them.

use crate::ui::view::{View, ViewContext};

fn page(title: &str, body: &str) -> String {
    format!(
        "<section class=\"container mx-auto px-4 py-6 max-w-5xl space-y-4\">\n\
         <h1 class=\"text-2xl font-bold\">{title}</h1>\n{body}\n</section>"
    )
}

fn denied(title: &str) -> String {
    page(
        title,
        "<p class=\"text-textMuted\">You must be signed in to view this page.</p>",
    )
}

/// Landing page.
#[derive(Debug, Default)]
pub struct Landing;

impl View for Landing {
    fn name(&self) -> &'static str {
        "Landing"
    }

    fn render(&self, _ctx: &ViewContext) -> String {
        page(
            "Welcome",
            "<p class=\"text-textMuted\">Sign in to reach your dashboard.</p>",
        )
    }
}

/// Account registration page.
#[derive(Debug, Default)]
pub struct SignUp;

impl View for SignUp {
    fn name(&self) -> &'static str {
        "SignUp"
    }

    fn render(&self, _ctx: &ViewContext) -> String {
        page(
            "Sign Up",
            "<form class=\"space-y-4\" method=\"post\" action=\"/signup\"></form>",
        )
    }
}

/// Sign-in page.
#[derive(Debug, Default)]
pub struct SignIn;

impl View for SignIn {
    fn name(&self) -> &'static str {
        "SignIn"
    }

    fn render(&self, _ctx: &ViewContext) -> String {
        page(
            "Sign In",
            "<form class=\"space-y-4\" method=\"post\" action=\"/signin\"></form>\n\
             <a class=\"text-sm text-primary\" href=\"/pw-forget\">Forgot password?</a>",
        )
    }
}

/// Password reset request page.
#[derive(Debug, Default)]
pub struct PasswordForget;

impl View for PasswordForget {
    fn name(&self) -> &'static str {
        "PasswordForget"
    }

    fn render(&self, _ctx: &ViewContext) -> String {
        page(
            "Reset Password",
            "<form class=\"space-y-4\" method=\"post\" action=\"/pw-forget\"></form>",
        )
    }
}

/// Account settings for the signed-in principal.
#[derive(Debug, Default)]
pub struct Account;

impl View for Account {
    fn name(&self) -> &'static str {
        "Account"
    }

    fn render(&self, ctx: &ViewContext) -> String {
        match ctx.session().user() {
            Some(user) => page(
                "Account",
                &format!("<p class=\"text-textMuted\">Signed in as {}.</p>", user.uid),
            ),
            None => denied("Account"),
        }
    }
}

/// Administration area.
#[derive(Debug, Default)]
pub struct Admin;

impl View for Admin {
    fn name(&self) -> &'static str {
        "Admin"
    }

    fn render(&self, ctx: &ViewContext) -> String {
        if ctx.session().is_present() {
            page(
                "Admin",
                "<p class=\"text-textMuted\">User administration.</p>",
            )
        } else {
            denied("Admin")
        }
    }
}

/// Signed-in dashboard.
#[derive(Debug, Default)]
pub struct Dashboard;

impl View for Dashboard {
    fn name(&self) -> &'static str {
        "Dashboard"
    }

    fn render(&self, ctx: &ViewContext) -> String {
        match ctx.session().user() {
            Some(user) => page(
                "Dashboard",
                &format!("<p class=\"text-textMuted\">Hello, {}.</p>", user.uid),
            ),
            None => denied("Dashboard"),
        }
    }
}

/// Catch-all page, rendered only when installed and nothing else matches.
#[derive(Debug, Default)]
pub struct NotFound;

impl View for NotFound {
    fn name(&self) -> &'static str {
        "NotFound"
    }

    fn render(&self, ctx: &ViewContext) -> String {
        page(
            "404",
            &format!(
                "<p class=\"text-textMuted\">No page at {}.</p>\n\
                 <a class=\"text-primary\" href=\"/\">Go Home</a>",
                ctx.path()
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_admin_renders_denial_when_absent() {
        let ctx = ViewContext::new(Session::Absent, "/admin");
        let html = Admin.render(&ctx);
        assert!(html.contains("signed in to view"));
    }

    #[test]
    fn test_dashboard_greets_signed_in_user() {
        let ctx = ViewContext::new(Session::present("user42"), "/dashboard");
        let html = Dashboard.render(&ctx);
        assert!(html.contains("user42"));
    }

    #[test]
    fn test_not_found_echoes_path() {
        let ctx = ViewContext::new(Session::Absent, "/nowhere");
        assert!(NotFound.render(&ctx).contains("/nowhere"));
    }
}
