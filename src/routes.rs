//! Path constants for the declared route table.
//!
//! Every navigable path in the application is named here so that the
//! composition root, the navigation bar, and tests all agree on the
//! exact strings.

/// Landing page. Declared exact so it does not shadow every other path.
pub const LANDING: &str = "/";

/// Account registration.
pub const SIGN_UP: &str = "/signup";

/// Sign-in form.
pub const SIGN_IN: &str = "/signin";

/// Password reset request.
pub const PASSWORD_FORGET: &str = "/pw-forget";

/// Account settings for the signed-in principal.
pub const ACCOUNT: &str = "/account";

/// Administration area.
pub const ADMIN: &str = "/admin";

/// Signed-in dashboard.
pub const DASHBOARD: &str = "/dashboard";
