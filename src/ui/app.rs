//! Shell composition root.
//!
//! [`AppShell`] wires the tree leaf-first: a [`SessionProvider`] attached to
//! the injected authentication backend wraps the router, which wraps the
//! fixed navigation bar plus the declared path table. Session state flows
//! down into every render pass; navigation events flow up as path changes
//! the shell reacts to.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ShellError;
use crate::history::{History, HistorySubscription};
use crate::router::RouteTable;
use crate::routes;
use crate::session::{AuthBackend, Session, SessionProvider, SessionSubscription};
use crate::ui::nav::Navigation;
use crate::ui::pages::{
    Account, Admin, Dashboard, Landing, NotFound, PasswordForget, SignIn, SignUp,
};
use crate::ui::view::{View, ViewContext};

/// Output of one render pass: the path it was rendered for, the names of the
/// views that rendered (navigation first), and the combined markup.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Path the frame was rendered for.
    pub path: String,
    /// Names of the rendered views, in render order.
    pub views: Vec<&'static str>,
    /// Combined markup.
    pub html: String,
}

type FrameListener = Arc<dyn Fn(&Frame) + Send + Sync>;

/// The root composition: session provider wrapping a routed view tree.
///
/// The shell re-renders — emits a [`Frame`] to its frame listeners — on every
/// navigation event and on every effective session change, so auth-dependent
/// views react without polling. [`render`](Self::render) is also available
/// pull-style and has no side effects.
pub struct AppShell {
    inner: Arc<ShellInner>,
    _history_sub: HistorySubscription,
    _session_sub: SessionSubscription,
}

struct ShellInner {
    provider: SessionProvider,
    history: History,
    nav: Arc<dyn View>,
    table: RouteTable,
    frame_listeners: RwLock<HashMap<Uuid, FrameListener>>,
}

impl fmt::Debug for AppShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppShell")
            .field("session", &self.inner.provider.current())
            .field("path", &self.inner.history.current())
            .finish()
    }
}

impl AppShell {
    /// Compose the shell with the declared route table.
    ///
    /// The table is declared in the order the bindings are evaluated:
    /// account, admin and dashboard as prefixes, the landing page exact (so
    /// it does not shadow every path), then the public pages. The
    /// configuration decides whether a catch-all view is installed and
    /// whether resolution stops at the first match.
    pub fn new(config: &AppConfig, backend: &dyn AuthBackend) -> Result<Self, ShellError> {
        let mut builder = RouteTable::builder()
            .prefix(routes::ACCOUNT, Arc::new(Account) as Arc<dyn View>)
            .prefix(routes::ADMIN, Arc::new(Admin) as Arc<dyn View>)
            .prefix(routes::DASHBOARD, Arc::new(Dashboard) as Arc<dyn View>)
            .exact(routes::LANDING, Arc::new(Landing) as Arc<dyn View>)
            .prefix(routes::SIGN_UP, Arc::new(SignUp) as Arc<dyn View>)
            .prefix(routes::SIGN_IN, Arc::new(SignIn) as Arc<dyn View>)
            .prefix(routes::PASSWORD_FORGET, Arc::new(PasswordForget) as Arc<dyn View>)
            .first_match_only(config.routing.first_match_only);
        if config.routing.catch_all_enabled {
            builder = builder.not_found(Arc::new(NotFound) as Arc<dyn View>);
        }
        let table = builder.build()?;
        let nav = Arc::new(Navigation::new(config.ui.title.clone()));

        Ok(Self::compose(table, nav, backend))
    }

    /// Compose the shell around a custom table and navigation view.
    #[must_use]
    pub fn compose(table: RouteTable, nav: Arc<dyn View>, backend: &dyn AuthBackend) -> Self {
        let provider = SessionProvider::new();
        let history = History::new();

        let inner = Arc::new(ShellInner {
            provider: provider.clone(),
            history: history.clone(),
            nav,
            table,
            frame_listeners: RwLock::new(HashMap::new()),
        });

        // Reactive wiring: both event sources re-render through a weak
        // handle, so a dropped shell stops reacting.
        let weak = Arc::downgrade(&inner);
        let history_sub = history.subscribe(move |_path| {
            if let Some(inner) = weak.upgrade() {
                ShellInner::emit(&inner);
            }
        });
        let weak = Arc::downgrade(&inner);
        let session_sub = provider.subscribe(move |_session| {
            if let Some(inner) = weak.upgrade() {
                ShellInner::emit(&inner);
            }
        });

        // Attach last: a backend replaying its current value lands on a
        // fully wired tree.
        provider.attach(backend);

        info!(
            name: "shell.composed",
            bindings = inner.table.bindings().len(),
            "application shell composed"
        );

        Self {
            inner,
            _history_sub: history_sub,
            _session_sub: session_sub,
        }
    }

    /// Render the current path with the current session. Side-effect-free.
    #[must_use]
    pub fn render(&self) -> Frame {
        self.inner.render_frame()
    }

    /// Navigate to a path. Triggers a re-render.
    pub fn navigate(&self, path: &str) {
        self.inner.history.push(path);
    }

    /// Handle to the navigation history.
    #[must_use]
    pub fn history(&self) -> History {
        self.inner.history.clone()
    }

    /// The current session value.
    #[must_use]
    pub fn session(&self) -> Session {
        self.inner.provider.current()
    }

    /// Register a listener for rendered frames.
    ///
    /// Fired on every navigation event and effective session change.
    /// Dropping the guard unsubscribes.
    #[must_use]
    pub fn on_frame(&self, listener: impl Fn(&Frame) + Send + Sync + 'static) -> FrameSubscription {
        let id = Uuid::new_v4();
        self.inner
            .frame_listeners
            .write()
            .unwrap()
            .insert(id, Arc::new(listener));
        FrameSubscription {
            shell: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Stop receiving session updates from the authentication backend.
    ///
    /// Observers keep seeing the last value applied before detachment;
    /// deliveries that land afterwards are dropped. Dropping the shell
    /// detaches too.
    pub fn detach(&self) {
        self.inner.provider.detach();
    }
}

impl ShellInner {
    fn render_frame(&self) -> Frame {
        let path = self.history.current();
        let ctx = ViewContext::new(self.provider.current(), path.clone());

        let matched = self.table.resolve(&path);
        let mut views = Vec::with_capacity(matched.len() + 1);
        views.push(self.nav.name());

        let mut html = self.nav.render(&ctx);
        html.push_str("\n<hr/>\n");
        for view in &matched {
            views.push(view.name());
            html.push_str(&view.render(&ctx));
            html.push('\n');
        }

        Frame { path, views, html }
    }

    fn emit(inner: &Arc<Self>) {
        let frame = inner.render_frame();
        debug!(
            name: "shell.frame",
            path = %frame.path,
            views = frame.views.len(),
            "frame rendered"
        );
        let listeners: Vec<FrameListener> = inner
            .frame_listeners
            .read()
            .unwrap()
            .values()
            .map(Arc::clone)
            .collect();
        for listener in listeners {
            listener(&frame);
        }
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.inner.provider.detach();
    }
}

/// Guard for a registered frame listener. Unsubscribes on drop.
pub struct FrameSubscription {
    shell: Weak<ShellInner>,
    id: Uuid,
}

impl fmt::Debug for FrameSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl FrameSubscription {
    /// Unsubscribe now instead of at drop time.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.shell.upgrade() {
            inner.frame_listeners.write().unwrap().remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryAuthBackend;

    fn config() -> AppConfig {
        let cli = <crate::config::Cli as clap::Parser>::try_parse_from(["portal-shell"])
            .expect("cli parse");
        AppConfig::load_with_cli(&cli).expect("config")
    }

    #[test]
    fn test_landing_frame() {
        let backend = MemoryAuthBackend::new();
        let shell = AppShell::new(&config(), &backend).expect("shell");

        let frame = shell.render();
        assert_eq!(frame.path, "/");
        assert_eq!(frame.views, vec!["Navigation", "Landing"]);
    }

    #[test]
    fn test_unmatched_path_renders_navigation_only() {
        let backend = MemoryAuthBackend::new();
        let shell = AppShell::new(&config(), &backend).expect("shell");

        shell.navigate("/nowhere");
        let frame = shell.render();
        assert_eq!(frame.views, vec!["Navigation"]);
    }

    #[test]
    fn test_session_change_triggers_frame() {
        let backend = MemoryAuthBackend::new();
        let shell = AppShell::new(&config(), &backend).expect("shell");

        let frames = Arc::new(RwLock::new(Vec::new()));
        let sink = Arc::clone(&frames);
        let _sub = shell.on_frame(move |frame| sink.write().unwrap().push(frame.clone()));

        backend.sign_in("user42");
        let frames = frames.read().unwrap();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].html.contains("Sign Out"));
    }

    #[test]
    fn test_navigation_triggers_frame() {
        let backend = MemoryAuthBackend::new();
        let shell = AppShell::new(&config(), &backend).expect("shell");

        let frames = Arc::new(RwLock::new(Vec::new()));
        let sink = Arc::clone(&frames);
        let _sub = shell.on_frame(move |frame| sink.write().unwrap().push(frame.clone()));

        shell.navigate("/signin");
        let frames = frames.read().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].views, vec!["Navigation", "SignIn"]);
    }
}
