//! Observable session value holder.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::session::backend::{AuthBackend, AuthSubscription};

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Opaque identifier assigned by the authentication collaborator.
    pub uid: String,
}

impl AuthUser {
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// The current session: an authenticated principal or its absence.
///
/// Exactly one variant holds at any instant. [`SessionProvider`] replaces the
/// whole value atomically, so readers never observe a partial update. The
/// default is [`Session::Absent`]: until the authentication collaborator
/// delivers a value the tree behaves as logged out, never as some
/// authenticated default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum Session {
    /// No authenticated principal.
    #[default]
    Absent,
    /// An authenticated principal.
    Present(AuthUser),
}

impl Session {
    /// Shorthand for a present session with the given uid.
    #[must_use]
    pub fn present(uid: impl Into<String>) -> Self {
        Self::Present(AuthUser::new(uid))
    }

    /// Whether a principal is signed in.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The signed-in principal, if any.
    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Present(user) => Some(user),
            Self::Absent => None,
        }
    }
}

type ChangeListener = Arc<dyn Fn(&Session) + Send + Sync>;

/// Observable holder for the current [`Session`].
///
/// The provider is a handle over shared state; cloning it yields another
/// handle to the same session. It is attached to an [`AuthBackend`] which
/// pushes updates asynchronously, and it fans every effective change out to
/// its own change listeners. Descendants read the latest value synchronously
/// via [`current`](Self::current).
///
/// After [`detach`](Self::detach), deliveries from the backend are dropped:
/// observers keep seeing the last value applied before detachment.
#[derive(Clone)]
pub struct SessionProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    current: RwLock<Session>,
    listeners: RwLock<HashMap<Uuid, ChangeListener>>,
    detached: AtomicBool,
    auth_sub: RwLock<Option<AuthSubscription>>,
}

impl fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionProvider")
            .field("current", &self.current())
            .field("detached", &self.inner.detached.load(Ordering::SeqCst))
            .finish()
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider {
    /// Create a detached provider holding [`Session::Absent`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                current: RwLock::new(Session::Absent),
                listeners: RwLock::new(HashMap::new()),
                detached: AtomicBool::new(true),
                auth_sub: RwLock::new(None),
            }),
        }
    }

    /// The latest session value.
    #[must_use]
    pub fn current(&self) -> Session {
        self.inner.current.read().unwrap().clone()
    }

    /// Register a change listener.
    ///
    /// The listener fires once per effective session change, after the new
    /// value is readable through [`current`](Self::current). Dropping (or
    /// releasing) the returned guard unsubscribes; releasing more than once
    /// is a no-op.
    #[must_use]
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) -> SessionSubscription {
        let id = Uuid::new_v4();
        self.inner
            .listeners
            .write()
            .unwrap()
            .insert(id, Arc::new(listener));
        SessionSubscription {
            provider: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Begin receiving updates from the authentication collaborator.
    ///
    /// Replaces any previous attachment. The backend may replay its current
    /// value immediately, so the provider can be up to date before the first
    /// render pass.
    pub fn attach(&self, backend: &dyn AuthBackend) {
        self.detach();
        self.inner.detached.store(false, Ordering::SeqCst);

        let weak = Arc::downgrade(&self.inner);
        let sub = backend.subscribe(Box::new(move |session| {
            if let Some(inner) = weak.upgrade() {
                let provider = SessionProvider { inner };
                provider.apply(session);
            }
        }));
        *self.inner.auth_sub.write().unwrap() = Some(sub);
    }

    /// Stop receiving updates from the authentication collaborator.
    ///
    /// Backend deliveries that land after this call are dropped without
    /// effect; calling `detach` on an already detached provider is a no-op.
    pub fn detach(&self) {
        self.inner.detached.store(true, Ordering::SeqCst);
        if let Some(mut sub) = self.inner.auth_sub.write().unwrap().take() {
            sub.release();
        }
    }

    /// Apply a session update.
    ///
    /// The whole value is replaced atomically before listeners fire.
    /// Re-applying a value equal to the current one is idempotent: no
    /// listener fires a second time. Updates applied while detached are
    /// dropped.
    pub fn apply(&self, next: Session) {
        if self.inner.detached.load(Ordering::SeqCst) {
            debug!(name: "session.update.dropped", "session update after detach ignored");
            return;
        }

        {
            let mut guard = self.inner.current.write().unwrap();
            if *guard == next {
                return;
            }
            *guard = next.clone();
        }

        debug!(
            name: "session.update.applied",
            present = next.is_present(),
            "session updated"
        );

        // Snapshot the listeners so callbacks run without the registry lock
        // held; a callback may therefore subscribe or unsubscribe freely.
        let listeners: Vec<ChangeListener> = self
            .inner
            .listeners
            .read()
            .unwrap()
            .values()
            .map(Arc::clone)
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }
}

/// Guard for a registered session change listener.
///
/// Unsubscribes on drop. [`release`](Self::release) does the same eagerly;
/// releasing an already released (or outlived) subscription is a no-op.
pub struct SessionSubscription {
    provider: Weak<ProviderInner>,
    id: Uuid,
}

impl fmt::Debug for SessionSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl SessionSubscription {
    /// Unsubscribe now instead of at drop time.
    pub fn release(self) {
        drop(self);
    }

    fn remove(&self) {
        if let Some(inner) = self.provider.upgrade() {
            inner.listeners.write().unwrap().remove(&self.id);
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryAuthBackend;
    use std::sync::Mutex;

    fn recording_listener() -> (Arc<Mutex<Vec<Session>>>, impl Fn(&Session) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |s: &Session| sink.lock().unwrap().push(s.clone()))
    }

    #[test]
    fn test_starts_absent() {
        let provider = SessionProvider::new();
        assert_eq!(provider.current(), Session::Absent);
    }

    #[test]
    fn test_attach_applies_updates() {
        let backend = MemoryAuthBackend::new();
        let provider = SessionProvider::new();
        provider.attach(&backend);

        backend.sign_in("user42");
        assert_eq!(provider.current(), Session::present("user42"));

        backend.sign_out();
        assert_eq!(provider.current(), Session::Absent);
    }

    #[test]
    fn test_updates_after_detach_are_dropped() {
        let backend = MemoryAuthBackend::new();
        let provider = SessionProvider::new();
        provider.attach(&backend);

        backend.sign_in("user42");
        provider.detach();
        backend.sign_out();

        assert_eq!(provider.current(), Session::present("user42"));
    }

    #[test]
    fn test_detach_twice_is_noop() {
        let backend = MemoryAuthBackend::new();
        let provider = SessionProvider::new();
        provider.attach(&backend);
        provider.detach();
        provider.detach();
        assert_eq!(provider.current(), Session::Absent);
    }

    #[test]
    fn test_idempotent_redelivery() {
        let backend = MemoryAuthBackend::new();
        let provider = SessionProvider::new();
        provider.attach(&backend);

        let (seen, listener) = recording_listener();
        let _sub = provider.subscribe(listener);

        backend.sign_in("user42");
        backend.sign_in("user42");
        assert_eq!(seen.lock().unwrap().len(), 1);

        backend.sign_in("user43");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_listener_sees_value_after_apply() {
        let provider = SessionProvider::new();
        let backend = MemoryAuthBackend::new();
        provider.attach(&backend);

        let observed = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&observed);
        let reader = provider.clone();
        let _sub = provider.subscribe(move |_| {
            *sink.lock().unwrap() = Some(reader.current());
        });

        backend.sign_in("user42");
        assert_eq!(
            observed.lock().unwrap().clone(),
            Some(Session::present("user42"))
        );
    }

    #[test]
    fn test_subscription_drop_unsubscribes() {
        let backend = MemoryAuthBackend::new();
        let provider = SessionProvider::new();
        provider.attach(&backend);

        let (seen, listener) = recording_listener();
        let sub = provider.subscribe(listener);

        backend.sign_in("a");
        sub.release();
        backend.sign_in("b");

        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
