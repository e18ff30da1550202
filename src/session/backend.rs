//! Authentication collaborator contract and bundled adapters.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use futures::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;
use uuid::Uuid;

use crate::session::Session;

/// Callback invoked with each [`Session`] the authentication collaborator
/// delivers.
pub type AuthListener = Box<dyn Fn(Session) + Send + Sync>;

/// Source of session state changes.
///
/// Implementations deliver a [`Session`] to the registered listener whenever
/// the underlying authentication state changes, and should replay the current
/// value to a fresh subscriber so consumers do not start stale. Delivery is
/// fire-and-forget: a listener that has been released simply stops receiving.
pub trait AuthBackend: Send + Sync {
    /// Register a listener for session changes.
    fn subscribe(&self, listener: AuthListener) -> AuthSubscription;
}

/// Release guard for an [`AuthBackend`] registration.
///
/// Releases on drop. [`release`](Self::release) may be called any number of
/// times; only the first has an effect.
pub struct AuthSubscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("released", &self.release.is_none())
            .finish()
    }
}

impl AuthSubscription {
    /// Wrap a release action.
    #[must_use]
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Stop deliveries. Idempotent.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

type BackendListener = Arc<dyn Fn(Session) + Send + Sync>;

/// In-process authentication source.
///
/// Holds the current session and pushes every change to all subscribers
/// synchronously. New subscribers get the current value replayed immediately.
/// Useful as the demo/test collaborator and as a template for real backends.
#[derive(Clone, Default)]
pub struct MemoryAuthBackend {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    current: RwLock<Session>,
    listeners: RwLock<HashMap<Uuid, BackendListener>>,
}

impl fmt::Debug for MemoryAuthBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryAuthBackend")
            .field("current", &*self.inner.current.read().unwrap())
            .finish()
    }
}

impl MemoryAuthBackend {
    /// Create a backend holding [`Session::Absent`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current session and notify all subscribers.
    pub fn set(&self, session: Session) {
        {
            let mut guard = self.inner.current.write().unwrap();
            *guard = session.clone();
        }
        let listeners: Vec<BackendListener> = self
            .inner
            .listeners
            .read()
            .unwrap()
            .values()
            .map(Arc::clone)
            .collect();
        for listener in listeners {
            listener(session.clone());
        }
    }

    /// Sign a principal in.
    pub fn sign_in(&self, uid: impl Into<String>) {
        self.set(Session::present(uid));
    }

    /// Sign the current principal out.
    pub fn sign_out(&self) {
        self.set(Session::Absent);
    }
}

impl AuthBackend for MemoryAuthBackend {
    fn subscribe(&self, listener: AuthListener) -> AuthSubscription {
        let id = Uuid::new_v4();
        let listener: BackendListener = Arc::from(listener);

        // Replay the current value so the subscriber does not start stale.
        listener(self.inner.current.read().unwrap().clone());

        self.inner
            .listeners
            .write()
            .unwrap()
            .insert(id, listener);

        let weak: Weak<MemoryInner> = Arc::downgrade(&self.inner);
        AuthSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.write().unwrap().remove(&id);
                debug!(name: "auth.listener.released", "auth listener released");
            }
        })
    }
}

/// Adapter from a `tokio::sync::watch` channel to the [`AuthBackend`]
/// contract.
///
/// Bridges an async authentication source: each subscription spawns a task
/// that forwards the watch channel's values (current value first, then every
/// change) to the listener. Requires a tokio runtime at subscription time.
#[derive(Debug, Clone)]
pub struct WatchAuthBackend {
    rx: watch::Receiver<Session>,
}

impl WatchAuthBackend {
    /// Wrap an existing watch receiver.
    #[must_use]
    pub fn new(rx: watch::Receiver<Session>) -> Self {
        Self { rx }
    }

    /// Create a fresh channel starting at [`Session::Absent`] and the backend
    /// reading from it.
    #[must_use]
    pub fn channel() -> (watch::Sender<Session>, Self) {
        let (tx, rx) = watch::channel(Session::Absent);
        (tx, Self::new(rx))
    }
}

impl AuthBackend for WatchAuthBackend {
    fn subscribe(&self, listener: AuthListener) -> AuthSubscription {
        let rx = self.rx.clone();
        let handle = tokio::spawn(async move {
            let mut stream = WatchStream::new(rx);
            while let Some(session) = stream.next().await {
                listener(session);
            }
        });
        AuthSubscription::new(move || handle.abort())
    }
}
