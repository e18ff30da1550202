//! Navigation history collaborator.
//!
//! [`History`] owns the current path; the shell only reads it and reacts to
//! its change notifications. The entry stack mirrors platform history
//! semantics: `push` discards any forward entries, `replace` swaps the
//! current entry in place, and `back`/`forward` move a cursor and are no-ops
//! at either boundary.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use tracing::debug;
use uuid::Uuid;

type PathListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Navigation history: an entry stack, a cursor, and change listeners.
///
/// A handle over shared state; clones observe and mutate the same history.
#[derive(Clone)]
pub struct History {
    inner: Arc<HistoryInner>,
}

struct HistoryInner {
    stack: RwLock<HistoryStack>,
    listeners: RwLock<HashMap<Uuid, PathListener>>,
}

struct HistoryStack {
    entries: Vec<String>,
    cursor: usize,
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stack = self.inner.stack.read().unwrap();
        f.debug_struct("History")
            .field("current", &stack.entries[stack.cursor])
            .field("entries", &stack.entries.len())
            .finish()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history positioned at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at("/")
    }

    /// Create a history positioned at the given path.
    #[must_use]
    pub fn starting_at(path: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(HistoryInner {
                stack: RwLock::new(HistoryStack {
                    entries: vec![path.into()],
                    cursor: 0,
                }),
                listeners: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The current path.
    #[must_use]
    pub fn current(&self) -> String {
        let stack = self.inner.stack.read().unwrap();
        stack.entries[stack.cursor].clone()
    }

    /// Navigate to a new path, discarding any forward entries.
    pub fn push(&self, path: impl Into<String>) {
        let path = path.into();
        {
            let mut stack = self.inner.stack.write().unwrap();
            let cut = stack.cursor + 1;
            stack.entries.truncate(cut);
            stack.entries.push(path.clone());
            stack.cursor += 1;
        }
        debug!(name: "nav.push", path = %path, "navigated");
        self.notify(&path);
    }

    /// Swap the current entry without growing the stack.
    pub fn replace(&self, path: impl Into<String>) {
        let path = path.into();
        {
            let mut stack = self.inner.stack.write().unwrap();
            let cursor = stack.cursor;
            stack.entries[cursor] = path.clone();
        }
        debug!(name: "nav.replace", path = %path, "navigated");
        self.notify(&path);
    }

    /// Move one entry back. No-op at the oldest entry.
    pub fn back(&self) {
        let path = {
            let mut stack = self.inner.stack.write().unwrap();
            if stack.cursor == 0 {
                return;
            }
            stack.cursor -= 1;
            stack.entries[stack.cursor].clone()
        };
        debug!(name: "nav.back", path = %path, "navigated");
        self.notify(&path);
    }

    /// Move one entry forward. No-op at the newest entry.
    pub fn forward(&self) {
        let path = {
            let mut stack = self.inner.stack.write().unwrap();
            if stack.cursor + 1 >= stack.entries.len() {
                return;
            }
            stack.cursor += 1;
            stack.entries[stack.cursor].clone()
        };
        debug!(name: "nav.forward", path = %path, "navigated");
        self.notify(&path);
    }

    /// Register a listener fired on every path change.
    ///
    /// Dropping the returned guard unsubscribes.
    #[must_use]
    pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) -> HistorySubscription {
        let id = Uuid::new_v4();
        self.inner
            .listeners
            .write()
            .unwrap()
            .insert(id, Arc::new(listener));
        HistorySubscription {
            history: Arc::downgrade(&self.inner),
            id,
        }
    }

    fn notify(&self, path: &str) {
        let listeners: Vec<PathListener> = self
            .inner
            .listeners
            .read()
            .unwrap()
            .values()
            .map(Arc::clone)
            .collect();
        for listener in listeners {
            listener(path);
        }
    }
}

/// Guard for a registered navigation listener. Unsubscribes on drop.
pub struct HistorySubscription {
    history: Weak<HistoryInner>,
    id: Uuid,
}

impl fmt::Debug for HistorySubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistorySubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl HistorySubscription {
    /// Unsubscribe now instead of at drop time.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for HistorySubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.history.upgrade() {
            inner.listeners.write().unwrap().remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_starts_at_root() {
        let history = History::new();
        assert_eq!(history.current(), "/");
    }

    #[test]
    fn test_push_and_back_forward() {
        let history = History::new();
        history.push("/account");
        history.push("/dashboard");
        assert_eq!(history.current(), "/dashboard");

        history.back();
        assert_eq!(history.current(), "/account");
        history.back();
        assert_eq!(history.current(), "/");
        history.back(); // boundary no-op
        assert_eq!(history.current(), "/");

        history.forward();
        assert_eq!(history.current(), "/account");
        history.forward();
        history.forward(); // boundary no-op
        assert_eq!(history.current(), "/dashboard");
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let history = History::new();
        history.push("/account");
        history.back();
        history.push("/signin");

        history.forward(); // nothing ahead of /signin
        assert_eq!(history.current(), "/signin");
    }

    #[test]
    fn test_replace_keeps_stack_depth() {
        let history = History::new();
        history.push("/signin");
        history.replace("/signup");
        assert_eq!(history.current(), "/signup");

        history.back();
        assert_eq!(history.current(), "/");
    }

    #[test]
    fn test_listeners_fire_on_change() {
        let history = History::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = history.subscribe(move |path| sink.lock().unwrap().push(path.to_string()));

        history.push("/admin");
        history.back();
        sub.release();
        history.push("/signup");

        assert_eq!(seen.lock().unwrap().as_slice(), &["/admin", "/"]);
    }
}
