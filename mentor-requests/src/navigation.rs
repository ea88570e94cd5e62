//! Client-side navigation.

use std::sync::{Arc, Mutex, PoisonError};

/// Changes the page the client shows
pub trait Navigator: Send + Sync {
    /// Append `path` to the navigation history and show it
    fn push(&self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn push(&self, path: &str) {
        (**self).push(path);
    }
}

/// In-memory navigation history.
///
/// Clones share the same history, so a page can push while its host
/// watches `current()`.
#[derive(Clone, Debug)]
pub struct History {
    entries: Arc<Mutex<Vec<String>>>,
}

impl History {
    /// Start a history at `initial_path`
    #[must_use]
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![initial_path.into()])),
        }
    }

    /// The path currently shown
    #[must_use]
    pub fn current(&self) -> String {
        self.read(|entries| entries.last().cloned().unwrap_or_default())
    }

    /// Every path visited, oldest first
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.read(Clone::clone)
    }

    /// Number of history entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(Vec::len)
    }

    /// Whether the history has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<T>(&self, f: impl FnOnce(&Vec<String>) -> T) -> T {
        f(&self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for History {
    fn push(&self, path: &str) {
        tracing::info!(path, "Navigating");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
    }
}

/// Interpolate `id` into a route template containing `{id}`
#[must_use]
pub fn route_for(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}
