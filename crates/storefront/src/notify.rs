//! User-visible notifications ("toasts").
//!
//! Containers report what happened through a [`Notifier`]. Delivery is
//! fire-and-forget: notifiers return nothing and cannot fail.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// A short notification with a title and a one-line description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    /// Create a toast.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Receiver of toasts.
pub trait Notifier: Send + Sync {
    /// Deliver a toast.
    fn notify(&self, toast: Toast);
}

/// Emits each toast as an `info` tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        tracing::info!(title = %toast.title, description = %toast.description, "Notification");
    }
}

/// Records toasts in memory so they can be shown or inspected later.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts delivered so far.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent toast.
    #[must_use]
    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Remove and return all recorded toasts.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
