//! Cooperative cancellation for long-running pair computations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellation flag with an optional deadline
///
/// Clones share the same flag. A child created with
/// [`child_with_timeout`](Self::child_with_timeout) has its own flag: it
/// observes the parent's cancellation, but neither its deadline nor its
/// [`cancel`](Self::cancel) ever reaches the parent.
///
/// Work units poll [`is_cancelled`](Self::is_cancelled) before they start;
/// units already running are allowed to finish.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    parent: Option<Arc<CancellationToken>>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that reports cancelled once `timeout` has elapsed
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            ..Self::default()
        }
    }

    /// Child token cancelled with this one, or once `timeout` has elapsed
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::new(self.clone())),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Request cancellation for this token, its clones and its children
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return true;
        }
        if matches!(self.deadline, Some(deadline) if Instant::now() >= deadline) {
            return true;
        }
        self.parent.as_ref().map_or(false, |parent| parent.is_cancelled())
    }

    /// Earliest deadline of this token and its ancestors
    pub fn deadline(&self) -> Option<Instant> {
        let inherited = self.parent.as_ref().and_then(|parent| parent.deadline());
        match (self.deadline, inherited) {
            (Some(own), Some(parent)) => Some(own.min(parent)),
            (own, parent) => own.or(parent),
        }
    }
}
