use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};
use ip_allowlist::Checker;

/// A shared, atomically replaceable [`Checker`].
///
/// Clones refer to the same slot, so a handle kept outside the app can publish a rebuilt checker
/// to every worker without locking readers. The published checker is never mutated in place.
#[derive(Debug, Clone)]
pub struct SharedChecker {
    swap: Arc<ArcSwap<Checker>>,
}

impl SharedChecker {
    /// Constructs new shared checker slot.
    pub fn new(checker: Checker) -> Self {
        Self {
            swap: Arc::new(ArcSwap::from_pointee(checker)),
        }
    }

    /// Returns a temporary access guard to the current checker.
    pub fn load(&self) -> Guard<Arc<Checker>> {
        self.swap.load()
    }

    /// Publishes a new checker.
    ///
    /// Requests already holding a guard finish against the previous one.
    pub fn store(&self, checker: Checker) {
        tracing::debug!("replacing trusted ranges with {}", checker.ranges());
        self.swap.store(Arc::new(checker))
    }
}

impl From<Checker> for SharedChecker {
    fn from(checker: Checker) -> Self {
        Self::new(checker)
    }
}
