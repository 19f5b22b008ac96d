// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for token lifecycle events.
#[derive(Debug, Default)]
pub struct TokenMetrics {
	creations: AtomicU64,
	failures: AtomicU64,
	invalidations: AtomicU64,
}
impl TokenMetrics {
	/// Returns the number of tokens successfully created.
	pub fn creations(&self) -> u64 {
		self.creations.load(Ordering::Relaxed)
	}

	/// Returns the number of failed token-create calls.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Returns the number of tokens dropped after the platform reported them expired.
	pub fn invalidations(&self) -> u64 {
		self.invalidations.load(Ordering::Relaxed)
	}

	pub(crate) fn record_creation(&self) {
		self.creations.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_invalidation(&self) {
		self.invalidations.fetch_add(1, Ordering::Relaxed);
	}
}
