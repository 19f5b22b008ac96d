//! Token slot with singleflight creation and compare-and-clear invalidation.
//!
//! [`TokenManager::valid_token`] serves the cached token while it is inside its refresh
//! window. Otherwise the caller takes the creation guard, re-checks the slot (another caller
//! may have refreshed it meanwhile), clears it, and awaits the supplied creation future, so
//! concurrent callers that observe a missing or stale token share one token-create call.

mod metrics;

pub use metrics::TokenMetrics;

// self
use crate::{
	_prelude::*,
	auth::{Token, TokenState},
};

/// Owns the client's current access token.
#[derive(Debug, Default)]
pub struct TokenManager {
	current: RwLock<Option<Token>>,
	create_guard: AsyncMutex<()>,
	metrics: TokenMetrics,
}
impl TokenManager {
	/// Creates an empty manager in the [`TokenState::Absent`] state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a snapshot of the current token, if any.
	pub fn current(&self) -> Option<Token> {
		self.current.read().clone()
	}

	/// Computes the slot state at `now`.
	pub fn state_at(&self, now: OffsetDateTime) -> TokenState {
		match self.current.read().as_ref() {
			Some(token) => token.state_at(now),
			None => TokenState::Absent,
		}
	}

	/// Returns lifecycle counters.
	pub fn metrics(&self) -> &TokenMetrics {
		&self.metrics
	}

	/// Drops the current token unconditionally.
	pub fn clear(&self) {
		*self.current.write() = None;
	}

	/// Installs `token`, replacing whatever was cached.
	pub fn replace(&self, token: Token) {
		*self.current.write() = Some(token);
	}

	/// Drops the current token only if it is still `stale`.
	///
	/// Tokens are compared whole, creation instant included, so a replacement that reuses the
	/// same access-token string is kept. Returns `false` when another caller already replaced
	/// `stale`.
	pub fn invalidate(&self, stale: &Token) -> bool {
		let mut current = self.current.write();

		if current.as_ref() == Some(stale) {
			*current = None;

			self.metrics.record_invalidation();

			true
		} else {
			false
		}
	}

	/// Returns a token that does not need refreshing, creating one with `create` if needed.
	pub async fn valid_token<F, Fut>(&self, create: F) -> Result<Token>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<Token>>,
	{
		if let Some(token) = self.fresh(OffsetDateTime::now_utc()) {
			return Ok(token);
		}

		let _singleflight = self.create_guard.lock().await;

		if let Some(token) = self.fresh(OffsetDateTime::now_utc()) {
			return Ok(token);
		}

		self.clear();

		match create().await {
			Ok(token) => {
				self.metrics.record_creation();
				self.replace(token.clone());

				Ok(token)
			},
			Err(err) => {
				self.metrics.record_failure();

				Err(err)
			},
		}
	}

	fn fresh(&self, now: OffsetDateTime) -> Option<Token> {
		self.current.read().as_ref().filter(|token| !token.needs_refresh_at(now)).cloned()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;

	fn token(value: &str, expires_in: i64, age: Duration) -> Token {
		Token::new(value, expires_in, OffsetDateTime::now_utc() - age)
			.expect("Token fixture should be valid.")
	}

	#[tokio::test]
	async fn absent_slot_creates_then_reuses() {
		let manager = TokenManager::new();
		let calls = AtomicUsize::new(0);
		let counter = &calls;

		assert_eq!(manager.state_at(OffsetDateTime::now_utc()), TokenState::Absent);

		for _ in 0..3 {
			let token = manager
				.valid_token(move || async move {
					counter.fetch_add(1, Ordering::SeqCst);

					Ok(token("first", 7200, Duration::ZERO))
				})
				.await
				.expect("Token creation should succeed.");

			assert_eq!(token.access_token().expose(), "first");
		}

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(manager.metrics().creations(), 1);
		assert_eq!(manager.state_at(OffsetDateTime::now_utc()), TokenState::Valid);
	}

	#[tokio::test]
	async fn stale_token_is_replaced() {
		let manager = TokenManager::new();

		// 81 s into a 100 s lifetime.
		manager.replace(token("stale", 100, Duration::seconds(81)));

		assert_eq!(manager.state_at(OffsetDateTime::now_utc()), TokenState::NeedsRefresh);

		let refreshed = manager
			.valid_token(|| async { Ok(token("fresh", 100, Duration::ZERO)) })
			.await
			.expect("Refresh should succeed.");

		assert_eq!(refreshed.access_token().expose(), "fresh");
		assert_eq!(
			manager.current().map(|t| t.access_token().expose().to_owned()),
			Some("fresh".into())
		);
	}

	#[tokio::test]
	async fn creation_failure_leaves_slot_absent() {
		let manager = TokenManager::new();

		manager.replace(token("stale", 100, Duration::seconds(90)));

		let err = manager
			.valid_token(|| async { Err(Error::Api { code: 40001, msg: "bad appid".into() }) })
			.await
			.expect_err("Creation failure should propagate.");

		assert_eq!(err.api_code(), Some(40001));
		assert!(manager.current().is_none());
		assert_eq!(manager.metrics().failures(), 1);
	}

	#[tokio::test]
	async fn concurrent_callers_share_one_creation() {
		let manager = TokenManager::new();
		let calls = AtomicUsize::new(0);
		let counter = &calls;
		let create = move || async move {
			counter.fetch_add(1, Ordering::SeqCst);
			tokio::time::sleep(std::time::Duration::from_millis(20)).await;

			Ok(token("shared", 7200, Duration::ZERO))
		};
		let (first, second) =
			tokio::join!(manager.valid_token(create), manager.valid_token(create));

		assert_eq!(first.expect("First caller should succeed.").access_token().expose(), "shared");
		assert_eq!(second.expect("Second caller should succeed.").access_token().expose(), "shared");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn invalidate_only_clears_matching_token() {
		let manager = TokenManager::new();
		let current = token("current", 7200, Duration::ZERO);

		manager.replace(current.clone());

		assert!(!manager.invalidate(&token("older", 7200, Duration::minutes(5))));
		assert!(manager.current().is_some());
		assert!(manager.invalidate(&current));
		assert!(manager.current().is_none());
		assert_eq!(manager.metrics().invalidations(), 1);
	}

	#[test]
	fn invalidate_keeps_reissued_token_with_same_value() {
		let manager = TokenManager::new();
		let stale = token("reissued", 7200, Duration::minutes(30));
		let reissued = token("reissued", 7200, Duration::ZERO);

		assert_eq!(stale.access_token(), reissued.access_token());

		manager.replace(reissued.clone());

		assert!(!manager.invalidate(&stale));
		assert_eq!(manager.current(), Some(reissued));
		assert_eq!(manager.metrics().invalidations(), 0);
	}
}
