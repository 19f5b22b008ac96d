//! Immutable access-token values and their refresh arithmetic.

// self
use crate::{_prelude::*, api::TokenResponse, auth::TokenSecret, error::ConfigError};

/// Lifecycle state of the client's token slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenState {
	/// No token has been created yet, or it was cleared.
	Absent,
	/// Token is usable as-is.
	Valid,
	/// More than 80% of the declared lifetime has elapsed; the next use recreates it.
	NeedsRefresh,
}

/// Access token issued by `/token/create`.
///
/// Tokens are never mutated; a refresh replaces the whole value. Every constructor,
/// deserialization included, goes through [`Token::new`], so `expires_at` always equals
/// `created_at + expires_in` seconds.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TokenParts")]
pub struct Token {
	access_token: TokenSecret,
	expires_in: i64,
	created_at: OffsetDateTime,
	expires_at: OffsetDateTime,
}
impl Token {
	/// Share of the declared lifetime, in permille, after which a token is refreshed.
	pub const REFRESH_PERMILLE: i64 = 800;

	/// Builds a token created at `created_at` that lives for `expires_in` seconds.
	pub fn new(
		access_token: impl Into<String>,
		expires_in: i64,
		created_at: OffsetDateTime,
	) -> Result<Self, ConfigError> {
		if expires_in <= 0 {
			return Err(ConfigError::NonPositiveExpiresIn { expires_in });
		}

		let lifetime_ms = expires_in.checked_mul(1_000).ok_or(ConfigError::ExpiresInOutOfRange)?;
		let expires_at = created_at
			.checked_add(Duration::milliseconds(lifetime_ms))
			.ok_or(ConfigError::ExpiresInOutOfRange)?;

		Ok(Self { access_token: TokenSecret::new(access_token), expires_in, created_at, expires_at })
	}

	/// Builds a token from a token endpoint payload received at `created_at`.
	pub fn from_response(
		response: TokenResponse,
		created_at: OffsetDateTime,
	) -> Result<Self, ConfigError> {
		Self::new(response.access_token, response.expires_in, created_at)
	}

	/// Access token secret; callers must avoid logging it.
	pub fn access_token(&self) -> &TokenSecret {
		&self.access_token
	}

	/// Declared lifetime in seconds.
	pub fn expires_in(&self) -> i64 {
		self.expires_in
	}

	/// Instant the token was received.
	pub fn created_at(&self) -> OffsetDateTime {
		self.created_at
	}

	/// `created_at + expires_in` seconds.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.expires_at
	}

	/// Elapsed time after which [`Token::needs_refresh_at`] turns true.
	pub fn refresh_threshold(&self) -> Duration {
		Duration::milliseconds(self.expires_in.saturating_mul(Self::REFRESH_PERMILLE))
	}

	/// Returns `true` once more than 80% of the lifetime has elapsed at `now`.
	pub fn needs_refresh_at(&self, now: OffsetDateTime) -> bool {
		now - self.created_at > self.refresh_threshold()
	}

	/// Convenience helper that checks [`Token::needs_refresh_at`] against the current clock.
	pub fn needs_refresh(&self) -> bool {
		self.needs_refresh_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if the token is past its expiry at `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now >= self.expires_at
	}

	/// Convenience helper that checks [`Token::is_expired_at`] against the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Computes the slot state this token implies at `now`.
	pub fn state_at(&self, now: OffsetDateTime) -> TokenState {
		if self.needs_refresh_at(now) { TokenState::NeedsRefresh } else { TokenState::Valid }
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.field("created_at", &self.created_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Serialized form of a [`Token`]; `expires_at` is recomputed rather than trusted.
#[derive(Deserialize)]
struct TokenParts {
	access_token: TokenSecret,
	expires_in: i64,
	created_at: OffsetDateTime,
}
impl TryFrom<TokenParts> for Token {
	type Error = ConfigError;

	fn try_from(parts: TokenParts) -> Result<Self, Self::Error> {
		Self::new(parts.access_token.expose(), parts.expires_in, parts.created_at)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn expiry_is_created_plus_lifetime() {
		let created = macros::datetime!(2025-01-01 00:00 UTC);
		let token = Token::new("tok", 7200, created).expect("Token fixture should be valid.");

		assert_eq!(token.expires_at(), macros::datetime!(2025-01-01 02:00 UTC));
		assert_eq!(token.expires_at() - token.created_at(), Duration::milliseconds(7_200_000));
	}

	#[test]
	fn refresh_threshold_is_eighty_percent_of_lifetime() {
		let created = macros::datetime!(2025-01-01 00:00 UTC);
		let token = Token::new("tok", 100, created).expect("Token fixture should be valid.");

		// 0.8 * 100 s = 80 s.
		assert!(!token.needs_refresh_at(created));
		assert!(!token.needs_refresh_at(created + Duration::milliseconds(79_999)));
		assert!(!token.needs_refresh_at(created + Duration::seconds(80)));
		assert!(token.needs_refresh_at(created + Duration::milliseconds(80_001)));
		assert_eq!(token.state_at(created + Duration::seconds(10)), TokenState::Valid);
		assert_eq!(token.state_at(created + Duration::seconds(81)), TokenState::NeedsRefresh);
	}

	#[test]
	fn expiry_check_uses_absolute_deadline() {
		let created = macros::datetime!(2025-01-01 00:00 UTC);
		let token = Token::new("tok", 60, created).expect("Token fixture should be valid.");

		assert!(!token.is_expired_at(created + Duration::seconds(59)));
		assert!(token.is_expired_at(created + Duration::seconds(60)));
	}

	#[test]
	fn fresh_token_is_not_due_for_refresh() {
		let token = Token::new("tok", 7200, OffsetDateTime::now_utc())
			.expect("Token fixture should be valid.");

		assert!(!token.needs_refresh());
		assert!(!token.is_expired());
	}

	#[test]
	fn rejects_unusable_lifetimes() {
		let now = OffsetDateTime::now_utc();

		assert!(matches!(
			Token::new("tok", 0, now),
			Err(ConfigError::NonPositiveExpiresIn { expires_in: 0 })
		));
		assert!(matches!(Token::new("tok", i64::MAX, now), Err(ConfigError::ExpiresInOutOfRange)));
	}

	#[test]
	fn deserialization_revalidates_lifetime() {
		let created = macros::datetime!(2025-01-01 00:00 UTC);
		let token = Token::new("tok", 100, created).expect("Token fixture should be valid.");
		let mut value = serde_json::to_value(&token).expect("Token should serialize.");

		value["expires_at"] = value["created_at"].clone();

		let restored: Token = serde_json::from_value(value).expect("Token should deserialize.");

		assert_eq!(restored, token);
		assert_eq!(restored.expires_at(), macros::datetime!(2025-01-01 00:01:40 UTC));

		let mut value = serde_json::to_value(&token).expect("Token should serialize.");

		value["expires_in"] = serde_json::json!(20_000_000_000_000_000_i64);

		assert!(serde_json::from_value::<Token>(value).is_err());
	}

	#[test]
	fn refresh_threshold_saturates_instead_of_overflowing() {
		let token = Token {
			access_token: TokenSecret::new("tok"),
			expires_in: i64::MAX,
			created_at: OffsetDateTime::now_utc(),
			expires_at: OffsetDateTime::now_utc(),
		};

		assert!(!token.needs_refresh());
	}
}
