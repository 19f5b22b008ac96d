//! Token endpoint wire types.

// self
use crate::{
	_prelude::*,
	api::{ApiRequest, BusinessParams, Endpoint, FormParams},
};

/// Grant type the platform expects for client-credential token creation.
pub const CLIENT_CREDENTIAL_GRANT: &str = "client_credential";

/// `POST /token/create` request; unauthenticated but signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTokenRequest {
	/// Wire field `grant_type`.
	pub grant_type: String,
}
impl Default for CreateTokenRequest {
	fn default() -> Self {
		Self { grant_type: CLIENT_CREDENTIAL_GRANT.into() }
	}
}
impl ApiRequest for CreateTokenRequest {
	fn wire_params(&self) -> Result<BusinessParams> {
		Ok(FormParams::new().field("grant_type", &self.grant_type).build())
	}
}
impl Endpoint for CreateTokenRequest {
	type Output = TokenResponse;

	const PATH: &'static str = "/token/create";
	const REQUIRES_AUTH: bool = false;
}

/// Payload of a successful token creation.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
	/// Access token value; callers must avoid logging it.
	pub access_token: String,
	/// Declared lifetime in seconds.
	pub expires_in: i64,
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenResponse")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn create_token_request_sends_client_credential_grant() {
		let params = CreateTokenRequest::default().wire_params().expect("Form params build.");

		assert_eq!(params.encode_body(), "grant_type=client_credential");
	}

	#[test]
	fn token_response_debug_redacts_access_token() {
		let response: TokenResponse =
			serde_json::from_str(r#"{"access_token":"abc123","expires_in":7200}"#)
				.expect("Token payload should decode.");

		assert_eq!(response.expires_in, 7200);
		assert!(!format!("{response:?}").contains("abc123"));
	}
}
