//! SDK-level error types shared across the executor, token manager, and transports.

// self
use crate::_prelude::*;

/// SDK-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical SDK error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-encoding problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) or a non-2xx HTTP status.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Response envelope or payload could not be decoded.
	#[error("Response from `{path}` is not valid JSON for the expected shape.")]
	Decode {
		/// Endpoint path whose response failed to decode.
		path: String,
		/// Structured parsing failure, including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Platform answered with a nonzero envelope code.
	#[error("Open platform returned code {code}: {msg}.")]
	Api {
		/// Envelope `code` field.
		code: i64,
		/// Envelope `msg` field.
		msg: String,
	},
	/// Access token could not be created; fatal to the call that needed it.
	#[error("Access token creation failed.")]
	TokenCreate {
		/// Failure reported by the token endpoint call.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	/// Returns the platform code carried by [`Error::Api`], looking through token-creation
	/// wrappers.
	pub fn api_code(&self) -> Option<i64> {
		match self {
			Self::Api { code, .. } => Some(*code),
			Self::TokenCreate { source } => source.api_code(),
			_ => None,
		}
	}

	/// Returns `true` if the platform reported the access token as expired.
	pub fn is_token_expired(&self) -> bool {
		self.api_code() == Some(crate::api::TOKEN_EXPIRED_CODE)
	}

	pub(crate) fn token_create(source: Error) -> Self {
		Self::TokenCreate { source: Box::new(source) }
	}
}

/// Configuration and validation failures raised by the SDK.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A required credential was empty.
	#[error("The {field} credential must not be empty.")]
	MissingCredential {
		/// Name of the empty credential.
		field: &'static str,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL parses but cannot address API endpoints.
	#[error("Base URL must be an http(s) URL that accepts path segments: {url}.")]
	UnsupportedBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// Request object could not be serialized into a JSON body.
	#[error("Request body could not be serialized.")]
	EncodeRequest {
		/// Serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Signed URLs carry their parameters in the query string, so they accept form fields only.
	#[error("Signed URL for `{path}` requires form parameters.")]
	UrlRequiresForm {
		/// Endpoint path of the URL.
		path: String,
	},
	/// A business field reuses the name of a common signed parameter.
	#[error("Business parameter `{key}` collides with a common signed parameter.")]
	ReservedParam {
		/// Colliding parameter name.
		key: String,
	},
	/// Token endpoint returned a non-positive lifetime.
	#[error("The expires_in value must be positive, got {expires_in}.")]
	NonPositiveExpiresIn {
		/// Lifetime reported by the platform.
		expires_in: i64,
	},
	/// Token endpoint returned a lifetime the clock cannot represent.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, HTTP status). Never retried by the SDK.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{path}`.")]
	Network {
		/// Endpoint path being called.
		path: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Platform answered with a non-2xx HTTP status.
	#[error("Request to `{path}` failed with HTTP status {status}.")]
	Status {
		/// Endpoint path being called.
		path: String,
		/// HTTP status code.
		status: u16,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		path: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { path: path.into(), source: Box::new(src) }
	}
}
