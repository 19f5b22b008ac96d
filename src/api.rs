//! Wire contracts of the open platform: request parameter mapping, the response envelope,
//! and the typed endpoint groups.

pub mod employee;
pub mod login;
pub mod token;

pub use employee::*;
pub use login::*;
pub use token::*;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::ContentType,
	sign::ParamMap,
};

/// Envelope code signalling success.
pub const SUCCESS_CODE: i64 = 0;
/// Envelope code the platform uses when the access token is no longer valid server-side.
pub const TOKEN_EXPIRED_CODE: i64 = 1_000_210_004;
/// Synthetic business key that carries a whole JSON body during signing.
pub const JSON_BODY_KEY: &str = "_body";

/// Converts a typed request into the business parameters sent on the wire.
pub trait ApiRequest
where
	Self: Send + Sync,
{
	/// Returns the request's business parameters.
	///
	/// Form requests list one entry per wire field; JSON requests serialize themselves with
	/// [`BusinessParams::json`].
	fn wire_params(&self) -> Result<BusinessParams>;
}

/// Typed endpoint description: where a request goes and what comes back.
pub trait Endpoint
where
	Self: ApiRequest,
{
	/// Path relative to the client's base URL.
	const PATH: &'static str;
	/// Whether the call must carry an `access_token`.
	const REQUIRES_AUTH: bool;

	/// Payload decoded from the envelope's `data` field.
	type Output: 'static + DeserializeOwned + Send;
}

/// Endpoint-specific parameters of a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusinessParams {
	/// Form fields, sent as a URL-encoded body and signed individually.
	Form(ParamMap),
	/// Serialized JSON body, sent raw and signed as the single [`JSON_BODY_KEY`] entry.
	Json(String),
}
impl BusinessParams {
	/// Serializes `value` into a JSON body.
	pub fn json<T>(value: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		serde_json::to_string(value)
			.map(Self::Json)
			.map_err(|source| ConfigError::EncodeRequest { source }.into())
	}

	/// Returns `true` for form-encoded parameters.
	pub fn is_form(&self) -> bool {
		matches!(self, Self::Form(_))
	}

	/// Returns the body encoding these parameters are sent with.
	pub fn content_type(&self) -> ContentType {
		match self {
			Self::Form(_) => ContentType::Form,
			Self::Json(_) => ContentType::Json,
		}
	}

	/// Encodes the HTTP body.
	pub fn encode_body(&self) -> String {
		match self {
			Self::Form(fields) => encode_query(fields),
			Self::Json(body) => body.clone(),
		}
	}

	/// Entries that take part in the signature.
	pub fn signing_entries(&self) -> Vec<(&str, &str)> {
		match self {
			Self::Form(fields) => fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect(),
			Self::Json(body) => vec![(JSON_BODY_KEY, body.as_str())],
		}
	}
}

/// Prebuilt parameters are themselves a request, for endpoints without a typed wrapper.
impl ApiRequest for BusinessParams {
	fn wire_params(&self) -> Result<BusinessParams> {
		Ok(self.clone())
	}
}

/// Builder for form-encoded [`BusinessParams`].
#[derive(Clone, Debug, Default)]
pub struct FormParams(ParamMap);
impl FormParams {
	/// Creates an empty field set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a field, rendering `value` with its [`Display`] form.
	pub fn field(mut self, name: &str, value: impl Display) -> Self {
		self.0.insert(name.to_owned(), value.to_string());

		self
	}

	/// Finishes the field set.
	pub fn build(self) -> BusinessParams {
		BusinessParams::Form(self.0)
	}
}

/// Uniform `{code, msg, data}` wrapper every platform response uses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
	/// `0` on success, [`TOKEN_EXPIRED_CODE`] for stale tokens, anything else is an error.
	pub code: i64,
	/// Human-readable status message.
	#[serde(default)]
	pub msg: String,
	/// Endpoint payload; `null` when absent.
	#[serde(default)]
	pub data: serde_json::Value,
}
impl ApiResponse {
	/// Decodes an envelope from a response body received from `path`.
	pub fn decode(path: &str, body: &[u8]) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { path: path.to_owned(), source })
	}

	/// Returns `true` when `code` is [`SUCCESS_CODE`].
	pub fn is_success(&self) -> bool {
		self.code == SUCCESS_CODE
	}

	/// Returns `true` when `code` is [`TOKEN_EXPIRED_CODE`].
	pub fn is_token_expired(&self) -> bool {
		self.code == TOKEN_EXPIRED_CODE
	}

	/// Yields the typed payload on success or an [`Error::Api`] carrying code and message.
	pub fn into_result<T>(self, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		if !self.is_success() {
			return Err(Error::Api { code: self.code, msg: self.msg });
		}

		serde_path_to_error::deserialize(self.data)
			.map_err(|source| Error::Decode { path: path.to_owned(), source })
	}
}

/// URL-encodes `params` as `key=value` pairs in key order.
pub(crate) fn encode_query(params: &ParamMap) -> String {
	url::form_urlencoded::Serializer::new(String::new()).extend_pairs(params).finish()
}
