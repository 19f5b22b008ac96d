//! Transport primitives for open-platform calls.
//!
//! The module exposes [`OpenApiHttpClient`] alongside the crate-owned [`HttpRequest`] and
//! [`HttpResponse`] values so downstream crates (and tests) can plug in custom HTTP stacks.
//! Every platform call is a single `POST`; the executor owns signing, status checks and
//! envelope decoding, so transports only move bytes.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::_prelude::*;

/// Boxed future returned by [`OpenApiHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of posting signed platform requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by
/// every call an [`OpenClient`](crate::client::OpenClient) makes, and the returned future
/// must be `Send` so client futures can hop executors.
pub trait OpenApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` as an HTTP `POST` and returns the raw response.
	///
	/// Non-2xx statuses must be returned as responses, not errors; the executor classifies
	/// them.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Body encoding of a platform request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
	/// `application/x-www-form-urlencoded`.
	Form,
	/// `application/json`.
	Json,
}
impl ContentType {
	/// Returns the MIME type sent in the `Content-Type` header.
	pub const fn as_str(self) -> &'static str {
		match self {
			ContentType::Form => "application/x-www-form-urlencoded",
			ContentType::Json => "application/json",
		}
	}
}
impl Display for ContentType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully signed `POST` request ready for dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Endpoint URL including the signed common parameters as its query string.
	pub url: Url,
	/// Body encoding.
	pub content_type: ContentType,
	/// Encoded body; empty when the request carries no business parameters.
	pub body: String,
}

/// Raw HTTP response handed back to the executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Builds a response from a status code and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`], e.g. one configured with a timeout.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl OpenApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.post(request.url)
				.header(CONTENT_TYPE, request.content_type.as_str())
				.body(request.body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok::<_, ReqwestError>(HttpResponse { status, body })
		})
	}
}
