//! Request execution: common parameters, signing, dispatch, envelope decoding, and the
//! bounded expired-token retry.
//!
//! An authenticated call whose envelope carries the expired-token code drops the token it
//! used, obtains a new one, and is sent again at most [`EXPIRED_TOKEN_RETRIES`] times. The
//! retry is a loop with an explicit budget, so a platform that keeps rejecting tokens
//! surfaces the error instead of recursing.

// self
use crate::{
	_prelude::*,
	api::{
		self, ApiRequest, ApiResponse, BusinessParams, CreateTokenRequest, Endpoint, TokenResponse,
	},
	auth::{Token, TokenSecret},
	client::OpenClient,
	error::{ConfigError, TransportError},
	http::{HttpRequest, OpenApiHttpClient},
	obs::{self, CallOutcome, CallSpan},
	sign::{APP_SECRET_KEY, ParamMap, SIGN_KEY},
};

/// Extra attempts an authenticated call gets after the platform reports its token expired.
pub const EXPIRED_TOKEN_RETRIES: u8 = 1;

const APP_ID_KEY: &str = "appid";
const TIMESTAMP_KEY: &str = "timestamp";
const ACCESS_TOKEN_KEY: &str = "access_token";
const RESERVED_KEYS: [&str; 5] =
	[APP_ID_KEY, TIMESTAMP_KEY, ACCESS_TOKEN_KEY, SIGN_KEY, APP_SECRET_KEY];

impl<C> OpenClient<C>
where
	C: ?Sized + OpenApiHttpClient,
{
	/// Calls a typed endpoint.
	pub async fn send<E>(&self, request: &E) -> Result<E::Output>
	where
		E: Endpoint,
	{
		self.execute(E::REQUIRES_AUTH, E::PATH, request).await
	}

	/// Signs and posts `request` to `path`, decoding the envelope payload as `T`.
	///
	/// When `auth` is set the call carries a valid access token and gets one retry with a fresh
	/// token if the platform reports it expired.
	pub async fn execute<T, R>(&self, auth: bool, path: &str, request: &R) -> Result<T>
	where
		T: DeserializeOwned,
		R: ?Sized + ApiRequest,
	{
		let span = CallSpan::new(path, "execute");

		obs::record_call_outcome(path, CallOutcome::Attempt);

		let result = span.instrument(self.execute_with_retry(auth, path, request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(path, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(path, CallOutcome::Failure),
		}

		result
	}

	/// Builds the signed URL for a browser-facing page; nothing is sent.
	///
	/// The query carries `appid`, `timestamp`, the business parameters, and `sign`. Business
	/// parameters must be form fields whose names differ from the common ones, so the query
	/// holds exactly the entries the signature covers.
	pub fn signed_url<R>(&self, path: &str, request: &R) -> Result<Url>
	where
		R: ?Sized + ApiRequest,
	{
		let BusinessParams::Form(fields) = request.wire_params()? else {
			return Err(ConfigError::UrlRequiresForm { path: path.to_owned() }.into());
		};

		if let Some(key) = fields.keys().find(|key| RESERVED_KEYS.contains(&key.as_str())) {
			return Err(ConfigError::ReservedParam { key: key.clone() }.into());
		}

		let business = BusinessParams::Form(fields);
		let mut query =
			self.signed_common_params(&business, None, OffsetDateTime::now_utc().unix_timestamp());

		query.extend(
			business.signing_entries().into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())),
		);

		self.endpoint_url(path, &query)
	}

	/// Builds the signed HTTP request for `business` without sending it.
	pub fn build_request(
		&self,
		path: &str,
		business: &BusinessParams,
		access_token: Option<&TokenSecret>,
		timestamp: i64,
	) -> Result<HttpRequest> {
		let common = self.signed_common_params(business, access_token, timestamp);

		Ok(HttpRequest {
			url: self.endpoint_url(path, &common)?,
			content_type: business.content_type(),
			body: business.encode_body(),
		})
	}

	async fn execute_with_retry<T, R>(&self, auth: bool, path: &str, request: &R) -> Result<T>
	where
		T: DeserializeOwned,
		R: ?Sized + ApiRequest,
	{
		let business = request.wire_params()?;
		let mut retries_left = EXPIRED_TOKEN_RETRIES;

		loop {
			let token = if auth { Some(self.token().await?) } else { None };
			let envelope =
				self.dispatch(path, &business, token.as_ref().map(Token::access_token)).await?;

			match token {
				Some(token) if envelope.is_token_expired() && retries_left > 0 => {
					retries_left -= 1;

					obs::record_call_outcome(path, CallOutcome::TokenExpired);
					obs::warn_token_expired(path, retries_left);

					self.tokens.invalidate(&token);
				},
				_ => return envelope.into_result(path),
			}
		}
	}

	pub(super) async fn create_token(&self) -> Result<Token> {
		const PATH: &str = CreateTokenRequest::PATH;

		let span = CallSpan::new(PATH, "create_token");

		obs::record_call_outcome(PATH, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let business = CreateTokenRequest::default().wire_params()?;
				let response = self
					.dispatch(PATH, &business, None)
					.await?
					.into_result::<TokenResponse>(PATH)?;

				Ok::<_, Error>(Token::from_response(response, OffsetDateTime::now_utc())?)
			})
			.await
			.map_err(Error::token_create);

		match &result {
			Ok(_) => obs::record_call_outcome(PATH, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(PATH, CallOutcome::Failure),
		}

		result
	}

	/// Sends one signed request and decodes its envelope; no token handling, no retry.
	async fn dispatch(
		&self,
		path: &str,
		business: &BusinessParams,
		access_token: Option<&TokenSecret>,
	) -> Result<ApiResponse> {
		let request = self.build_request(
			path,
			business,
			access_token,
			OffsetDateTime::now_utc().unix_timestamp(),
		)?;
		let response = self
			.http_client
			.execute(request)
			.await
			.map_err(|err| TransportError::network(path, err))?;

		if !response.is_success() {
			return Err(TransportError::Status { path: path.to_owned(), status: response.status }
				.into());
		}

		ApiResponse::decode(path, &response.body)
	}

	fn signed_common_params(
		&self,
		business: &BusinessParams,
		access_token: Option<&TokenSecret>,
		timestamp: i64,
	) -> ParamMap {
		let mut common = ParamMap::new();

		common.insert(APP_ID_KEY.into(), self.app_id.clone());
		common.insert(TIMESTAMP_KEY.into(), timestamp.to_string());

		if let Some(token) = access_token {
			common.insert(ACCESS_TOKEN_KEY.into(), token.expose().to_owned());
		}

		let sign = self.signer.sign(&self.app_secret, &common, business);

		common.insert(SIGN_KEY.into(), sign);

		common
	}

	fn endpoint_url(&self, path: &str, query: &ParamMap) -> Result<Url> {
		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::UnsupportedBaseUrl { url: self.base_url.to_string() })?
			.pop_if_empty()
			.extend(path.split('/').filter(|segment| !segment.is_empty()));

		if !query.is_empty() {
			url.set_query(Some(&api::encode_query(query)));
		}

		Ok(url)
	}
}
