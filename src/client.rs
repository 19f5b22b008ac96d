//! Open-platform client: credentials, transport, signer, and token slot in one place.
//!
//! [`OpenClient`] is `Send + Sync`; share one instance (behind `Arc` if needed) so every call
//! reuses the same cached access token.

mod executor;

pub use executor::EXPIRED_TOKEN_RETRIES;

// self
use crate::{
	_prelude::*,
	api::{EmployeeApi, LoginApi},
	auth::{Token, TokenManager},
	error::ConfigError,
	http::OpenApiHttpClient,
	sign::{RequestSigner, Sha1Signer},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Production endpoint of the open platform.
pub const PRODUCTION_BASE_URL: &str = "https://openapi.guanaitong.com";
/// Test endpoint of the open platform.
pub const TEST_BASE_URL: &str = "https://openapi.guanaitong.tech";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestOpenClient = OpenClient<ReqwestHttpClient>;

/// Deployment the client talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// `https://openapi.guanaitong.com`.
	Production,
	#[default]
	/// `https://openapi.guanaitong.tech`.
	Test,
}
impl Environment {
	/// Maps the "is production" flag onto an environment.
	pub const fn from_production_flag(is_prod: bool) -> Self {
		if is_prod { Self::Production } else { Self::Test }
	}

	/// Returns the environment's base URL.
	pub const fn base_url(self) -> &'static str {
		match self {
			Environment::Production => PRODUCTION_BASE_URL,
			Environment::Test => TEST_BASE_URL,
		}
	}
}

/// Client for a single application registered on the open platform.
pub struct OpenClient<C>
where
	C: ?Sized + OpenApiHttpClient,
{
	/// Base URL every endpoint path is joined onto.
	pub base_url: Url,
	/// Application identifier sent as `appid`.
	pub app_id: String,
	/// HTTP transport used for every outbound call.
	pub http_client: Arc<C>,
	/// Signature implementation.
	pub signer: Arc<dyn RequestSigner>,
	app_secret: String,
	tokens: TokenManager,
}
impl<C> OpenClient<C>
where
	C: ?Sized + OpenApiHttpClient,
{
	/// Employee management endpoints.
	pub fn employee(&self) -> EmployeeApi<'_, C> {
		EmployeeApi::new(self)
	}

	/// SSO login endpoints.
	pub fn login(&self) -> LoginApi<'_, C> {
		LoginApi::new(self)
	}

	/// Token slot backing authenticated calls.
	pub fn tokens(&self) -> &TokenManager {
		&self.tokens
	}

	/// Returns a valid access token, creating or refreshing it as needed.
	pub async fn token(&self) -> Result<Token> {
		self.tokens.valid_token(|| self.create_token()).await
	}

	/// Drops the cached token; the next authenticated call creates a new one.
	pub fn clear_token(&self) {
		self.tokens.clear();
	}
}
#[cfg(feature = "reqwest")]
impl OpenClient<ReqwestHttpClient> {
	/// Creates a builder for the provided application credentials.
	///
	/// Use [`OpenClientBuilder::build_with_http_client`] to plug in another transport.
	pub fn builder(app_id: impl Into<String>, app_secret: impl Into<String>) -> OpenClientBuilder {
		OpenClientBuilder::new(app_id, app_secret)
	}

	/// Creates a reqwest-backed client for the production (`is_prod`) or test platform.
	pub fn new(
		app_id: impl Into<String>,
		app_secret: impl Into<String>,
		is_prod: bool,
	) -> Result<Self> {
		OpenClientBuilder::new(app_id, app_secret).production(is_prod).build()
	}
}
impl<C> Debug for OpenClient<C>
where
	C: ?Sized + OpenApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OpenClient")
			.field("base_url", &self.base_url.as_str())
			.field("app_id", &self.app_id)
			.field("app_secret", &"<redacted>")
			.field("tokens", &self.tokens)
			.finish()
	}
}

/// Builder for [`OpenClient`] values.
pub struct OpenClientBuilder {
	app_id: String,
	app_secret: String,
	environment: Environment,
	base_url: Option<Url>,
	signer: Arc<dyn RequestSigner>,
}
impl OpenClientBuilder {
	/// Creates a builder targeting the test environment with the SHA-1 signer.
	pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
		Self {
			app_id: app_id.into(),
			app_secret: app_secret.into(),
			environment: Environment::default(),
			base_url: None,
			signer: Arc::new(Sha1Signer),
		}
	}

	/// Selects the deployment.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = environment;

		self
	}

	/// Selects production when `is_prod` is true, the test platform otherwise.
	pub fn production(self, is_prod: bool) -> Self {
		self.environment(Environment::from_production_flag(is_prod))
	}

	/// Overrides the environment's base URL (gateways, mock servers).
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Replaces the signer.
	pub fn signer(mut self, signer: impl 'static + RequestSigner) -> Self {
		self.signer = Arc::new(signer);

		self
	}

	/// Builds a client that sends requests through `http_client`.
	pub fn build_with_http_client<C>(self, http_client: impl Into<Arc<C>>) -> Result<OpenClient<C>>
	where
		C: ?Sized + OpenApiHttpClient,
	{
		if self.app_id.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "app_id" }.into());
		}
		if self.app_secret.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "app_secret" }.into());
		}

		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(self.environment.base_url())
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};

		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(ConfigError::UnsupportedBaseUrl { url: base_url.to_string() }.into());
		}

		Ok(OpenClient {
			base_url,
			app_id: self.app_id,
			http_client: http_client.into(),
			signer: self.signer,
			app_secret: self.app_secret,
			tokens: TokenManager::new(),
		})
	}

	#[cfg(feature = "reqwest")]
	/// Builds a client backed by a default reqwest transport.
	pub fn build(self) -> Result<ReqwestOpenClient> {
		self.build_with_http_client(ReqwestHttpClient::default())
	}
}
impl Debug for OpenClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OpenClientBuilder")
			.field("app_id", &self.app_id)
			.field("app_secret_set", &!self.app_secret.is_empty())
			.field("environment", &self.environment)
			.field("base_url", &self.base_url.as_ref().map(Url::as_str))
			.finish()
	}
}
