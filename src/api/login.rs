//! SSO login endpoints.
//!
//! Logging an employee in is a two-step affair: exchange the employee's mobile number for a
//! one-time auth code (a signed, authenticated call), then send the employee's browser to a
//! locally built, signed login URL carrying that code.

// self
use crate::{
	_prelude::*,
	api::{ApiRequest, BusinessParams, Endpoint, FormParams},
	client::OpenClient,
	http::OpenApiHttpClient,
};

/// Path of the browser-facing SSO login page.
pub const SSO_LOGIN_PATH: &str = "/sso/employee/login";

/// `POST /sso/employee/getAuthCodeByMobile` request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetAuthCodeByMobileRequest {
	/// Wire field `mobile`.
	pub mobile: String,
}
impl GetAuthCodeByMobileRequest {
	/// Creates a request for the given mobile number.
	pub fn new(mobile: impl Into<String>) -> Self {
		Self { mobile: mobile.into() }
	}
}
impl ApiRequest for GetAuthCodeByMobileRequest {
	fn wire_params(&self) -> Result<BusinessParams> {
		Ok(FormParams::new().field("mobile", &self.mobile).build())
	}
}
impl Endpoint for GetAuthCodeByMobileRequest {
	type Output = String;

	const PATH: &'static str = "/sso/employee/getAuthCodeByMobile";
	const REQUIRES_AUTH: bool = true;
}

/// Parameters of the SSO login URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SsoLoginRequest {
	/// Wire field `auth_code`, obtained from [`LoginApi::auth_code_by_mobile`].
	pub auth_code: String,
	/// Wire field `redirect_url`; where the platform sends the browser after login.
	pub redirect_url: String,
}
impl ApiRequest for SsoLoginRequest {
	fn wire_params(&self) -> Result<BusinessParams> {
		Ok(FormParams::new()
			.field("auth_code", &self.auth_code)
			.field("redirect_url", &self.redirect_url)
			.build())
	}
}

/// SSO login endpoints bound to a client.
#[derive(Debug)]
pub struct LoginApi<'a, C>
where
	C: ?Sized + OpenApiHttpClient,
{
	client: &'a OpenClient<C>,
}
impl<'a, C> LoginApi<'a, C>
where
	C: ?Sized + OpenApiHttpClient,
{
	pub(crate) fn new(client: &'a OpenClient<C>) -> Self {
		Self { client }
	}

	/// Exchanges an employee's mobile number for a one-time SSO auth code.
	pub async fn auth_code_by_mobile(&self, request: &GetAuthCodeByMobileRequest) -> Result<String> {
		self.client.send(request).await
	}

	/// Builds the signed login URL for `request` without contacting the platform.
	pub fn login_url(&self, request: &SsoLoginRequest) -> Result<Url> {
		self.client.signed_url(SSO_LOGIN_PATH, request)
	}
}
