//! Demonstrates the SSO login handshake against a mock platform: the client creates an access
//! token on first use, exchanges a mobile number for an auth code, and signs the browser login
//! URL locally.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use guanaitong_open_sdk::{
	api::{GetAuthCodeByMobileRequest, SsoLoginRequest},
	client::OpenClient,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token/create");
			then.status(200).header("content-type", "application/json").body(
				"{\"code\":0,\"msg\":\"ok\",\"data\":{\"access_token\":\"demo-access\",\"expires_in\":7200}}",
			);
		})
		.await;
	let auth_code_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/sso/employee/getAuthCodeByMobile")
				.query_param("access_token", "demo-access")
				.body_includes("mobile=17762200002");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"msg\":\"ok\",\"data\":\"demo-auth-code\"}");
		})
		.await;
	let client = OpenClient::builder("demo-app", "demo-secret")
		.base_url(Url::parse(&server.url("/"))?)
		.build()?;
	let auth_code =
		client.login().auth_code_by_mobile(&GetAuthCodeByMobileRequest::new("17762200002")).await?;
	let login_url = client.login().login_url(&SsoLoginRequest {
		auth_code,
		redirect_url: "https://portal.example.com/home".into(),
	})?;

	println!("Send the browser to: {login_url}.");

	token_mock.assert_async().await;
	auth_code_mock.assert_async().await;

	Ok(())
}
