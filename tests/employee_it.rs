// crates.io
use httpmock::prelude::*;
// self
use guanaitong_open_sdk::{
	api::{BusinessParams, EmployeeAddRequest},
	client::{OpenClient, ReqwestOpenClient},
	error::Error,
	url::Url,
};

const TOKEN_BODY: &str =
	"{\"code\":0,\"msg\":\"ok\",\"data\":{\"access_token\":\"employee-token\",\"expires_in\":7200}}";

fn build_client(server: &MockServer) -> ReqwestOpenClient {
	OpenClient::builder("app-employee", "secret-employee")
		.base_url(
			Url::parse(&server.url("/openapi/")).expect("Mock base URL should parse successfully."),
		)
		.build()
		.expect("Client should build against the mock server.")
}

fn employee() -> EmployeeAddRequest {
	EmployeeAddRequest {
		enterprise_code: "ENT-001".into(),
		user_id: "u-1001".into(),
		name: "Zhang San".into(),
		gender: 1,
		mobile_area: "86".into(),
		mobile: "17762200002".into(),
		send_invite: 1,
		dept_code: "D-42".into(),
		..Default::default()
	}
}

#[tokio::test]
async fn add_employee_posts_all_form_fields() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/openapi/token/create");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let add_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/openapi/employee/add")
				.header("content-type", "application/x-www-form-urlencoded")
				.query_param("access_token", "employee-token")
				.body_includes("enterpriseCode=ENT-001")
				.body_includes("name=Zhang+San")
				.body_includes("sendInvite=1")
				.body_includes("deptCode=D-42")
				.body_includes("remark=&")
				.body_includes("password=");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"msg\":\"ok\",\"data\":\"u-1001\"}");
		})
		.await;
	let client = build_client(&server);
	let echoed = client.employee().add(&employee()).await.expect("Employee add should succeed.");

	assert_eq!(echoed, "u-1001");

	token_mock.assert_calls_async(1).await;
	add_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn business_error_carries_platform_code_and_message() {
	let server = MockServer::start_async().await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/openapi/token/create");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let add_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/openapi/employee/add");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":1000320001,\"msg\":\"employee already exists\",\"data\":null}");
		})
		.await;
	let client = build_client(&server);
	let err = client.employee().add(&employee()).await.expect_err("Duplicate should be rejected.");

	match err {
		Error::Api { code, msg } => {
			assert_eq!(code, 1_000_320_001);
			assert_eq!(msg, "employee already exists");
		},
		other => panic!("Unexpected error: {other:?}."),
	}

	add_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn untyped_json_endpoint_sends_raw_body() {
	let server = MockServer::start_async().await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/openapi/token/create");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let sync_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/openapi/department/sync")
				.header("content-type", "application/json")
				.body("{\"deptCode\":\"D-42\",\"name\":\"Platform\"}");
			then.status(200).header("content-type", "application/json").body("{\"code\":0}");
		})
		.await;
	let client = build_client(&server);
	let body = BusinessParams::json(&serde_json::json!({ "deptCode": "D-42", "name": "Platform" }))
		.expect("JSON body should serialize.");

	client
		.execute::<(), _>(true, "/department/sync", &body)
		.await
		.expect("JSON call should succeed.");

	sync_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn malformed_response_reports_decode_error() {
	let server = MockServer::start_async().await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/openapi/token/create");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let _add_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/openapi/employee/add");
			then.status(200).header("content-type", "text/html").body("<html>maintenance</html>");
		})
		.await;
	let client = build_client(&server);
	let err = client.employee().add(&employee()).await.expect_err("HTML should not decode.");

	assert!(matches!(err, Error::Decode { ref path, .. } if path == "/employee/add"));
}
