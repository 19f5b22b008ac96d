//! Employee management endpoints.

// self
use crate::{
	_prelude::*,
	api::{ApiRequest, BusinessParams, Endpoint, FormParams},
	client::OpenClient,
	http::OpenApiHttpClient,
};

/// `POST /employee/add` request.
///
/// Every field is sent, including empty strings and zeroes, because the platform signs the
/// exact set of fields it receives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeAddRequest {
	/// Wire field `enterpriseCode`.
	pub enterprise_code: String,
	/// Wire field `userId`; the caller's own employee identifier.
	pub user_id: String,
	/// Wire field `name`.
	pub name: String,
	/// Wire field `code`; employee number.
	pub code: String,
	/// Wire field `gender`.
	pub gender: i32,
	/// Wire field `email`.
	pub email: String,
	/// Wire field `mobileArea`; dialing prefix.
	pub mobile_area: String,
	/// Wire field `mobile`.
	pub mobile: String,
	/// Wire field `sendInvite`; `1` sends an invitation message.
	pub send_invite: i32,
	/// Wire field `remark`.
	pub remark: String,
	/// Wire field `deptCode`.
	pub dept_code: String,
	/// Wire field `level`.
	pub level: String,
	/// Wire field `birthDay`.
	pub birth_day: String,
	/// Wire field `entryDay`.
	pub entry_day: String,
	/// Wire field `cardType`.
	pub card_type: i32,
	/// Wire field `cardNo`.
	pub card_no: String,
	/// Wire field `allowSimplePwd`.
	pub allow_simple_pwd: i32,
	/// Wire field `password`.
	pub password: String,
}
impl ApiRequest for EmployeeAddRequest {
	fn wire_params(&self) -> Result<BusinessParams> {
		Ok(FormParams::new()
			.field("enterpriseCode", &self.enterprise_code)
			.field("userId", &self.user_id)
			.field("name", &self.name)
			.field("code", &self.code)
			.field("gender", self.gender)
			.field("email", &self.email)
			.field("mobileArea", &self.mobile_area)
			.field("mobile", &self.mobile)
			.field("sendInvite", self.send_invite)
			.field("remark", &self.remark)
			.field("deptCode", &self.dept_code)
			.field("level", &self.level)
			.field("birthDay", &self.birth_day)
			.field("entryDay", &self.entry_day)
			.field("cardType", self.card_type)
			.field("cardNo", &self.card_no)
			.field("allowSimplePwd", self.allow_simple_pwd)
			.field("password", &self.password)
			.build())
	}
}
impl Endpoint for EmployeeAddRequest {
	type Output = String;

	const PATH: &'static str = "/employee/add";
	const REQUIRES_AUTH: bool = true;
}

/// Employee endpoints bound to a client.
#[derive(Debug)]
pub struct EmployeeApi<'a, C>
where
	C: ?Sized + OpenApiHttpClient,
{
	client: &'a OpenClient<C>,
}
impl<'a, C> EmployeeApi<'a, C>
where
	C: ?Sized + OpenApiHttpClient,
{
	pub(crate) fn new(client: &'a OpenClient<C>) -> Self {
		Self { client }
	}

	/// Adds an employee and returns the payload the platform echoes back.
	pub async fn add(&self, request: &EmployeeAddRequest) -> Result<String> {
		self.client.send(request).await
	}
}
