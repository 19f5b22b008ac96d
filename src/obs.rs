//! Optional observability helpers for platform calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `guanaitong_open_sdk.call` with the `path`
//!   (endpoint) and `stage` (call site) fields, plus a warning whenever an expired token forces
//!   a retry.
//! - Enable `metrics` to increment the `guanaitong_open_sdk_call_total` counter for every
//!   attempt/success/failure/token-expiry, labeled by `path` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to the executor.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Platform reported the access token expired.
	TokenExpired,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
			CallOutcome::TokenExpired => "token_expired",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
