// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used around platform calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the endpoint path + stage.
	pub fn new(path: &str, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("guanaitong_open_sdk.call", path, stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (path, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Notes that `path` is being retried after the platform rejected its access token.
pub fn warn_token_expired(path: &str, retries_left: u8) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(path, retries_left, "access token rejected as expired; recreating it");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (path, retries_left);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new("/token/create", "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn warn_token_expired_is_callable_without_subscriber() {
		warn_token_expired("/employee/add", 1);
	}
}
