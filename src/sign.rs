//! Request signing.
//!
//! Every platform call carries a `sign` query parameter computed over the app secret, the
//! common parameters, and the business parameters. The platform recomputes it server-side,
//! so the canonical form must be reproduced exactly: `key=value` entries sorted by the whole
//! entry string, joined with `&`, hashed with SHA-1, hex-encoded.

// crates.io
use sha1::{Digest, Sha1};
// self
use crate::{_prelude::*, api::BusinessParams};

/// Name-to-value map used for common and form business parameters.
pub type ParamMap = BTreeMap<String, String>;

/// Query parameter carrying the signature; never part of the signed payload.
pub const SIGN_KEY: &str = "sign";
/// Synthetic parameter holding the app secret during signing; never sent over the wire.
pub const APP_SECRET_KEY: &str = "appsecret";

/// Computes request signatures.
///
/// The default implementation is [`Sha1Signer`]; the trait exists so callers can substitute
/// a fixed signer in tests or wrap the computation with their own instrumentation.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Signs `common` + `business` with `app_secret`.
	fn sign(&self, app_secret: &str, common: &ParamMap, business: &BusinessParams) -> String;
}

/// Platform signing scheme: sorted `key=value` entries, SHA-1, lower-case hex.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha1Signer;
impl Sha1Signer {
	/// Returns the canonical string that gets hashed.
	pub fn canonical_string(
		app_secret: &str,
		common: &ParamMap,
		business: &BusinessParams,
	) -> String {
		let mut merged = BTreeMap::new();

		merged.insert(APP_SECRET_KEY, app_secret);

		for (key, value) in common {
			merged.insert(key.as_str(), value.as_str());
		}
		for (key, value) in business.signing_entries() {
			merged.insert(key, value);
		}

		let mut entries = merged
			.into_iter()
			.filter(|(key, _)| *key != SIGN_KEY)
			.map(|(key, value)| format!("{key}={value}"))
			.collect::<Vec<_>>();

		// Sorting by the whole entry differs from key order when one key prefixes another.
		entries.sort_unstable();

		entries.join("&")
	}
}
impl RequestSigner for Sha1Signer {
	fn sign(&self, app_secret: &str, common: &ParamMap, business: &BusinessParams) -> String {
		let canonical = Self::canonical_string(app_secret, common, business);

		hex::encode(Sha1::digest(canonical.as_bytes()))
	}
}
