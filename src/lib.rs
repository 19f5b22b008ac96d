//! Async client SDK for the Guanaitong open platform: signed requests, self-refreshing
//! client-credential tokens, and typed employee/SSO endpoints in one crate.
//!
//! Every call goes through [`client::OpenClient`], which attaches the common parameters
//! (`appid`, `timestamp`, `access_token`), signs them together with the business parameters,
//! and unwraps the platform's `{code, msg, data}` envelope. Access tokens are created on first
//! use, refreshed once 80% of their lifetime has elapsed, and recreated (with a single retry)
//! when the platform reports them expired.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod obs;
pub mod sign;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
