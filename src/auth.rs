//! Access-token model and lifecycle management.

pub mod manager;
pub mod secret;
pub mod token;

pub use manager::*;
pub use secret::*;
pub use token::*;
