//! Helper functions shared by the services, the HTTP layer and the admin CLI.
//!
//! - [`api_key`] - API key generation and HMAC hashing
//! - [`ending`] - Link ending validation
//! - [`client_addr`] - Caller address extraction from requests

pub mod api_key;
pub mod client_addr;
pub mod ending;
