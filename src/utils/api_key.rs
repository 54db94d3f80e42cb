//! API key generation and hashing.
//!
//! Keys are shown to their owner once and only their HMAC-SHA256 (keyed by the
//! server signing secret) is stored. Someone with read access to the
//! database cannot verify or forge keys without the secret.

use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generates a random alphanumeric API key of `length` characters.
///
/// # Examples
///
/// ```ignore
/// let key = generate_api_key(32);
/// assert_eq!(key.len(), 32);
/// ```
pub fn generate_api_key(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Hashes a raw API key with HMAC-SHA256.
///
/// Returns a 64-character lowercase hex-encoded MAC.
pub fn hash_api_key(signing_secret: &str, key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(signing_secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(key.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
