//! Random API key generation.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use rand::RngCore;

/// Key length used when none is given.
pub const DEFAULT_KEY_BYTES: usize = 32;

/// Text encoding for generated keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEncoding {
    /// Standard Base64 alphabet with padding.
    #[default]
    Standard,
    /// URL-safe alphabet without padding.
    UrlSafe,
}

/// Generate `len` random bytes from the thread-local CSPRNG and encode them.
pub fn generate_key(len: usize, encoding: KeyEncoding) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    encode_key(&bytes, encoding)
}

/// Encode raw key bytes.
pub fn encode_key(bytes: &[u8], encoding: KeyEncoding) -> String {
    match encoding {
        KeyEncoding::Standard => STANDARD.encode(bytes),
        KeyEncoding::UrlSafe => URL_SAFE_NO_PAD.encode(bytes),
    }
}
