//! # Hashing Utilities
//!
//! SHA-256 and its doubled form. Two things in this crate are hashed:
//!
//! - **Address checksums**: the first four bytes of `SHA256(SHA256(prefix || body))`.
//! - **Redeem conditions**: a type-1 RCD commits to a public key as
//!   `SHA256(SHA256(0x01 || public_key))`.
//!
//! The transaction ID is a single SHA-256 over the unsigned body.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use factoid_protocol::crypto::sha256;
///
/// let hash = sha256(b"factoid");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    sha256_array(data).to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    sha256_multi(&[data])
}

/// Hash several byte slices as if they were concatenated.
///
/// Saves the temporary buffer when hashing composite values such as
/// `prefix || body` or `tag || key`.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute the double-SHA-256 hash: `SHA-256(SHA-256(data))`.
///
/// # Example
///
/// ```
/// use factoid_protocol::crypto::double_sha256;
///
/// let digest = double_sha256(b"raw bytes");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    double_sha256_multi(&[data])
}

/// Double SHA-256 over the concatenation of `parts`.
pub fn double_sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let first = sha256_multi(parts);
    sha256_array(&first)
}
