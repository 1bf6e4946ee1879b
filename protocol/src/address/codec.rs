//! Human-readable address codec.
//!
//! Every address string is base-58 over 38 bytes:
//!
//! ```text
//! prefix (2) || body (32) || checksum (4)
//! checksum = SHA256(SHA256(prefix || body))[0..4]
//! ```
//!
//! [`validate`] is the only gate between an untrusted string and the bytes
//! inside it. Every decode path in this module runs it first.

use thiserror::Error;

use super::kind::AddressKind;
use crate::config::{
    ADDRESS_BODY_LENGTH, ADDRESS_CHECKSUM_LENGTH, ADDRESS_DECODED_LENGTH, ADDRESS_PREFIX_LENGTH,
    RCD_TYPE_1,
};
use crate::crypto::hash::double_sha256_multi;

/// Errors raised while building or decoding addresses.
///
/// The offending string is not echoed back: it may be a private address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid address: bad encoding, prefix or checksum")]
    InvalidAddress,

    #[error("unexpected address kind {got} (expected {expected})")]
    UnexpectedPrefix {
        expected: &'static str,
        got: AddressKind,
    },
}

/// How the body handed to [`encode`] should be read for public kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyForm {
    /// A raw Ed25519 public key; it is hashed with [`rcd1`] before encoding.
    PublicKey,
    /// An RCD hash that has already been computed; encoded as-is.
    RcdHash,
}

/// Type-1 redeem condition hash of a public key: `SHA256d(0x01 || key)`.
pub fn rcd1(public_key: &[u8; 32]) -> [u8; 32] {
    double_sha256_multi(&[&[RCD_TYPE_1], public_key])
}

/// Encode `body` as an address of the given kind.
///
/// For public kinds `form` says whether `body` is a public key (hashed with
/// [`rcd1`] first) or an RCD hash. Private kinds always encode `body` as-is.
///
/// # Example
///
/// ```
/// use factoid_protocol::address::codec::{encode, BodyForm};
/// use factoid_protocol::address::AddressKind;
///
/// let key = hex::decode("a96946bcc602b0ebaa8e260cb4df0e05d7d2d3c14651cbbd902ab558610c9835").unwrap();
/// let address = encode(&key, AddressKind::FactoidPublic, BodyForm::PublicKey).unwrap();
/// assert_eq!(address, "FA2HmrxVecacS2tJEug1ZaGdJdfFGmU3qn3tFkMvPiroU46LBEte");
/// ```
pub fn encode(body: &[u8], kind: AddressKind, form: BodyForm) -> Result<String, AddressError> {
    let body: &[u8; ADDRESS_BODY_LENGTH] =
        body.try_into().map_err(|_| AddressError::InvalidLength {
            expected: ADDRESS_BODY_LENGTH,
            got: body.len(),
        })?;

    let encoded = match (kind.is_private(), form) {
        (false, BodyForm::PublicKey) => encode_body(&rcd1(body), kind),
        _ => encode_body(body, kind),
    };
    Ok(encoded)
}

/// Encode a 32-byte body verbatim under `kind`'s prefix.
pub fn encode_body(body: &[u8; ADDRESS_BODY_LENGTH], kind: AddressKind) -> String {
    let prefix = kind.prefix();
    let checksum = double_sha256_multi(&[&prefix, body]);

    let mut raw = Vec::with_capacity(ADDRESS_DECODED_LENGTH);
    raw.extend_from_slice(&prefix);
    raw.extend_from_slice(body);
    raw.extend_from_slice(&checksum[..ADDRESS_CHECKSUM_LENGTH]);
    bs58::encode(raw).into_string()
}

/// Checks the prefix and checksum of a human-readable address.
///
/// Anything malformed is `false`.
pub fn validate(address: &str) -> bool {
    let Ok(raw) = bs58::decode(address).into_vec() else {
        return false;
    };
    if raw.len() != ADDRESS_DECODED_LENGTH {
        return false;
    }
    if address
        .get(..2)
        .and_then(AddressKind::from_human_prefix)
        .is_none()
    {
        return false;
    }

    let split = ADDRESS_PREFIX_LENGTH + ADDRESS_BODY_LENGTH;
    let checksum = double_sha256_multi(&[&raw[..split]]);
    checksum[..ADDRESS_CHECKSUM_LENGTH] == raw[split..]
}

/// Validate and decode an address of any kind into its kind and 32-byte body.
pub fn decode(address: &str) -> Result<(AddressKind, [u8; ADDRESS_BODY_LENGTH]), AddressError> {
    if !validate(address) {
        return Err(AddressError::InvalidAddress);
    }
    let raw = bs58::decode(address)
        .into_vec()
        .map_err(|_| AddressError::InvalidAddress)?;

    let kind = address
        .get(..2)
        .and_then(AddressKind::from_human_prefix)
        .ok_or(AddressError::InvalidAddress)?;
    // The text prefix must agree with the binary one it was derived from.
    if AddressKind::from_prefix([raw[0], raw[1]]) != Some(kind) {
        return Err(AddressError::InvalidAddress);
    }

    let mut body = [0u8; ADDRESS_BODY_LENGTH];
    body.copy_from_slice(&raw[ADDRESS_PREFIX_LENGTH..ADDRESS_PREFIX_LENGTH + ADDRESS_BODY_LENGTH]);
    Ok((kind, body))
}

/// Decode a private address (`Fs...` or `Es...`) into its raw 32-byte key.
pub fn decode_private(address: &str) -> Result<[u8; ADDRESS_BODY_LENGTH], AddressError> {
    match decode(address)? {
        (kind, key) if kind.is_private() => Ok(key),
        (kind, _) => Err(AddressError::UnexpectedPrefix {
            expected: "Fs or Es",
            got: kind,
        }),
    }
}

/// Decode a public address (`FA...` or `EC...`) into its RCD hash.
///
/// The result is a hash; it does not invert to a public key.
pub fn decode_public_rcd(address: &str) -> Result<[u8; ADDRESS_BODY_LENGTH], AddressError> {
    match decode(address)? {
        (kind, rcd) if !kind.is_private() => Ok(rcd),
        (kind, _) => Err(AddressError::UnexpectedPrefix {
            expected: "FA or EC",
            got: kind,
        }),
    }
}
