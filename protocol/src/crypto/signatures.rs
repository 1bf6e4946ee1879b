//! # Digital Signatures
//!
//! Byte-level Ed25519 signing and verification over raw key material.
//!
//! Transactions carry keys as plain byte arrays on the wire, so these
//! functions take slices and check lengths themselves instead of asking
//! callers to build typed keys first.
//!
//! Verification uses ed25519-dalek's `verify_strict`, which rejects
//! small-order public keys and non-canonical signatures. Under plain
//! `verify` an all-zero signature passes for an all-zero key on some
//! messages.

use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};

use super::keys::{FactoidKeypair, KeyError};

/// Sign `message` with a 32-byte private key.
///
/// Deterministic per RFC 8032: the same key and message always produce the
/// same 64 bytes. Fails with [`KeyError::InvalidKeyLength`] when the key is
/// not 32 bytes.
///
/// # Example
///
/// ```
/// use factoid_protocol::crypto::{derive_public_key, sign, verify};
///
/// let key = [7u8; 32];
/// let signature = sign(b"payload", &key).unwrap();
/// let public = derive_public_key(&key).unwrap();
/// assert!(verify(b"payload", &signature, &public));
/// ```
pub fn sign(message: &[u8], private_key: &[u8]) -> Result<[u8; 64], KeyError> {
    Ok(FactoidKeypair::from_slice(private_key)?.sign(message))
}

/// Verify an Ed25519 signature.
///
/// Malformed keys and signatures of the wrong length verify as `false`
/// rather than erroring.
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(pk_bytes) = <[u8; 32]>::try_from(public_key) else {
        return false;
    };
    let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&pk_bytes) else {
        return false;
    };
    let signature = DalekSignature::from_bytes(&sig_bytes);
    verifying_key.verify_strict(message, &signature).is_ok()
}
