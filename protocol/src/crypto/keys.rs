//! # Key Management
//!
//! Ed25519 keypair handling for factoid and entry-credit addresses.
//!
//! A private address (`Fs...`/`Es...`) carries the raw 32-byte Ed25519 seed.
//! The public key derived from it is never placed in an address directly;
//! public addresses carry the type-1 RCD hash of the key instead (see
//! [`crate::address::codec::rcd1`]).
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (ed25519-dalek does this for `SigningKey`).
//! - Fresh keys come from `OsRng`. That is the only randomness in the crate.
//! - Key bytes are never logged and never appear in error messages.

use ed25519_dalek::{SigningKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use thiserror::Error;

use crate::address::codec::rcd1;
use crate::address::kind::{AddressKind, Asset};
use crate::config::PUBLIC_KEY_LENGTH;

/// Errors that can occur during key operations.
///
/// Messages never include key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid key length: expected 32 bytes, got {got}")]
    InvalidKeyLength { got: usize },

    #[error("invalid private key material")]
    InvalidKey,
}

/// Generate a new random 32-byte private key from the OS CSPRNG.
pub fn random_private_key() -> [u8; SECRET_KEY_LENGTH] {
    let mut key = [0u8; SECRET_KEY_LENGTH];
    OsRng.fill_bytes(&mut key);
    key
}

/// Derive the Ed25519 public key of a 32-byte private key.
///
/// Fails with [`KeyError::InvalidKeyLength`] for anything other than 32 bytes.
///
/// # Example
///
/// ```
/// use factoid_protocol::crypto::derive_public_key;
///
/// let public = derive_public_key(&[0u8; 32]).unwrap();
/// assert_eq!(
///     hex::encode(public),
///     "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29"
/// );
/// ```
pub fn derive_public_key(private_key: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH], KeyError> {
    Ok(FactoidKeypair::from_slice(private_key)?.public_key_bytes())
}

/// An Ed25519 keypair used to sign factoid transactions.
///
/// `FactoidKeypair` does not implement `Serialize`. Exporting the secret is
/// an explicit call to [`secret_key_bytes`](Self::secret_key_bytes) or
/// [`private_address`](Self::private_address).
///
/// # Examples
///
/// ```
/// use factoid_protocol::crypto::keys::FactoidKeypair;
///
/// let kp = FactoidKeypair::generate();
/// let msg = b"unsigned transaction body";
/// let sig = kp.sign(msg);
/// assert!(kp.verify(msg, &sig));
/// ```
pub struct FactoidKeypair {
    signing_key: SigningKey,
}

impl FactoidKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self::from_seed(&random_private_key())
    }

    /// Constructs a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Constructs a keypair from a byte slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| KeyError::InvalidKeyLength { got: bytes.len() })?;
        Ok(Self::from_seed(&seed))
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidKey)?;
        Self::from_slice(&bytes)
    }

    /// Get the raw public key bytes (32 bytes).
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Get the public key as a hex string.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// The type-1 RCD hash committing to this keypair's public key.
    pub fn rcd_hash(&self) -> [u8; 32] {
        rcd1(&self.public_key_bytes())
    }

    /// Sign a message. Deterministic for a given (key, message) pair.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        use ed25519_dalek::Signer;
        self.signing_key.sign(message).to_bytes()
    }

    /// Verify a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        super::signatures::verify(message, signature, &self.public_key_bytes())
    }

    /// Exports the raw 32-byte secret key material.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// The human-readable public address (`FA...` or `EC...`) of this key.
    pub fn public_address(&self, asset: Asset) -> String {
        crate::address::codec::encode_body(&self.rcd_hash(), AddressKind::public(asset))
    }

    /// The human-readable private address (`Fs...` or `Es...`) of this key.
    pub fn private_address(&self, asset: Asset) -> String {
        crate::address::codec::encode_body(&self.secret_key_bytes(), AddressKind::private(asset))
    }
}

impl Clone for FactoidKeypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for FactoidKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only.
        write!(f, "FactoidKeypair(pub={})", self.public_key_hex())
    }
}

impl PartialEq for FactoidKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for FactoidKeypair {}
