//! Redeem conditions and signatures carried by signed inputs.
//!
//! Each input of a signed transaction is followed by its redeem condition
//! (RCD) and one Ed25519 signature over the unsigned body. Only RCD type 1
//! exists: a single public key.

use std::fmt;

use crate::address::codec::rcd1;
use crate::config::{PUBLIC_KEY_LENGTH, RCD_TYPE_1, RCD_TYPE_1_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::signatures;

// ---------------------------------------------------------------------------
// Rcd
// ---------------------------------------------------------------------------

/// A redeem condition: what must be proven to spend from an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rcd {
    /// Single Ed25519 key. Serialized as `0x01 || public_key`.
    Type1 { public_key: [u8; PUBLIC_KEY_LENGTH] },
}

impl Rcd {
    pub fn type1(public_key: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self::Type1 { public_key }
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        match self {
            Self::Type1 { public_key } => public_key,
        }
    }

    /// Wire form of the RCD.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Type1 { public_key } => {
                let mut out = Vec::with_capacity(RCD_TYPE_1_LENGTH);
                out.push(RCD_TYPE_1);
                out.extend_from_slice(public_key);
                out
            }
        }
    }

    /// The hash a public address commits to.
    pub fn hash(&self) -> [u8; 32] {
        match self {
            Self::Type1 { public_key } => rcd1(public_key),
        }
    }
}

impl fmt::Display for Rcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// An Ed25519 signature together with the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    public_key: [u8; PUBLIC_KEY_LENGTH],
    bytes: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    pub fn new(public_key: [u8; PUBLIC_KEY_LENGTH], bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { public_key, bytes }
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.public_key
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Check this signature over `message` against its own public key.
    pub fn verify(&self, message: &[u8]) -> bool {
        signatures::verify(message, &self.bytes, &self.public_key)
    }
}

// ---------------------------------------------------------------------------
// Witness
// ---------------------------------------------------------------------------

/// The RCD and signature attached to one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Witness {
    pub rcd: Rcd,
    pub signature: Signature,
}

impl Witness {
    /// Witness for a type-1 RCD, where the signing key is the RCD key.
    pub fn type1(public_key: [u8; PUBLIC_KEY_LENGTH], signature: [u8; SIGNATURE_LENGTH]) -> Self {
        Self {
            rcd: Rcd::type1(public_key),
            signature: Signature::new(public_key, signature),
        }
    }
}
