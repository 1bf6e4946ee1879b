//! # Cryptographic Primitives
//!
//! Thin, typed wrappers over audited implementations:
//!
//! - **Ed25519** (ed25519-dalek) for keys and signatures.
//! - **SHA-256** (sha2) for checksums, RCD hashes and transaction IDs.
//!
//! Nothing here is hand-rolled.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{double_sha256, sha256, sha256_array};
pub use keys::{derive_public_key, random_private_key, FactoidKeypair, KeyError};
pub use signatures::{sign, verify};
