//! # Protocol Configuration & Constants
//!
//! Every magic number the wire format depends on lives here. The values are
//! fixed by the network: a verifier on the other side hashes exactly these
//! bytes, so none of them are tunable at runtime.

// ---------------------------------------------------------------------------
// Address Prefixes
// ---------------------------------------------------------------------------

/// Two-byte prefix of a factoid public address (`FA...`).
pub const FACTOID_PUBLIC_PREFIX: [u8; 2] = [0x5f, 0xb1];

/// Two-byte prefix of a factoid private address (`Fs...`).
pub const FACTOID_PRIVATE_PREFIX: [u8; 2] = [0x64, 0x78];

/// Two-byte prefix of an entry-credit public address (`EC...`).
pub const ENTRY_CREDIT_PUBLIC_PREFIX: [u8; 2] = [0x59, 0x2a];

/// Two-byte prefix of an entry-credit private address (`Es...`).
pub const ENTRY_CREDIT_PRIVATE_PREFIX: [u8; 2] = [0x5d, 0xb6];

/// Length of the binary prefix in a decoded address.
pub const ADDRESS_PREFIX_LENGTH: usize = 2;

/// Length of the key or RCD hash carried by an address.
pub const ADDRESS_BODY_LENGTH: usize = 32;

/// Length of the truncated double-SHA-256 checksum.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;

/// Total decoded length: prefix + body + checksum.
pub const ADDRESS_DECODED_LENGTH: usize =
    ADDRESS_PREFIX_LENGTH + ADDRESS_BODY_LENGTH + ADDRESS_CHECKSUM_LENGTH;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 secret key (seed) length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Type tag of a single-signature redeem condition.
pub const RCD_TYPE_1: u8 = 0x01;

/// Serialized length of a type-1 RCD: tag byte + public key.
pub const RCD_TYPE_1_LENGTH: usize = 1 + PUBLIC_KEY_LENGTH;

/// Bytes each input contributes once signed: the RCD followed by its signature.
pub const SIGNATURE_BLOCK_LENGTH: usize = RCD_TYPE_1_LENGTH + SIGNATURE_LENGTH;

// ---------------------------------------------------------------------------
// Transaction Layout
// ---------------------------------------------------------------------------

/// Transaction format version written at the head of every body.
pub const TRANSACTION_VERSION: u64 = 2;

/// Width of the millisecond timestamp field.
pub const TIMESTAMP_LENGTH: usize = 6;

/// Largest timestamp that fits the six-byte field.
pub const MAX_TIMESTAMP: u64 = (1 << (8 * TIMESTAMP_LENGTH as u64)) - 1;

/// Input, output and EC output counts are each a single byte on the wire.
pub const MAX_IO_COUNT: usize = u8::MAX as usize;

// ---------------------------------------------------------------------------
// Fee Policy
// ---------------------------------------------------------------------------

/// Entry credits charged per started KiB of signed transaction size.
pub const FEE_PER_KIB: u64 = 1;

/// Size unit the per-KiB charge is rounded up to.
pub const FEE_SIZE_UNIT: u64 = 1024;

/// Entry credits charged per factoid or entry-credit output.
pub const FEE_PER_OUTPUT: u64 = 10;

/// Entry credits charged per signature-bearing input.
pub const FEE_PER_SIGNATURE: u64 = 1;
