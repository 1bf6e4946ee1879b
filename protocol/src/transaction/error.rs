//! Error type shared by every transaction operation.

use thiserror::Error;

use crate::address::AddressError;
use crate::crypto::keys::KeyError;

/// Errors raised while building, marshaling, signing or parsing a transaction.
///
/// "Address not in this transaction" and "not enough to cover the fee" are
/// ordinary outcomes for [`add_fee`](super::Transaction::add_fee) and
/// [`sub_fee`](super::Transaction::sub_fee), which fold them into `false`.
/// The `try_` variants surface them as [`AddressNotFound`](Self::AddressNotFound)
/// and [`InsufficientFunds`](Self::InsufficientFunds).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Key(#[from] KeyError),

    /// A count does not fit its single-byte wire field.
    #[error("{field} count {count} exceeds the one-byte limit of 255")]
    EncodingOverflow { field: &'static str, count: usize },

    #[error("timestamp {0} does not fit in 6 bytes")]
    TimestampOverflow(u64),

    #[error("address {address} is not part of this transaction")]
    AddressNotFound { address: String },

    #[error("insufficient funds at {address}: amount {amount} does not cover fee {fee}")]
    InsufficientFunds {
        address: String,
        amount: u64,
        fee: u64,
    },

    #[error("fee arithmetic overflowed u64")]
    FeeOverflow,

    #[error("input index {index} out of range ({count} inputs)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("input {index} is already signed")]
    AlreadySigned { index: usize },

    #[error("input {index} is not signed")]
    NotSigned { index: usize },

    /// The signing key does not hash to the input's RCD.
    #[error("key for input {index} does not match its address")]
    RcdMismatch { index: usize },

    #[error("signature for input {index} does not verify")]
    InvalidSignature { index: usize },

    #[error("truncated transaction: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    #[error("unsupported transaction version {0}")]
    UnsupportedVersion(u64),

    #[error("unsupported RCD type {0:#04x}")]
    UnsupportedRcd(u8),

    #[error("varint does not fit in u64")]
    VarintOverflow,
}
