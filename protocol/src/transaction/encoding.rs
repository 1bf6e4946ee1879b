//! Wire primitives: varints, the six-byte timestamp, and a bounds-checked reader.
//!
//! Varints are big-endian groups of seven bits. Every byte except the last
//! has its high bit set:
//!
//! ```text
//! 0        -> 00
//! 10       -> 0a
//! 300      -> 82 2c
//! u64::MAX -> 81 ff ff ff ff ff ff ff ff 7f
//! ```

use super::error::TransactionError;
use crate::config::{MAX_TIMESTAMP, TIMESTAMP_LENGTH};

/// Longest varint a `u64` can need.
pub const MAX_VARINT_LENGTH: usize = 10;

/// Append `value` as a big-endian varint.
pub fn write_varint(buf: &mut Vec<u8>, value: u64) {
    let mut groups = [0u8; MAX_VARINT_LENGTH];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    // groups[0] is the least significant and goes last, without a continuation bit.
    for i in (0..len).rev() {
        let continuation = if i == 0 { 0x00 } else { 0x80 };
        buf.push(groups[i] | continuation);
    }
}

/// Number of bytes [`write_varint`] emits for `value`.
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Append a millisecond timestamp as six big-endian bytes.
pub fn write_timestamp(buf: &mut Vec<u8>, millis: u64) -> Result<(), TransactionError> {
    if millis > MAX_TIMESTAMP {
        return Err(TransactionError::TimestampOverflow(millis));
    }
    let bytes = millis.to_be_bytes();
    buf.extend_from_slice(&bytes[bytes.len() - TIMESTAMP_LENGTH..]);
    Ok(())
}

/// Cursor over a byte slice that reports truncation instead of panicking.
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], TransactionError> {
        if self.remaining() < len {
            return Err(TransactionError::Truncated {
                offset: self.offset,
                needed: len,
            });
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], TransactionError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, TransactionError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_varint(&mut self) -> Result<u64, TransactionError> {
        let mut value: u64 = 0;
        for _ in 0..MAX_VARINT_LENGTH {
            let byte = self.read_u8()?;
            if value > u64::MAX >> 7 {
                return Err(TransactionError::VarintOverflow);
            }
            value = (value << 7) | u64::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(TransactionError::VarintOverflow)
    }

    pub fn read_timestamp(&mut self) -> Result<u64, TransactionError> {
        let mut bytes = [0u8; 8];
        bytes[8 - TIMESTAMP_LENGTH..].copy_from_slice(self.read_bytes(TIMESTAMP_LENGTH)?);
        Ok(u64::from_be_bytes(bytes))
    }
}
