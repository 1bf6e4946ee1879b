//! The [`Transaction`] value and its wire format.
//!
//! A transaction is assembled in place: add inputs and outputs, optionally
//! pin the timestamp, then sign every input (see [`super::signing`]).
//!
//! Any change to the body after signing makes existing signatures stale, so
//! every mutator drops them. A transaction can therefore never marshal with
//! signatures that do not cover its current body.
//!
//! # Wire Format
//!
//! ```text
//! version        varint (always 2)
//! timestamp      6 bytes, big-endian milliseconds
//! input count    u8
//! output count   u8
//! ec out count   u8
//! inputs         varint amount || 32-byte RCD hash, each
//! outputs        varint amount || 32-byte RCD hash, each
//! ec outputs     varint amount || 32-byte RCD hash, each
//! -- signed form only --
//! per input      0x01 || public key (32) || signature (64)
//! ```

use chrono::Utc;
use tracing::{debug, warn};

use super::encoding::{self, Reader};
use super::error::TransactionError;
use super::types::{Rcd, Signature, Witness};
use crate::address::{Address, AddressError, AddressKind, Asset};
use crate::config::{
    ADDRESS_BODY_LENGTH, MAX_IO_COUNT, RCD_TYPE_1, TIMESTAMP_LENGTH, TRANSACTION_VERSION,
};
use crate::crypto::hash::sha256_array;

/// Version byte, timestamp and the three counts.
const HEADER_LENGTH: usize = 1 + TIMESTAMP_LENGTH + 3;

// ---------------------------------------------------------------------------
// IntoAddress
// ---------------------------------------------------------------------------

/// Anything that can name an input or output.
///
/// Implemented for [`Address`] values and references, for human-readable
/// strings of any kind, and for `(rcd_hash, Asset)` pairs. Private addresses
/// are turned into their public counterpart when added to a transaction.
pub trait IntoAddress {
    fn into_address(self) -> Result<Address, AddressError>;
}

impl IntoAddress for Address {
    fn into_address(self) -> Result<Address, AddressError> {
        Ok(self)
    }
}

impl IntoAddress for &Address {
    fn into_address(self) -> Result<Address, AddressError> {
        Ok(self.clone())
    }
}

impl IntoAddress for &str {
    fn into_address(self) -> Result<Address, AddressError> {
        self.parse()
    }
}

impl IntoAddress for String {
    fn into_address(self) -> Result<Address, AddressError> {
        self.parse()
    }
}

impl IntoAddress for &String {
    fn into_address(self) -> Result<Address, AddressError> {
        self.parse()
    }
}

impl IntoAddress for ([u8; 32], Asset) {
    fn into_address(self) -> Result<Address, AddressError> {
        Address::new(&self.0, self.1)
    }
}

impl IntoAddress for (&[u8], Asset) {
    fn into_address(self) -> Result<Address, AddressError> {
        Address::new(self.0, self.1)
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A factoid transaction: inputs, factoid outputs, entry-credit outputs and
/// a millisecond timestamp.
///
/// `witnesses` always has one slot per input; a slot is filled once that
/// input has been signed.
///
/// # Example
///
/// ```
/// use factoid_protocol::transaction::Transaction;
///
/// let mut tx = Transaction::with_timestamp(1_503_275_254_039);
/// tx.add_input("FA2THnSmkrf7veBZ21u5bkT3xqKM3DBd8nQwByyNK3J4XEk16Byb", Some(10)).unwrap();
/// tx.add_output("FA2bEwF9UB2WCYhqPXxKknHyxoju4g6Uwoa7jw3cHCfQuPNz75yo", Some(10)).unwrap();
/// assert_eq!(tx.marshal_unsigned().unwrap().len(), 76);
/// assert_eq!(tx.calculate_ec_fee().unwrap(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(super) inputs: Vec<Address>,
    pub(super) outputs: Vec<Address>,
    pub(super) ec_outputs: Vec<Address>,
    pub(super) witnesses: Vec<Option<Witness>>,
    pub(super) timestamp: u64,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    /// An empty transaction stamped with the current time.
    pub fn new() -> Self {
        Self::with_timestamp(now_millis())
    }

    /// An empty transaction with a fixed timestamp.
    pub fn with_timestamp(millis: u64) -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
            ec_outputs: Vec::new(),
            witnesses: Vec::new(),
            timestamp: millis,
        }
    }

    pub fn inputs(&self) -> &[Address] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Address] {
        &self.outputs
    }

    pub fn ec_outputs(&self) -> &[Address] {
        &self.ec_outputs
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Add an input. `amount`, when given, replaces the address's own amount.
    ///
    /// Private addresses are converted to their public counterpart; the
    /// signing key is supplied separately at signing time.
    pub fn add_input(
        &mut self,
        address: impl IntoAddress,
        amount: Option<u64>,
    ) -> Result<(), TransactionError> {
        let address = resolve(address, amount)?;
        self.invalidate_signatures("input added");
        debug!(address = %address, amount = address.amount(), "input added");
        self.inputs.push(address);
        self.witnesses.push(None);
        Ok(())
    }

    /// Add an output, routed by asset: factoid addresses become outputs,
    /// entry-credit addresses become EC outputs.
    pub fn add_output(
        &mut self,
        address: impl IntoAddress,
        amount: Option<u64>,
    ) -> Result<(), TransactionError> {
        let address = resolve(address, amount)?;
        self.invalidate_signatures("output added");
        match address.asset() {
            Asset::Factoid => {
                debug!(address = %address, amount = address.amount(), "output added");
                self.outputs.push(address);
            }
            Asset::EntryCredit => {
                debug!(address = %address, amount = address.amount(), "ec output added");
                self.ec_outputs.push(address);
            }
        }
        Ok(())
    }

    /// Set the timestamp, or refresh it to now when `millis` is `None`.
    pub fn update_time(&mut self, millis: Option<u64>) {
        self.invalidate_signatures("timestamp changed");
        self.timestamp = millis.unwrap_or_else(now_millis);
    }

    /// RCDs of the inputs signed so far, in input order.
    pub fn rcds(&self) -> impl Iterator<Item = &Rcd> {
        self.witnesses.iter().flatten().map(|w| &w.rcd)
    }

    /// Signatures of the inputs signed so far, in input order.
    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.witnesses.iter().flatten().map(|w| &w.signature)
    }

    /// Serialize the body that signatures and the transaction ID cover.
    pub fn marshal_unsigned(&self) -> Result<Vec<u8>, TransactionError> {
        let counts = [
            ("input", self.inputs.len()),
            ("output", self.outputs.len()),
            ("ec output", self.ec_outputs.len()),
        ];

        let entries: usize = self
            .entries()
            .map(|a| encoding::varint_len(a.amount()) + ADDRESS_BODY_LENGTH)
            .sum();
        let mut buf = Vec::with_capacity(HEADER_LENGTH + entries);
        encoding::write_varint(&mut buf, TRANSACTION_VERSION);
        encoding::write_timestamp(&mut buf, self.timestamp)?;
        for (field, count) in counts {
            if count > MAX_IO_COUNT {
                return Err(TransactionError::EncodingOverflow { field, count });
            }
            buf.push(count as u8);
        }
        for address in self.entries() {
            encoding::write_varint(&mut buf, address.amount());
            buf.extend_from_slice(address.body());
        }
        Ok(buf)
    }

    /// Serialize the full signed transaction. Every input must be signed.
    pub fn marshal_signed(&self) -> Result<Vec<u8>, TransactionError> {
        let mut buf = self.marshal_unsigned()?;
        for (index, witness) in self.witnesses.iter().enumerate() {
            let witness = witness
                .as_ref()
                .ok_or(TransactionError::NotSigned { index })?;
            buf.extend_from_slice(&witness.rcd.to_bytes());
            buf.extend_from_slice(witness.signature.as_bytes());
        }
        Ok(buf)
    }

    /// Parse a marshaled transaction, signed or unsigned.
    ///
    /// An unsigned body yields a transaction with no witnesses. Signatures
    /// are parsed but not checked; call
    /// [`verify_signatures`](Self::verify_signatures) for that.
    pub fn unmarshal(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = Reader::new(bytes);

        let version = reader.read_varint()?;
        if version != TRANSACTION_VERSION {
            return Err(TransactionError::UnsupportedVersion(version));
        }
        let timestamp = reader.read_timestamp()?;
        let input_count = usize::from(reader.read_u8()?);
        let output_count = usize::from(reader.read_u8()?);
        let ec_output_count = usize::from(reader.read_u8()?);

        let mut tx = Self::with_timestamp(timestamp);
        tx.inputs = read_entries(&mut reader, input_count, AddressKind::FactoidPublic)?;
        tx.outputs = read_entries(&mut reader, output_count, AddressKind::FactoidPublic)?;
        tx.ec_outputs = read_entries(&mut reader, ec_output_count, AddressKind::EcPublic)?;
        tx.witnesses = vec![None; input_count];

        if !reader.is_empty() {
            for slot in tx.witnesses.iter_mut() {
                let tag = reader.read_u8()?;
                if tag != RCD_TYPE_1 {
                    return Err(TransactionError::UnsupportedRcd(tag));
                }
                let public_key = reader.read_array::<32>()?;
                let signature = reader.read_array::<64>()?;
                *slot = Some(Witness::type1(public_key, signature));
            }
        }
        if !reader.is_empty() {
            return Err(TransactionError::TrailingBytes(reader.remaining()));
        }

        debug!(
            inputs = input_count,
            outputs = output_count,
            ec_outputs = ec_output_count,
            signed = tx.is_signed(),
            "transaction unmarshaled"
        );
        Ok(tx)
    }

    /// Hex SHA-256 of the unsigned body. Stable across signing.
    pub fn transaction_id(&self) -> Result<String, TransactionError> {
        Ok(hex::encode(sha256_array(&self.marshal_unsigned()?)))
    }

    fn entries(&self) -> impl Iterator<Item = &Address> {
        self.inputs.iter().chain(&self.outputs).chain(&self.ec_outputs)
    }

    /// Drop every signature after a body change.
    pub(super) fn invalidate_signatures(&mut self, reason: &'static str) {
        let signed = self.witnesses.iter().filter(|w| w.is_some()).count();
        if signed > 0 {
            warn!(signed, reason, "transaction changed after signing; signatures cleared");
            self.witnesses.iter_mut().for_each(|w| *w = None);
        }
    }
}

fn resolve(address: impl IntoAddress, amount: Option<u64>) -> Result<Address, TransactionError> {
    let mut address = address.into_address()?.to_public();
    if let Some(amount) = amount {
        address.set_amount(amount);
    }
    Ok(address)
}

fn read_entries(
    reader: &mut Reader<'_>,
    count: usize,
    kind: AddressKind,
) -> Result<Vec<Address>, TransactionError> {
    (0..count)
        .map(|_| {
            let amount = reader.read_varint()?;
            let rcd = reader.read_array::<32>()?;
            Ok(Address::from_parts(kind, rcd, amount))
        })
        .collect()
}

/// Current wall-clock time in milliseconds. A clock set before the Unix
/// epoch stamps 0.
fn now_millis() -> u64 {
    let millis = Utc::now().timestamp_millis();
    u64::try_from(millis).unwrap_or_else(|_| {
        warn!(millis, "system clock is before the Unix epoch; using timestamp 0");
        0
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "FA2THnSmkrf7veBZ21u5bkT3xqKM3DBd8nQwByyNK3J4XEk16Byb";
    const OUTPUT: &str = "FA2bEwF9UB2WCYhqPXxKknHyxoju4g6Uwoa7jw3cHCfQuPNz75yo";
    const EC: &str = "EC2EvQzR53PkWfYYJSMETrVnfhSA5QKuTXQQm4TTsU9krxbGCNmY";
    const UNSIGNED_HEX: &str = "02015e023001170101000a400e5c7e0947fc014ba28c80243a12db6601f1173b270eb7f8bbbde62c290e740a521c0cd8593ad315fcd13e34f7a647af85d9db5c939b396fe844e4440aeddf14";

    fn fixture() -> Transaction {
        let mut tx = Transaction::with_timestamp(1_503_275_254_039);
        tx.add_input(INPUT, Some(10)).unwrap();
        tx.add_output(OUTPUT, Some(10)).unwrap();
        tx
    }

    #[test]
    fn new_transaction_is_empty_and_recent() {
        let tx = Transaction::new();
        assert!(tx.inputs().is_empty());
        assert!(tx.outputs().is_empty());
        assert!(tx.ec_outputs().is_empty());
        assert_eq!(tx.rcds().count(), 0);
        assert_eq!(tx.signatures().count(), 0);
        assert!(tx.timestamp() > 1_500_000_000_000);
    }

    #[test]
    fn unsigned_body_matches_known_bytes() {
        let body = fixture().marshal_unsigned().unwrap();
        assert_eq!(hex::encode(&body), UNSIGNED_HEX);
        assert_eq!(body.len(), 76);
    }

    #[test]
    fn outputs_are_routed_by_asset() {
        let mut tx = fixture();
        tx.add_output(EC, Some(5)).unwrap();
        assert_eq!(tx.outputs().len(), 1);
        assert_eq!(tx.ec_outputs().len(), 1);
        assert_eq!(tx.ec_outputs()[0].kind(), AddressKind::EcPublic);
        assert_eq!(tx.ec_outputs()[0].amount(), 5);
    }

    #[test]
    fn amount_override_is_optional() {
        let mut tx = Transaction::with_timestamp(0);
        let funded = Address::from_human_readable(INPUT).unwrap().with_amount(77);
        tx.add_input(&funded, None).unwrap();
        tx.add_input(funded, Some(3)).unwrap();
        assert_eq!(tx.inputs()[0].amount(), 77);
        assert_eq!(tx.inputs()[1].amount(), 3);
    }

    #[test]
    fn private_input_is_stored_as_public() {
        let mut tx = Transaction::with_timestamp(0);
        let private = Address::from_private_key(&[0u8; 32], Asset::Factoid);
        tx.add_input(private, Some(1)).unwrap();
        assert_eq!(
            tx.inputs()[0].human_readable(),
            "FA1zT4aFpEvcnPqPCigB3fvGu4Q4mTXY22iiuV69DqE1pNhdF2MC"
        );
    }

    #[test]
    fn private_address_string_is_stored_as_public() {
        let mut tx = Transaction::with_timestamp(0);
        tx.add_input("Fs1KWJrpLdfucvmYwN2nWrwepLn8ercpMbzXshd1g8zyhKXLVLWj", Some(4))
            .unwrap();
        tx.add_output(
            String::from("Es2Rf7iM6PdsqfYCo3D1tnAR65SkLENyWJG1deUzpRMQmbh9F3eG"),
            Some(2),
        )
        .unwrap();
        assert_eq!(tx.inputs()[0].kind(), AddressKind::FactoidPublic);
        assert_eq!(
            tx.inputs()[0].human_readable(),
            "FA1zT4aFpEvcnPqPCigB3fvGu4Q4mTXY22iiuV69DqE1pNhdF2MC"
        );
        assert_eq!(tx.inputs()[0].amount(), 4);
        assert_eq!(
            tx.ec_outputs()[0].human_readable(),
            "EC1nXH7GTGzVN61Kft42Ns4Qrpo1pBqQq9hP1pniFmEqmmXa9UYF"
        );
    }

    #[test]
    fn raw_rcd_pairs_are_accepted() {
        let mut tx = Transaction::with_timestamp(0);
        tx.add_output(([7u8; 32], Asset::EntryCredit), Some(1)).unwrap();
        let short: &[u8] = &[7u8; 16];
        assert!(matches!(
            tx.add_output((short, Asset::Factoid), None),
            Err(TransactionError::Address(AddressError::InvalidLength { .. }))
        ));
        assert_eq!(tx.ec_outputs().len(), 1);
    }

    #[test]
    fn invalid_address_string_is_rejected() {
        let mut tx = Transaction::new();
        let err = tx.add_input("FA2THnSmkrf7veBZ21u5bkT3xqKM3DBd8nQwByyNK3J4XEk16Byc", None);
        assert_eq!(
            err,
            Err(TransactionError::Address(AddressError::InvalidAddress))
        );
        assert!(tx.inputs().is_empty());
    }

    #[test]
    fn update_time_sets_or_refreshes() {
        let mut tx = fixture();
        tx.update_time(Some(42));
        assert_eq!(tx.timestamp(), 42);
        tx.update_time(None);
        assert!(tx.timestamp() > 42);
    }

    #[test]
    fn too_many_outputs_overflow_the_count_byte() {
        let mut tx = Transaction::with_timestamp(0);
        for _ in 0..256 {
            tx.add_output(OUTPUT, Some(1)).unwrap();
        }
        assert_eq!(
            tx.marshal_unsigned(),
            Err(TransactionError::EncodingOverflow {
                field: "output",
                count: 256
            })
        );
    }

    #[test]
    fn timestamp_past_six_bytes_fails_to_marshal() {
        let tx = Transaction::with_timestamp(1 << 48);
        assert_eq!(
            tx.marshal_unsigned(),
            Err(TransactionError::TimestampOverflow(1 << 48))
        );
    }

    #[test]
    fn marshal_signed_requires_every_signature() {
        assert_eq!(
            fixture().marshal_signed(),
            Err(TransactionError::NotSigned { index: 0 })
        );
        let empty = Transaction::with_timestamp(5);
        assert_eq!(empty.marshal_signed(), empty.marshal_unsigned());
    }

    #[test]
    fn unmarshal_unsigned_body() {
        let body = hex::decode(UNSIGNED_HEX).unwrap();
        let tx = Transaction::unmarshal(&body).unwrap();
        assert_eq!(tx, fixture());
        assert_eq!(tx.inputs()[0].human_readable(), INPUT);
        assert_eq!(tx.outputs()[0].human_readable(), OUTPUT);
    }

    #[test]
    fn unmarshal_rejects_malformed_input() {
        let body = hex::decode(UNSIGNED_HEX).unwrap();

        assert!(matches!(
            Transaction::unmarshal(&body[..40]),
            Err(TransactionError::Truncated { .. })
        ));

        let mut versioned = body.clone();
        versioned[0] = 0x03;
        assert_eq!(
            Transaction::unmarshal(&versioned),
            Err(TransactionError::UnsupportedVersion(3))
        );

        let mut bad_rcd = body.clone();
        bad_rcd.push(0x02);
        bad_rcd.extend_from_slice(&[0u8; 96]);
        assert_eq!(
            Transaction::unmarshal(&bad_rcd),
            Err(TransactionError::UnsupportedRcd(0x02))
        );

        let mut trailing = body.clone();
        trailing.push(0x01);
        trailing.extend_from_slice(&[0u8; 96]);
        trailing.push(0xff);
        assert_eq!(
            Transaction::unmarshal(&trailing),
            Err(TransactionError::TrailingBytes(1))
        );
    }

    #[test]
    fn transaction_id_is_sha256_of_unsigned_body() {
        let tx = fixture();
        let body = tx.marshal_unsigned().unwrap();
        assert_eq!(tx.transaction_id().unwrap(), hex::encode(sha256_array(&body)));
        assert_eq!(tx.transaction_id().unwrap().len(), 64);
    }
}
