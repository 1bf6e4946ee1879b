//! Input signing and signature verification.
//!
//! Every input is signed independently, by index, over the unsigned body.
//! Signing an input twice is an error. Changing the body after signing
//! clears all signatures (see [`Transaction`]), so a signature always covers
//! the body it is marshaled with.

use tracing::debug;

use super::builder::Transaction;
use super::error::TransactionError;
use super::types::Witness;
use crate::address::codec::decode_private;
use crate::crypto::keys::{FactoidKeypair, KeyError};

/// Anything that can supply a 32-byte Ed25519 private key.
///
/// Strings are read as private addresses (`Fs...` or `Es...`); any string
/// that does not decode as one is [`KeyError::InvalidKey`].
pub trait IntoSecretKey {
    fn into_secret_key(self) -> Result<[u8; 32], KeyError>;
}

impl IntoSecretKey for [u8; 32] {
    fn into_secret_key(self) -> Result<[u8; 32], KeyError> {
        Ok(self)
    }
}

impl IntoSecretKey for &[u8; 32] {
    fn into_secret_key(self) -> Result<[u8; 32], KeyError> {
        Ok(*self)
    }
}

impl IntoSecretKey for &[u8] {
    fn into_secret_key(self) -> Result<[u8; 32], KeyError> {
        self.try_into()
            .map_err(|_| KeyError::InvalidKeyLength { got: self.len() })
    }
}

impl IntoSecretKey for &str {
    fn into_secret_key(self) -> Result<[u8; 32], KeyError> {
        decode_private(self).map_err(|_| KeyError::InvalidKey)
    }
}

impl IntoSecretKey for &String {
    fn into_secret_key(self) -> Result<[u8; 32], KeyError> {
        self.as_str().into_secret_key()
    }
}

impl IntoSecretKey for &FactoidKeypair {
    fn into_secret_key(self) -> Result<[u8; 32], KeyError> {
        Ok(self.secret_key_bytes())
    }
}

impl Transaction {
    /// Sign input `index` with `secret`.
    ///
    /// Fails with [`IndexOutOfRange`](TransactionError::IndexOutOfRange) for
    /// a missing input, [`AlreadySigned`](TransactionError::AlreadySigned)
    /// for an input that already carries a signature, and
    /// [`RcdMismatch`](TransactionError::RcdMismatch) when the key does not
    /// belong to the input's address.
    ///
    /// # Example
    ///
    /// ```
    /// use factoid_protocol::address::{Address, Asset};
    /// use factoid_protocol::transaction::Transaction;
    ///
    /// let secret = [1u8; 32];
    /// let mut tx = Transaction::new();
    /// tx.add_input(Address::from_private_key(&secret, Asset::Factoid), Some(5)).unwrap();
    /// tx.sign(0, secret).unwrap();
    /// assert!(tx.is_signed());
    /// assert!(tx.verify_signatures().is_ok());
    /// ```
    pub fn sign(&mut self, index: usize, secret: impl IntoSecretKey) -> Result<(), TransactionError> {
        let count = self.inputs.len();
        if index >= count {
            return Err(TransactionError::IndexOutOfRange { index, count });
        }
        if self.witnesses[index].is_some() {
            return Err(TransactionError::AlreadySigned { index });
        }

        let keypair = FactoidKeypair::from_seed(&secret.into_secret_key()?);
        if keypair.rcd_hash() != *self.inputs[index].body() {
            return Err(TransactionError::RcdMismatch { index });
        }

        let body = self.marshal_unsigned()?;
        let signature = keypair.sign(&body);
        self.witnesses[index] = Some(Witness::type1(keypair.public_key_bytes(), signature));

        debug!(
            index,
            address = %self.inputs[index],
            public_key = %keypair.public_key_hex(),
            "input signed"
        );
        Ok(())
    }

    /// Sign the first unsigned input with `secret`, returning its index.
    pub fn sign_next(&mut self, secret: impl IntoSecretKey) -> Result<usize, TransactionError> {
        let index = self
            .witnesses
            .iter()
            .position(Option::is_none)
            .ok_or(TransactionError::IndexOutOfRange {
                index: self.inputs.len(),
                count: self.inputs.len(),
            })?;
        self.sign(index, secret)?;
        Ok(index)
    }

    /// Whether input `index` carries a signature.
    pub fn is_input_signed(&self, index: usize) -> bool {
        matches!(self.witnesses.get(index), Some(Some(_)))
    }

    /// `true` once every input is signed. A transaction without inputs is
    /// never considered signed.
    pub fn is_signed(&self) -> bool {
        !self.witnesses.is_empty() && self.witnesses.iter().all(Option::is_some)
    }

    /// Check every input: it must be signed, its RCD must hash to the input
    /// address, and its signature must verify over the unsigned body.
    pub fn verify_signatures(&self) -> Result<(), TransactionError> {
        let body = self.marshal_unsigned()?;
        for (index, (input, witness)) in self.inputs.iter().zip(&self.witnesses).enumerate() {
            let witness = witness
                .as_ref()
                .ok_or(TransactionError::NotSigned { index })?;
            if witness.rcd.hash() != *input.body() {
                return Err(TransactionError::RcdMismatch { index });
            }
            if !witness.signature.verify(&body) {
                return Err(TransactionError::InvalidSignature { index });
            }
        }
        debug!(inputs = self.inputs.len(), "signatures verified");
        Ok(())
    }
}

/// Sign every unsigned input whose address belongs to `keypair`.
///
/// Returns how many inputs were signed; zero if none matched.
pub fn sign_transaction(
    tx: &mut Transaction,
    keypair: &FactoidKeypair,
) -> Result<usize, TransactionError> {
    let rcd = keypair.rcd_hash();
    let pending: Vec<usize> = (0..tx.inputs.len())
        .filter(|&i| !tx.is_input_signed(i) && *tx.inputs[i].body() == rcd)
        .collect();
    for &index in &pending {
        tx.sign(index, keypair)?;
    }
    Ok(pending.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
