//! # Factoid and Entry-Credit Addresses
//!
//! An [`Address`] is one of four variants. Public variants hold the type-1
//! RCD hash of a public key; private variants hold the raw Ed25519 seed.
//! Every variant carries an amount (factoshis or entry credits) so that the
//! same value can be dropped straight into a transaction as an input or an
//! output.
//!
//! ```text
//! FactoidPublic  { rcd, amount }   "FA..."
//! FactoidPrivate { key, amount }   "Fs..."
//! EcPublic       { rcd, amount }   "EC..."
//! EcPrivate      { key, amount }   "Es..."
//! ```
//!
//! The human-readable string is derived on demand from the variant and its
//! body; nothing is cached, so it can never drift out of sync.

pub mod codec;
pub mod kind;

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use codec::{
    decode_private, decode_public_rcd, encode, rcd1, validate, AddressError, BodyForm,
};
pub use kind::{AddressKind, Asset};

use crate::config::ADDRESS_BODY_LENGTH;
use crate::crypto::keys::FactoidKeypair;

/// A factoid or entry-credit address together with an amount.
///
/// # Examples
///
/// ```
/// use factoid_protocol::address::{Address, Asset};
///
/// let address: Address = "FA2HmrxVecacS2tJEug1ZaGdJdfFGmU3qn3tFkMvPiroU46LBEte".parse().unwrap();
/// assert_eq!(address.asset(), Asset::Factoid);
/// assert_eq!(address.amount(), 0);
///
/// let funded = address.with_amount(5_000);
/// assert_eq!(funded.to_string(), "FA2HmrxVecacS2tJEug1ZaGdJdfFGmU3qn3tFkMvPiroU46LBEte");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "AddressRepr")]
pub enum Address {
    FactoidPublic { rcd: [u8; 32], amount: u64 },
    FactoidPrivate { key: [u8; 32], amount: u64 },
    EcPublic { rcd: [u8; 32], amount: u64 },
    EcPrivate { key: [u8; 32], amount: u64 },
}

impl Address {
    /// Build a public address from a raw 32-byte RCD hash.
    pub fn new(rcd_hash: &[u8], asset: Asset) -> Result<Self, AddressError> {
        let body: [u8; ADDRESS_BODY_LENGTH] =
            rcd_hash
                .try_into()
                .map_err(|_| AddressError::InvalidLength {
                    expected: ADDRESS_BODY_LENGTH,
                    got: rcd_hash.len(),
                })?;
        Ok(Self::from_parts(AddressKind::public(asset), body, 0))
    }

    /// Assemble an address from its kind, body and amount.
    pub fn from_parts(kind: AddressKind, body: [u8; 32], amount: u64) -> Self {
        match kind {
            AddressKind::FactoidPublic => Self::FactoidPublic { rcd: body, amount },
            AddressKind::FactoidPrivate => Self::FactoidPrivate { key: body, amount },
            AddressKind::EcPublic => Self::EcPublic { rcd: body, amount },
            AddressKind::EcPrivate => Self::EcPrivate { key: body, amount },
        }
    }

    /// Parse a public address (`FA...` or `EC...`).
    ///
    /// Private strings are rejected here; use [`FromStr`] to accept any kind.
    pub fn from_human_readable(address: &str) -> Result<Self, AddressError> {
        let rcd = decode_public_rcd(address)?;
        let kind = if address.starts_with(AddressKind::FactoidPublic.human_prefix()) {
            AddressKind::FactoidPublic
        } else {
            AddressKind::EcPublic
        };
        Ok(Self::from_parts(kind, rcd, 0))
    }

    /// The public address committing to an Ed25519 public key.
    pub fn from_public_key(public_key: &[u8; 32], asset: Asset) -> Self {
        Self::from_parts(AddressKind::public(asset), rcd1(public_key), 0)
    }

    /// The private address holding a raw Ed25519 seed.
    pub fn from_private_key(private_key: &[u8; 32], asset: Asset) -> Self {
        Self::from_parts(AddressKind::private(asset), *private_key, 0)
    }

    pub fn kind(&self) -> AddressKind {
        match self {
            Self::FactoidPublic { .. } => AddressKind::FactoidPublic,
            Self::FactoidPrivate { .. } => AddressKind::FactoidPrivate,
            Self::EcPublic { .. } => AddressKind::EcPublic,
            Self::EcPrivate { .. } => AddressKind::EcPrivate,
        }
    }

    pub fn asset(&self) -> Asset {
        self.kind().asset()
    }

    /// `true` for the currency asset, `false` for entry credits.
    pub fn is_factoid(&self) -> bool {
        self.asset() == Asset::Factoid
    }

    pub fn is_private(&self) -> bool {
        self.kind().is_private()
    }

    /// The 32-byte body: an RCD hash for public variants, a seed for private ones.
    pub fn body(&self) -> &[u8; 32] {
        match self {
            Self::FactoidPublic { rcd, .. } | Self::EcPublic { rcd, .. } => rcd,
            Self::FactoidPrivate { key, .. } | Self::EcPrivate { key, .. } => key,
        }
    }

    /// The RCD hash, for public variants only.
    pub fn rcd_hash(&self) -> Option<&[u8; 32]> {
        match self {
            Self::FactoidPublic { rcd, .. } | Self::EcPublic { rcd, .. } => Some(rcd),
            Self::FactoidPrivate { .. } | Self::EcPrivate { .. } => None,
        }
    }

    pub fn amount(&self) -> u64 {
        match self {
            Self::FactoidPublic { amount, .. }
            | Self::FactoidPrivate { amount, .. }
            | Self::EcPublic { amount, .. }
            | Self::EcPrivate { amount, .. } => *amount,
        }
    }

    pub fn set_amount(&mut self, value: u64) {
        match self {
            Self::FactoidPublic { amount, .. }
            | Self::FactoidPrivate { amount, .. }
            | Self::EcPublic { amount, .. }
            | Self::EcPrivate { amount, .. } => *amount = value,
        }
    }

    /// Consuming variant of [`set_amount`](Self::set_amount).
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.set_amount(amount);
        self
    }

    /// The base-58 string for this address.
    pub fn human_readable(&self) -> String {
        codec::encode_body(self.body(), self.kind())
    }

    /// The public counterpart of this address, keeping the amount.
    ///
    /// Private variants derive their Ed25519 public key and hash it into an
    /// RCD; public variants are returned unchanged.
    pub fn to_public(&self) -> Self {
        match self {
            Self::FactoidPrivate { key, amount } | Self::EcPrivate { key, amount } => {
                let keypair = FactoidKeypair::from_seed(key);
                Self::from_parts(
                    AddressKind::public(self.asset()),
                    keypair.rcd_hash(),
                    *amount,
                )
            }
            public => public.clone(),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Parses any of the four kinds, checksum first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, body) = codec::decode(s)?;
        Ok(Self::from_parts(kind, body, 0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.human_readable())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_private() {
            // Never print the seed, not even partially.
            write!(f, "Address({}, <private>, amount={})", self.kind(), self.amount())
        } else {
            write!(f, "Address({}, amount={})", self.human_readable(), self.amount())
        }
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

/// JSON shape of an address: `{ "address": "FA...", "amount": 10 }`.
#[derive(Serialize, Deserialize)]
struct AddressRepr {
    address: String,
    #[serde(default)]
    amount: u64,
}

impl TryFrom<AddressRepr> for Address {
    type Error = AddressError;

    fn try_from(repr: AddressRepr) -> Result<Self, Self::Error> {
        Ok(repr.address.parse::<Address>()?.with_amount(repr.amount))
    }
}

impl Serialize for Address {
    /// Private addresses refuse to serialize. Exporting a seed should be an
    /// explicit [`human_readable`](Address::human_readable) call.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_private() {
            return Err(serde::ser::Error::custom(
                "refusing to serialize a private address",
            ));
        }
        AddressRepr {
            address: self.human_readable(),
            amount: self.amount(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FA: &str = "FA33syWbZthLiK5zV67ZWo5QXyrz272fTKrmohZQaA1vjPjPYkVB";
    const EC: &str = "EC2EvQzR53PkWfYYJSMETrVnfhSA5QKuTXQQm4TTsU9krxbGCNmY";
    const FS: &str = "Fs1isBQNbuSz8vwptc2Kyi2RkhGuee6UX69oX8oPy2qZLwDGh72t";

    #[test]
    fn from_human_readable_roundtrip() {
        for s in [FA, EC] {
            let address = Address::from_human_readable(s).unwrap();
            assert!(!address.is_private());
            assert_eq!(address.human_readable(), s);
            assert_eq!(address.amount(), 0);
        }
        assert!(Address::from_human_readable(FA).unwrap().is_factoid());
        assert!(!Address::from_human_readable(EC).unwrap().is_factoid());
    }

    #[test]
    fn from_human_readable_rejects_private() {
        assert_eq!(
            Address::from_human_readable(FS),
            Err(AddressError::UnexpectedPrefix {
                expected: "FA or EC",
                got: AddressKind::FactoidPrivate
            })
        );
    }

    #[test]
    fn from_str_accepts_every_kind() {
        let private: Address = FS.parse().unwrap();
        assert_eq!(private.kind(), AddressKind::FactoidPrivate);
        assert!(private.rcd_hash().is_none());
        assert_eq!(private.to_string(), FS);
    }

    #[test]
    fn new_validates_length() {
        assert!(Address::new(&[1u8; 31], Asset::Factoid).is_err());
        let ec = Address::new(&[1u8; 32], Asset::EntryCredit).unwrap();
        assert_eq!(ec.kind(), AddressKind::EcPublic);
        assert_eq!(ec.rcd_hash(), Some(&[1u8; 32]));
        assert!(ec.human_readable().starts_with("EC"));
    }

    #[test]
    fn to_public_derives_rcd() {
        let private = Address::from_private_key(&[0u8; 32], Asset::Factoid).with_amount(7);
        let public = private.to_public();
        assert_eq!(
            public.human_readable(),
            "FA1zT4aFpEvcnPqPCigB3fvGu4Q4mTXY22iiuV69DqE1pNhdF2MC"
        );
        assert_eq!(public.amount(), 7);
        assert_eq!(public.to_public(), public);
    }

    #[test]
    fn amount_updates() {
        let mut address = Address::from_human_readable(FA).unwrap();
        address.set_amount(42);
        assert_eq!(address.amount(), 42);
        assert_eq!(address.with_amount(1).amount(), 1);
    }

    #[test]
    fn debug_hides_private_key() {
        let private = Address::from_private_key(&[0x11; 32], Asset::EntryCredit);
        let debug = format!("{:?}", private);
        assert!(debug.contains("<private>"));
        assert!(!debug.contains(&private.human_readable()));
    }

    #[test]
    fn serde_roundtrip_keeps_amount() {
        let address = Address::from_human_readable(EC).unwrap().with_amount(99);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!(r#"{{"address":"{}","amount":99}}"#, EC));
        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, address);
    }

    #[test]
    fn serde_rejects_bad_checksum_and_private_export() {
        let bad = r#"{"address":"FA33syWbZthLiK5zV67ZWo5QXyrz272fTKrmohZQaA1vjPjPYkVC"}"#;
        assert!(serde_json::from_str::<Address>(bad).is_err());

        let private: Address = FS.parse().unwrap();
        assert!(serde_json::to_string(&private).is_err());
    }
}
