//! Address kinds and their compile-time prefix table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    ENTRY_CREDIT_PRIVATE_PREFIX, ENTRY_CREDIT_PUBLIC_PREFIX, FACTOID_PRIVATE_PREFIX,
    FACTOID_PUBLIC_PREFIX,
};

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// The two assets an address can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The transferable currency, counted in factoshis.
    Factoid,
    /// Non-transferable credits that pay for record storage.
    EntryCredit,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factoid => write!(f, "FCT"),
            Self::EntryCredit => write!(f, "EC"),
        }
    }
}

// ---------------------------------------------------------------------------
// AddressKind
// ---------------------------------------------------------------------------

/// One of the four address flavours.
///
/// Public kinds carry a type-1 RCD hash, private kinds carry a raw Ed25519 seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressKind {
    /// `FA...`
    FactoidPublic,
    /// `Fs...`
    FactoidPrivate,
    /// `EC...`
    EcPublic,
    /// `Es...`
    EcPrivate,
}

impl AddressKind {
    /// All kinds, in prefix-table order.
    pub const ALL: [AddressKind; 4] = [
        AddressKind::FactoidPublic,
        AddressKind::FactoidPrivate,
        AddressKind::EcPublic,
        AddressKind::EcPrivate,
    ];

    /// The public kind for `asset`.
    pub const fn public(asset: Asset) -> Self {
        match asset {
            Asset::Factoid => Self::FactoidPublic,
            Asset::EntryCredit => Self::EcPublic,
        }
    }

    /// The private kind for `asset`.
    pub const fn private(asset: Asset) -> Self {
        match asset {
            Asset::Factoid => Self::FactoidPrivate,
            Asset::EntryCredit => Self::EcPrivate,
        }
    }

    /// Binary prefix prepended to the body before checksumming.
    pub const fn prefix(self) -> [u8; 2] {
        match self {
            Self::FactoidPublic => FACTOID_PUBLIC_PREFIX,
            Self::FactoidPrivate => FACTOID_PRIVATE_PREFIX,
            Self::EcPublic => ENTRY_CREDIT_PUBLIC_PREFIX,
            Self::EcPrivate => ENTRY_CREDIT_PRIVATE_PREFIX,
        }
    }

    /// The two characters every base-58 string of this kind starts with.
    pub const fn human_prefix(self) -> &'static str {
        match self {
            Self::FactoidPublic => "FA",
            Self::FactoidPrivate => "Fs",
            Self::EcPublic => "EC",
            Self::EcPrivate => "Es",
        }
    }

    /// Look a kind up by its two-character human prefix.
    pub fn from_human_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.human_prefix() == prefix)
    }

    /// Look a kind up by its binary prefix.
    pub fn from_prefix(prefix: [u8; 2]) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.prefix() == prefix)
    }

    pub const fn asset(self) -> Asset {
        match self {
            Self::FactoidPublic | Self::FactoidPrivate => Asset::Factoid,
            Self::EcPublic | Self::EcPrivate => Asset::EntryCredit,
        }
    }

    pub const fn is_private(self) -> bool {
        matches!(self, Self::FactoidPrivate | Self::EcPrivate)
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_prefix())
    }
}
