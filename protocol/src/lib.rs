// Copyright (c) 2026 Factoid Tools Contributors. MIT License.
// See LICENSE for details.

//! # Factoid Protocol
//!
//! Offline tooling for factoid and entry-credit value transfers: address
//! encoding, Ed25519 keys, and the transaction wire format.
//!
//! Nothing in this crate talks to the network. It produces the exact bytes a
//! node expects and leaves submission to the caller.
//!
//! ## Modules
//!
//! - **address**: the four address kinds and their base-58 codec.
//! - **crypto**: SHA-256, Ed25519 keys and signatures.
//! - **transaction**: construction, fees, signing and marshaling.
//! - **config**: wire constants and fee policy.
//!
//! ## Example
//!
//! ```
//! use factoid_protocol::address::{Address, Asset};
//! use factoid_protocol::transaction::Transaction;
//!
//! let secret = [42u8; 32];
//! let from = Address::from_private_key(&secret, Asset::Factoid);
//!
//! let mut tx = Transaction::new();
//! tx.add_input(&from, Some(5_000_000)).unwrap();
//! tx.add_output("FA2bEwF9UB2WCYhqPXxKknHyxoju4g6Uwoa7jw3cHCfQuPNz75yo", Some(5_000_000)).unwrap();
//! tx.add_fee(&from.to_public().human_readable(), 1_000).unwrap();
//! tx.sign(0, secret).unwrap();
//!
//! let wire = tx.marshal_signed().unwrap();
//! assert_eq!(Transaction::unmarshal(&wire).unwrap(), tx);
//! ```

pub mod address;
pub mod config;
pub mod crypto;
pub mod transaction;
