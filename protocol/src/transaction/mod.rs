//! # Factoid Transactions
//!
//! Build, fee, sign, marshal and parse factoid transactions.
//!
//! ## Architecture
//!
//! ```text
//! builder.rs   Transaction, inputs/outputs, wire format, transaction ID
//! fee.rs       Entry-credit fee and fee adjustment
//! signing.rs   Indexed input signing and signature verification
//! encoding.rs  Varints, six-byte timestamps, bounds-checked reader
//! types.rs     RCDs and signatures
//! error.rs     TransactionError
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: [`Transaction::new`], then [`add_input`](Transaction::add_input)
//!    and [`add_output`](Transaction::add_output).
//! 2. **Fee**: [`add_fee`](Transaction::add_fee) or [`sub_fee`](Transaction::sub_fee).
//! 3. **Sign**: [`sign`](Transaction::sign) each input by index.
//! 4. **Marshal**: [`marshal_signed`](Transaction::marshal_signed) for submission.

pub mod builder;
pub mod encoding;
pub mod error;
pub mod fee;
pub mod signing;
pub mod types;

pub use builder::{IntoAddress, Transaction};
pub use error::TransactionError;
pub use signing::{sign_transaction, IntoSecretKey};
pub use types::{Rcd, Signature, Witness};
