//! # CLI Interface
//!
//! Defines the command-line argument structure for `fct` using `clap`
//! derive. Supports five subcommands: `keygen`, `validate`, `public`, `fee`
//! and `transfer`.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

/// Default exchange rate: factoshis per entry credit.
pub const DEFAULT_EC_RATE: u64 = 1_000;

/// Offline factoid wallet tools.
///
/// Derives keys and addresses, checks address strings, estimates fees and
/// builds signed transactions. Nothing is sent to the network; `transfer`
/// prints the signed bytes for submission elsewhere.
#[derive(Parser, Debug)]
#[command(
    name = "fct",
    about = "Offline factoid wallet tools",
    version,
    propagate_version = true
)]
pub struct FctCli {
    /// Log output format on stderr.
    #[arg(long, global = true, env = "FCT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a private key and print its four addresses.
    Keygen(KeygenArgs),
    /// Check the prefix and checksum of an address.
    Validate(ValidateArgs),
    /// Print the public address of a private address.
    Public(PublicArgs),
    /// Estimate the fee of a transaction shape.
    Fee(FeeArgs),
    /// Build and sign a single-input transfer.
    Transfer(TransferArgs),
}

/// Arguments for the `keygen` subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Hex-encoded 32-byte seed. A fresh random key is used when omitted.
    #[arg(long)]
    pub seed: Option<String>,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Address to check (`FA`, `Fs`, `EC` or `Es`).
    pub address: String,
}

/// Arguments for the `public` subcommand.
#[derive(Args, Debug)]
pub struct PublicArgs {
    /// Private address (`Fs...` or `Es...`).
    ///
    /// Read from the environment when omitted so it stays out of shell history.
    #[arg(env = "FCT_PRIVATE_KEY", hide_env_values = true)]
    pub private_address: String,
}

/// Arguments for the `fee` subcommand.
#[derive(Args, Debug)]
pub struct FeeArgs {
    /// Number of inputs.
    #[arg(long, default_value_t = 1)]
    pub inputs: usize,

    /// Number of factoid outputs.
    #[arg(long, default_value_t = 1)]
    pub outputs: usize,

    /// Number of entry-credit outputs.
    #[arg(long, default_value_t = 0)]
    pub ec_outputs: usize,

    /// Amount per entry, in factoshis. Larger amounts take more varint bytes.
    #[arg(long, default_value_t = 0)]
    pub amount: u64,

    #[command(flatten)]
    pub rate: RateArgs,
}

/// Arguments for the `transfer` subcommand.
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Private address paying for the transfer (`Fs...`).
    #[arg(long, env = "FCT_PRIVATE_KEY", hide_env_values = true)]
    pub from: String,

    /// Receiving address: `FA...` for factoids, `EC...` to buy entry credits.
    #[arg(long)]
    pub to: String,

    /// Amount to send, in factoshis.
    #[arg(long)]
    pub amount: u64,

    /// Which side pays the fee.
    #[arg(long, value_enum, default_value_t = FeePayer::Sender)]
    pub fee_from: FeePayer,

    /// Fixed timestamp in milliseconds. Defaults to now.
    #[arg(long)]
    pub timestamp: Option<u64>,

    #[command(flatten)]
    pub rate: RateArgs,
}

/// Exchange rate shared by `fee` and `transfer`.
#[derive(Args, Debug)]
pub struct RateArgs {
    /// Factoshis per entry credit.
    #[arg(long, env = "FCT_EC_RATE", default_value_t = DEFAULT_EC_RATE)]
    pub ec_rate: u64,
}

/// Who the fee is charged to.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePayer {
    /// Added on top of the input amount.
    Sender,
    /// Taken out of the output amount.
    Receiver,
}
