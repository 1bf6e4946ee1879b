//! Subcommand implementations.
//!
//! Each command returns a serializable report; `main` prints it as JSON on
//! stdout.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use factoid_protocol::address::{self, Address, AddressKind, Asset};
use factoid_protocol::crypto::keys::FactoidKeypair;
use factoid_protocol::transaction::Transaction;

use crate::cli::{FeeArgs, FeePayer, KeygenArgs, PublicArgs, TransferArgs, ValidateArgs};

// ---------------------------------------------------------------------------
// keygen
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct KeygenReport {
    pub public_key: String,
    pub factoid_private: String,
    pub factoid_public: String,
    pub ec_private: String,
    pub ec_public: String,
}

pub fn keygen(args: &KeygenArgs) -> Result<KeygenReport> {
    let keypair = match &args.seed {
        Some(seed) => FactoidKeypair::from_hex(seed).context("invalid --seed")?,
        None => FactoidKeypair::generate(),
    };
    info!(public_key = %keypair.public_key_hex(), "key generated");

    Ok(KeygenReport {
        public_key: keypair.public_key_hex(),
        factoid_private: keypair.private_address(Asset::Factoid),
        factoid_public: keypair.public_address(Asset::Factoid),
        ec_private: keypair.private_address(Asset::EntryCredit),
        ec_public: keypair.public_address(Asset::EntryCredit),
    })
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ValidateReport {
    pub address: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<AddressKind>,
}

pub fn validate(args: &ValidateArgs) -> ValidateReport {
    let kind = args
        .address
        .parse::<Address>()
        .ok()
        .map(|address| address.kind());
    ValidateReport {
        address: args.address.clone(),
        valid: address::validate(&args.address),
        kind,
    }
}

// ---------------------------------------------------------------------------
// public
// ---------------------------------------------------------------------------

pub fn public(args: &PublicArgs) -> Result<String> {
    let private: Address = args
        .private_address
        .parse()
        .context("not a valid address")?;
    if !private.is_private() {
        bail!("expected a private address (Fs... or Es...), got {}", private.kind());
    }
    Ok(private.to_public().human_readable())
}

// ---------------------------------------------------------------------------
// fee
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FeeReport {
    pub ec_fee: u64,
    pub fee: u64,
    pub ec_rate: u64,
}

pub fn fee(args: &FeeArgs) -> Result<FeeReport> {
    // Amounts and counts decide the fee; the RCD hashes do not.
    let mut tx = Transaction::with_timestamp(0);
    for _ in 0..args.inputs {
        tx.add_input(([0u8; 32], Asset::Factoid), Some(args.amount))?;
    }
    for _ in 0..args.outputs {
        tx.add_output(([0u8; 32], Asset::Factoid), Some(args.amount))?;
    }
    for _ in 0..args.ec_outputs {
        tx.add_output(([0u8; 32], Asset::EntryCredit), Some(args.amount))?;
    }

    Ok(FeeReport {
        ec_fee: tx.calculate_ec_fee()?,
        fee: tx.calculate_fee(args.rate.ec_rate)?,
        ec_rate: args.rate.ec_rate,
    })
}

// ---------------------------------------------------------------------------
// transfer
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TransferReport {
    pub transaction_id: String,
    pub timestamp: u64,
    pub ec_fee: u64,
    pub fee: u64,
    pub inputs: Vec<Address>,
    pub outputs: Vec<Address>,
    pub ec_outputs: Vec<Address>,
    pub hex: String,
}

pub fn transfer(args: &TransferArgs) -> Result<TransferReport> {
    let sender: Address = args.from.parse().context("invalid --from address")?;
    if sender.kind() != AddressKind::FactoidPrivate {
        bail!("--from must be a factoid private address (Fs...)");
    }
    let sender_public = sender.to_public().human_readable();

    let mut tx = match args.timestamp {
        Some(millis) => Transaction::with_timestamp(millis),
        None => Transaction::new(),
    };
    tx.add_input(&sender, Some(args.amount))?;
    tx.add_output(args.to.as_str(), Some(args.amount))
        .context("invalid --to address")?;

    let ec_rate = args.rate.ec_rate;
    let ec_fee = tx.calculate_ec_fee()?;
    let fee = match args.fee_from {
        FeePayer::Sender => tx.try_add_fee(&sender_public, ec_rate)?,
        FeePayer::Receiver => tx.try_sub_fee(&args.to, ec_rate)?,
    };

    tx.sign(0, sender.body())?;
    tx.verify_signatures()?;

    let transaction_id = tx.transaction_id()?;
    info!(
        transaction_id = %transaction_id,
        from = %sender_public,
        to = %args.to,
        amount = args.amount,
        fee,
        "transfer signed"
    );

    Ok(TransferReport {
        transaction_id,
        timestamp: tx.timestamp(),
        ec_fee,
        fee,
        inputs: tx.inputs().to_vec(),
        outputs: tx.outputs().to_vec(),
        ec_outputs: tx.ec_outputs().to_vec(),
        hex: hex::encode(tx.marshal_signed()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RateArgs;

    const ZERO_FS: &str = "Fs1KWJrpLdfucvmYwN2nWrwepLn8ercpMbzXshd1g8zyhKXLVLWj";
    const ZERO_FA: &str = "FA1zT4aFpEvcnPqPCigB3fvGu4Q4mTXY22iiuV69DqE1pNhdF2MC";
    const OUTPUT: &str = "FA2bEwF9UB2WCYhqPXxKknHyxoju4g6Uwoa7jw3cHCfQuPNz75yo";

    fn transfer_args(fee_from: FeePayer, amount: u64) -> TransferArgs {
        TransferArgs {
            from: ZERO_FS.to_string(),
            to: OUTPUT.to_string(),
            amount,
            fee_from,
            timestamp: Some(1_503_275_254_039),
            rate: RateArgs { ec_rate: 1_000 },
        }
    }

    #[test]
    fn keygen_from_zero_seed() {
        let report = keygen(&KeygenArgs {
            seed: Some("00".repeat(32)),
        })
        .unwrap();
        assert_eq!(report.factoid_private, ZERO_FS);
        assert_eq!(report.factoid_public, ZERO_FA);
        assert_eq!(
            report.ec_public,
            "EC1nXH7GTGzVN61Kft42Ns4Qrpo1pBqQq9hP1pniFmEqmmXa9UYF"
        );
    }

    #[test]
    fn keygen_rejects_bad_seed() {
        assert!(keygen(&KeygenArgs {
            seed: Some("abcd".into())
        })
        .is_err());
    }

    #[test]
    fn validate_reports_kind() {
        let good = validate(&ValidateArgs {
            address: OUTPUT.into(),
        });
        assert!(good.valid);
        assert_eq!(good.kind, Some(AddressKind::FactoidPublic));

        let bad = validate(&ValidateArgs {
            address: "FA2bEwF9UB2WCYhqPXxKknHyxoju4g6Uwoa7jw3cHCfQuPNz75yp".into(),
        });
        assert!(!bad.valid);
        assert!(bad.kind.is_none());
    }

    #[test]
    fn public_of_private() {
        let args = PublicArgs {
            private_address: ZERO_FS.into(),
        };
        assert_eq!(public(&args).unwrap(), ZERO_FA);
        assert!(public(&PublicArgs {
            private_address: ZERO_FA.into()
        })
        .is_err());
    }

    #[test]
    fn fee_of_one_to_one() {
        let report = fee(&FeeArgs {
            inputs: 1,
            outputs: 1,
            ec_outputs: 0,
            amount: 10,
            rate: RateArgs { ec_rate: 1_000 },
        })
        .unwrap();
        assert_eq!(report.ec_fee, 12);
        assert_eq!(report.fee, 12_000);
    }

    #[test]
    fn transfer_sender_pays() {
        let report = transfer(&transfer_args(FeePayer::Sender, 100_000)).unwrap();
        assert_eq!(report.fee, 12_000);
        assert_eq!(report.inputs[0].amount(), 112_000);
        assert_eq!(report.inputs[0].human_readable(), ZERO_FA);
        assert_eq!(report.outputs[0].amount(), 100_000);

        let bytes = hex::decode(&report.hex).unwrap();
        let parsed = Transaction::unmarshal(&bytes).unwrap();
        parsed.verify_signatures().unwrap();
        assert_eq!(parsed.transaction_id().unwrap(), report.transaction_id);
    }

    #[test]
    fn transfer_receiver_pays() {
        let report = transfer(&transfer_args(FeePayer::Receiver, 100_000)).unwrap();
        assert_eq!(report.inputs[0].amount(), 100_000);
        assert_eq!(report.outputs[0].amount(), 88_000);
        assert!(transfer(&transfer_args(FeePayer::Receiver, 5)).is_err());
    }

    #[test]
    fn transfer_rejects_public_sender() {
        let mut args = transfer_args(FeePayer::Sender, 1);
        args.from = ZERO_FA.into();
        assert!(transfer(&args).is_err());
    }

    #[test]
    fn transfer_report_serializes() {
        let report = transfer(&transfer_args(FeePayer::Sender, 1)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["inputs"][0]["address"], ZERO_FA);
        assert_eq!(json["outputs"][0]["amount"], 1);
    }
}
