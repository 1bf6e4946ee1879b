//! Entry-credit fee calculation and fee adjustment on inputs and outputs.
//!
//! ```text
//! size   = len(unsigned body) + inputs * 97
//! ec_fee = ceil(size / 1024) * 1 + (outputs + ec_outputs) * 10 + inputs * 1
//! fee    = ec_fee * ec_rate            (factoshis)
//! ```
//!
//! The size term assumes every input will carry a type-1 RCD and one
//! signature, so the fee is the same before and after signing.

use tracing::debug;

use super::builder::Transaction;
use super::error::TransactionError;
use crate::address::Address;
use crate::config::{
    FEE_PER_KIB, FEE_PER_OUTPUT, FEE_PER_SIGNATURE, FEE_SIZE_UNIT, SIGNATURE_BLOCK_LENGTH,
};

impl Transaction {
    /// Fee in entry credits.
    pub fn calculate_ec_fee(&self) -> Result<u64, TransactionError> {
        let body_len = self.marshal_unsigned()?.len() as u64;
        let inputs = self.inputs.len() as u64;
        let outputs = (self.outputs.len() + self.ec_outputs.len()) as u64;

        let size = body_len + inputs * SIGNATURE_BLOCK_LENGTH as u64;
        let fee = size.div_ceil(FEE_SIZE_UNIT) * FEE_PER_KIB
            + outputs * FEE_PER_OUTPUT
            + inputs * FEE_PER_SIGNATURE;
        Ok(fee)
    }

    /// Fee in factoshis at `ec_rate` factoshis per entry credit.
    pub fn calculate_fee(&self, ec_rate: u64) -> Result<u64, TransactionError> {
        self.calculate_ec_fee()?
            .checked_mul(ec_rate)
            .ok_or(TransactionError::FeeOverflow)
    }

    /// Add the fee to the input at `address`, returning the fee charged.
    pub fn try_add_fee(&mut self, address: &str, ec_rate: u64) -> Result<u64, TransactionError> {
        let fee = self.calculate_fee(ec_rate)?;
        let index = position(&self.inputs, address).ok_or_else(|| {
            TransactionError::AddressNotFound {
                address: address.to_string(),
            }
        })?;

        let amount = self.inputs[index].amount();
        let updated = amount
            .checked_add(fee)
            .ok_or(TransactionError::FeeOverflow)?;

        self.invalidate_signatures("fee added");
        self.inputs[index].set_amount(updated);
        debug!(address, fee, amount = updated, "fee added to input");
        Ok(fee)
    }

    /// Like [`try_add_fee`](Self::try_add_fee), but an address that is not
    /// an input is `Ok(false)` rather than an error.
    pub fn add_fee(&mut self, address: &str, ec_rate: u64) -> Result<bool, TransactionError> {
        match self.try_add_fee(address, ec_rate) {
            Ok(_) => Ok(true),
            Err(TransactionError::AddressNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Subtract the fee from the output or EC output at `address`,
    /// returning the fee charged.
    ///
    /// Factoid outputs are searched before EC outputs.
    pub fn try_sub_fee(&mut self, address: &str, ec_rate: u64) -> Result<u64, TransactionError> {
        let fee = self.calculate_fee(ec_rate)?;
        let target = match position(&self.outputs, address) {
            Some(index) => &mut self.outputs[index],
            None => match position(&self.ec_outputs, address) {
                Some(index) => &mut self.ec_outputs[index],
                None => {
                    return Err(TransactionError::AddressNotFound {
                        address: address.to_string(),
                    })
                }
            },
        };

        let amount = target.amount();
        let updated = amount
            .checked_sub(fee)
            .ok_or_else(|| TransactionError::InsufficientFunds {
                address: address.to_string(),
                amount,
                fee,
            })?;
        target.set_amount(updated);

        self.invalidate_signatures("fee subtracted");
        debug!(address, fee, amount = updated, "fee subtracted from output");
        Ok(fee)
    }

    /// Like [`try_sub_fee`](Self::try_sub_fee), but a missing address or an
    /// output too small to cover the fee is `Ok(false)`. The transaction is
    /// unchanged in both cases.
    pub fn sub_fee(&mut self, address: &str, ec_rate: u64) -> Result<bool, TransactionError> {
        match self.try_sub_fee(address, ec_rate) {
            Ok(_) => Ok(true),
            Err(TransactionError::AddressNotFound { .. })
            | Err(TransactionError::InsufficientFunds { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn position(entries: &[Address], address: &str) -> Option<usize> {
    entries.iter().position(|a| a.human_readable() == address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "FA2THnSmkrf7veBZ21u5bkT3xqKM3DBd8nQwByyNK3J4XEk16Byb";
    const OUTPUT: &str = "FA2bEwF9UB2WCYhqPXxKknHyxoju4g6Uwoa7jw3cHCfQuPNz75yo";
    const EC: &str = "EC2EvQzR53PkWfYYJSMETrVnfhSA5QKuTXQQm4TTsU9krxbGCNmY";

    fn one_in_one_out(amount: u64) -> Transaction {
        let mut tx = Transaction::with_timestamp(1_503_275_254_039);
        tx.add_input(INPUT, Some(amount)).unwrap();
        tx.add_output(OUTPUT, Some(amount)).unwrap();
        tx
    }

    #[test]
    fn empty_transaction_fee() {
        // 10-byte body rounds up to one KiB.
        let tx = Transaction::with_timestamp(0);
        assert_eq!(tx.calculate_ec_fee().unwrap(), 1);
    }

    #[test]
    fn one_input_one_output_fee() {
        let tx = one_in_one_out(10);
        assert_eq!(tx.calculate_ec_fee().unwrap(), 12);
        assert_eq!(tx.calculate_fee(1000).unwrap(), 12_000);
    }

    #[test]
    fn ec_outputs_cost_the_same_as_outputs() {
        let mut tx = one_in_one_out(10);
        tx.add_output(EC, Some(1)).unwrap();
        assert_eq!(tx.calculate_ec_fee().unwrap(), 22);
    }

    #[test]
    fn size_term_crosses_kib_boundary() {
        let mut tx = Transaction::with_timestamp(0);
        // 10 bytes header + 10 * (1 + 32 + 97) = 1310 bytes -> two KiB.
        for _ in 0..10 {
            tx.add_input(INPUT, Some(1)).unwrap();
        }
        assert_eq!(tx.calculate_ec_fee().unwrap(), 2 + 10);
    }

    #[test]
    fn fee_overflow_is_reported() {
        let tx = one_in_one_out(10);
        assert_eq!(tx.calculate_fee(u64::MAX), Err(TransactionError::FeeOverflow));
    }

    #[test]
    fn add_fee_increases_the_input() {
        let mut tx = one_in_one_out(10);
        assert_eq!(tx.add_fee(INPUT, 1000), Ok(true));
        assert_eq!(tx.inputs()[0].amount(), 10 + 12_000);
    }

    #[test]
    fn add_fee_on_unknown_address_is_false() {
        let mut tx = one_in_one_out(10);
        assert_eq!(tx.add_fee(OUTPUT, 1000), Ok(false));
        assert!(matches!(
            tx.try_add_fee(EC, 1000),
            Err(TransactionError::AddressNotFound { .. })
        ));
        assert_eq!(tx.inputs()[0].amount(), 10);
    }

    #[test]
    fn sub_fee_decreases_the_output() {
        let mut tx = one_in_one_out(20_000);
        assert_eq!(tx.try_sub_fee(OUTPUT, 1000), Ok(12_000));
        assert_eq!(tx.outputs()[0].amount(), 8_000);
    }

    #[test]
    fn sub_fee_finds_ec_outputs() {
        let mut tx = one_in_one_out(10);
        tx.add_output(EC, Some(1_000_000)).unwrap();
        assert_eq!(tx.sub_fee(EC, 1000), Ok(true));
        assert_eq!(tx.ec_outputs()[0].amount(), 1_000_000 - 22_000);
    }

    #[test]
    fn sub_fee_without_funds_leaves_output_alone() {
        let mut tx = one_in_one_out(10);
        assert_eq!(
            tx.try_sub_fee(OUTPUT, 1000),
            Err(TransactionError::InsufficientFunds {
                address: OUTPUT.to_string(),
                amount: 10,
                fee: 12_000,
            })
        );
        assert_eq!(tx.sub_fee(OUTPUT, 1000), Ok(false));
        assert_eq!(tx.sub_fee(INPUT, 1000), Ok(false));
        assert_eq!(tx.outputs()[0].amount(), 10);
    }
}
