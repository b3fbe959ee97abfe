// Copyright (c) 2024-2025 The Solar Network Developers

//! Transfer asset, an ordered sequence of payments
//!
//! ```text
//! | PAYMENT_COUNT (2) | COUNT * ( AMOUNT (8) | RECIPIENT (21) ) |
//! ```

use byteorder::{ByteOrder, LittleEndian};
use ledger_solar_apdu::PUBKEY_HASH_LEN;

use super::{ParseError, Reader};

/// Serialised length of a single payment record
pub const PAYMENT_LEN: usize = 8 + PUBKEY_HASH_LEN;

const PAYMENT_COUNT_MIN: u16 = 1;
const PAYMENT_COUNT_MAX: u16 = 127;

/// A single payment within a transfer
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Payment<'a> {
    /// Amount in base units
    pub amount: u64,

    /// Recipient address hash (network byte + RIPEMD-160)
    pub recipient: &'a [u8; PUBKEY_HASH_LEN],
}

/// Transfer asset, 1..=127 payments
///
/// The payment records are captured as one borrowed slice and
/// materialised lazily; recipient hashes and amounts are validated
/// downstream when rendered for display, not at parse time.
#[derive(Clone, PartialEq, Debug)]
pub struct TransferAsset<'a> {
    count: u16,
    payments: &'a [u8],
}

impl<'a> TransferAsset<'a> {
    /// Parse a transfer asset from the reader
    pub fn parse(r: &mut Reader<'a>) -> Result<Self, ParseError> {
        let count = r.read_u16()?;

        if !(PAYMENT_COUNT_MIN..=PAYMENT_COUNT_MAX).contains(&count) {
            return Err(ParseError::BadAsset);
        }

        let payments = r.read_bytes(count as usize * PAYMENT_LEN)?;

        Ok(Self { count, payments })
    }

    /// Number of payments in the transfer
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Fetch a payment record by index
    pub fn payment(&self, index: u16) -> Option<Payment<'a>> {
        if index >= self.count {
            return None;
        }

        let rec = &self.payments[index as usize * PAYMENT_LEN..][..PAYMENT_LEN];

        let amount = LittleEndian::read_u64(&rec[..8]);
        let recipient = rec[8..].try_into().ok()?;

        Some(Payment { amount, recipient })
    }

    /// Iterate over payment records
    pub fn iter(&self) -> impl Iterator<Item = Payment<'a>> + '_ {
        (0..self.count).filter_map(|i| self.payment(i))
    }
}
