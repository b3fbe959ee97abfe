// Copyright (c) 2024-2025 The Solar Network Developers

//! Burn asset
//!
//! ```text
//! | AMOUNT (8) |
//! ```

use super::{ParseError, Reader};

/// Burn asset, a single amount
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct BurnAsset {
    /// Amount burned, in base units
    pub amount: u64,
}

impl BurnAsset {
    /// Parse a burn asset from the reader
    pub fn parse(r: &mut Reader<'_>) -> Result<Self, ParseError> {
        let amount = r.read_u64()?;

        Ok(Self { amount })
    }
}
