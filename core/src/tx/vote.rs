// Copyright (c) 2024-2025 The Solar Network Developers

//! Vote asset
//!
//! ```text
//! | VOTE_COUNT (1) | COUNT * ( NAME_LEN (1) | NAME (NAME_LEN) | PERCENT (2) ) |
//! ```
//!
//! A count of zero cancels the current vote and carries no records.
//! Otherwise the percentages of all records must sum to exactly 10000
//! (100.00%).

use super::{ParseError, Reader};
use crate::helpers::check_ascii;

/// Vote count signalling a cancel vote
pub const CANCEL_VOTE_COUNT: u8 = 0;

const VOTE_COUNT_MAX: u8 = 53;

const USERNAME_LEN_MIN: u8 = 1;
const USERNAME_LEN_MAX: u8 = 20;

const PERCENT_MIN: u16 = 1;
const PERCENT_MAX: u16 = 10_000;

/// A single vote record
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Vote<'a> {
    /// Block producer username (printable ASCII, 1..=20 bytes)
    pub username: &'a str,

    /// Vote weight in hundredths of a percent, 1..=10000
    pub percent: u16,
}

/// Vote asset, either a cancel vote (zero records) or 1..=53 weighted
/// votes summing to exactly 100%
#[derive(Clone, PartialEq, Debug)]
pub struct VoteAsset<'a> {
    count: u8,
    votes: &'a [u8],
}

impl<'a> VoteAsset<'a> {
    /// Parse a vote asset from the reader, validating every record
    pub fn parse(r: &mut Reader<'a>) -> Result<Self, ParseError> {
        let count = r.read_u8()?;

        if count == CANCEL_VOTE_COUNT {
            return Ok(Self { count, votes: &[] });
        }

        if count > VOTE_COUNT_MAX {
            return Err(ParseError::BadAsset);
        }

        let start = r.offset();

        // Per-record percentages are bounded by 10000 but 53 of them can
        // exceed u16::MAX, so the running total must be wider
        let mut total_percent: u32 = 0;

        for _ in 0..count {
            let (_, percent) = parse_vote(r)?;
            total_percent += percent as u32;
        }

        if total_percent != PERCENT_MAX as u32 {
            return Err(ParseError::BadAsset);
        }

        // Keep the validated record region for lazy iteration
        let votes = r.window(start);

        Ok(Self { count, votes })
    }

    /// Number of vote records (zero for a cancel vote)
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Returns true when the asset cancels the current vote
    pub fn is_cancel(&self) -> bool {
        self.count == CANCEL_VOTE_COUNT
    }

    /// Iterate over vote records
    pub fn iter(&self) -> VoteIter<'a> {
        VoteIter {
            reader: Reader::new(self.votes),
            remaining: self.count,
        }
    }
}

/// Iterator over validated vote records
pub struct VoteIter<'a> {
    reader: Reader<'a>,
    remaining: u8,
}

impl<'a> Iterator for VoteIter<'a> {
    type Item = Vote<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        // Records were validated during parse
        parse_vote(&mut self.reader)
            .ok()
            .map(|(username, percent)| Vote { username, percent })
    }
}

/// Read and validate a single vote record
fn parse_vote<'a>(r: &mut Reader<'a>) -> Result<(&'a str, u16), ParseError> {
    let name_len = r.read_u8()?;
    if !(USERNAME_LEN_MIN..=USERNAME_LEN_MAX).contains(&name_len) {
        return Err(ParseError::BadAsset);
    }

    let name = r.read_bytes(name_len as usize)?;
    if !check_ascii(name, false) {
        return Err(ParseError::BadAsset);
    }

    let percent = r.read_u16()?;
    if !(PERCENT_MIN..=PERCENT_MAX).contains(&percent) {
        return Err(ParseError::BadAsset);
    }

    let username = core::str::from_utf8(name).map_err(|_| ParseError::BadAsset)?;

    Ok((username, percent))
}
