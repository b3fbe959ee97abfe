// Copyright (c) 2024-2025 The Solar Network Developers

//! Checked cursor over serialised transaction bytes
//!
//! All multi-byte reads are little-endian. Reads that would pass the end
//! of the buffer fail with [`ParseError::Truncated`] and leave the offset
//! unchanged, so no partial read is ever committed.

use byteorder::{ByteOrder, LittleEndian};

use super::ParseError;

/// Read cursor over a borrowed byte buffer
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over the provided buffer
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Current offset into the buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read a fixed-length slice, advancing the cursor
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        if self.remaining() < n {
            return Err(ParseError::Truncated);
        }

        let b = &self.data[self.offset..][..n];
        self.offset += n;

        Ok(b)
    }

    /// Read a fixed-length array reference, advancing the cursor
    pub fn read_array<const N: usize>(&mut self) -> Result<&'a [u8; N], ParseError> {
        let b = self.read_bytes(N)?;

        // Infallible, read_bytes returned exactly N bytes
        b.try_into().map_err(|_| ParseError::Truncated)
    }

    /// Advance the cursor without reading
    pub fn skip(&mut self, n: usize) -> Result<(), ParseError> {
        if self.remaining() < n {
            return Err(ParseError::Truncated);
        }

        self.offset += n;

        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        let b = self.read_bytes(1)?;
        Ok(b[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ParseError> {
        let b = self.read_bytes(2)?;
        Ok(LittleEndian::read_u16(b))
    }

    pub fn read_u32(&mut self) -> Result<u32, ParseError> {
        let b = self.read_bytes(4)?;
        Ok(LittleEndian::read_u32(b))
    }

    pub fn read_u64(&mut self) -> Result<u64, ParseError> {
        let b = self.read_bytes(8)?;
        Ok(LittleEndian::read_u64(b))
    }

    /// Fetch the window between a prior offset and the current offset,
    /// empty if the range is invalid
    pub fn window(&self, start: usize) -> &'a [u8] {
        match self.data.get(start..self.offset) {
            Some(w) => w,
            None => &[],
        }
    }

    /// Require the buffer to be exactly consumed
    pub fn finish(&self) -> Result<(), ParseError> {
        match self.remaining() {
            0 => Ok(()),
            _ => Err(ParseError::TrailingData),
        }
    }
}
