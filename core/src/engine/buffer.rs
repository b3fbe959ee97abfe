// Copyright (c) 2024-2025 The Solar Network Developers

//! Append-only reassembly buffer for chunked transaction input
//!
//! Capacity is enforced at the API boundary: an append that would exceed
//! [`TRANSACTION_LEN_MAX`] is rejected whole, never truncated, leaving
//! the buffer contents untouched.

use heapless::Vec;
use zeroize::Zeroize;

use super::Error;
use crate::TRANSACTION_LEN_MAX;

/// Fixed-capacity buffer holding the reassembled raw transaction
pub struct TxBuffer {
    buf: Vec<u8, TRANSACTION_LEN_MAX>,
}

impl TxBuffer {
    /// Create a new (empty) buffer
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append a chunk, rejecting with [`Error::TxTooLarge`] if the
    /// result would exceed capacity
    pub fn append(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.buf.len() + data.len() > self.buf.capacity() {
            return Err(Error::TxTooLarge);
        }

        self.buf
            .extend_from_slice(data)
            .map_err(|_| Error::TxTooLarge)
    }

    /// Fetch the accumulated bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Number of accumulated bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been accumulated
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Remaining capacity in bytes
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Zero the accumulated bytes and empty the buffer
    pub fn clear(&mut self) {
        let s: &mut [u8] = &mut self.buf;
        s.zeroize();

        self.buf.clear();
    }

    #[cfg(test)]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Default for TxBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn append_and_overflow() {
        let mut b = TxBuffer::new();

        b.append(&[0xaa; 4000]).unwrap();
        assert_eq!(b.len(), 4000);

        // Over-capacity append is rejected whole
        assert_eq!(b.append(&[0xbb; 97]), Err(Error::TxTooLarge));
        assert_eq!(b.len(), 4000);
        assert!(b.as_slice().iter().all(|&v| v == 0xaa));

        // An exact fill still succeeds
        b.append(&[0xcc; 96]).unwrap();
        assert_eq!(b.len(), TRANSACTION_LEN_MAX);
    }

    #[test]
    fn clear_zeroes_contents() {
        let mut b = TxBuffer::new();
        b.append(&[0x5a; 128]).unwrap();

        b.clear();

        assert!(b.is_empty());

        // Refill and confirm no stale bytes leak through short appends
        b.append(&[0x01; 2]).unwrap();
        assert_eq!(b.as_slice(), &[0x01, 0x01]);
    }
}
