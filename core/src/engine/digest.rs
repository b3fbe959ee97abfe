// Copyright (c) 2024-2025 The Solar Network Developers

//! Reference hash over the reassembled transaction
//!
//! The digest is captured exactly once, when the final chunk of a
//! signing request arrives, and re-verified against the same buffer
//! window before the parsed content is displayed and again immediately
//! before signing. The repeated checks are intentional redundancy
//! against memory corruption between parse completion and signature;
//! the engine must never sign over bytes other than the ones hashed
//! here.

use sha2::{Digest as _, Sha256};
use zeroize::Zeroize;

use super::Error;

/// Reference hash length
pub const DIGEST_LEN: usize = 32;

/// SHA-256 reference hash of the reassembled raw transaction
#[derive(Clone, PartialEq)]
pub struct TxDigest {
    hash: [u8; DIGEST_LEN],
    set: bool,
}

impl TxDigest {
    /// Create a new (unset) digest
    pub const fn new() -> Self {
        Self {
            hash: [0u8; DIGEST_LEN],
            set: false,
        }
    }

    /// Capture the digest of the provided buffer
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn compute(data: &[u8]) -> Self {
        let mut hash = [0u8; DIGEST_LEN];

        let r = Sha256::new().chain_update(data).finalize();
        hash.copy_from_slice(r.as_ref());

        Self { hash, set: true }
    }

    /// Recompute the digest over the provided buffer and compare with
    /// the captured value, failing on any difference (or if no digest
    /// was ever captured)
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn verify(&self, data: &[u8]) -> Result<(), Error> {
        if !self.set || Self::compute(data).hash != self.hash {
            return Err(Error::HashMismatch);
        }

        Ok(())
    }

    /// Fetch the captured hash bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.hash
    }

    /// Returns true once a digest has been captured
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Zero and unset the digest
    pub fn clear(&mut self) {
        self.hash.zeroize();
        self.set = false;
    }
}

impl Default for TxDigest {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug format [TxDigest] as hex
impl core::fmt::Debug for TxDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in &self.hash[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
