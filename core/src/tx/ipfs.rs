// Copyright (c) 2024-2025 The Solar Network Developers

//! IPFS asset
//!
//! ```text
//! | HASH_FN (1) | DIGEST_LEN (1) | DIGEST (DIGEST_LEN) |
//! ```
//!
//! The hash-function tag and length byte are opaque multihash framing;
//! the digest is kept as a borrowed slice and the framed length is
//! recoverable as `digest.len() + 2`.

use super::{ParseError, Reader};

const IPFS_HASH_FN_LEN: usize = 1;
const IPFS_DIGEST_LEN_MIN: u8 = 1;
const IPFS_DIGEST_LEN_MAX: u8 = 64;

/// IPFS asset, a content-hash digest of 1..=64 bytes
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct IpfsAsset<'a> {
    digest: &'a [u8],
}

impl<'a> IpfsAsset<'a> {
    /// Parse an IPFS asset from the reader
    pub fn parse(r: &mut Reader<'a>) -> Result<Self, ParseError> {
        // Hash-function tag, not interpreted
        r.skip(IPFS_HASH_FN_LEN)?;

        let len = r.read_u8()?;
        if !(IPFS_DIGEST_LEN_MIN..=IPFS_DIGEST_LEN_MAX).contains(&len) {
            return Err(ParseError::BadLength);
        }

        let digest = r.read_bytes(len as usize)?;

        Ok(Self { digest })
    }

    /// Content-hash digest bytes
    pub fn digest(&self) -> &'a [u8] {
        self.digest
    }

    /// Framed multihash length (tag + length byte + digest)
    pub fn framed_len(&self) -> usize {
        self.digest.len() + 2
    }
}
