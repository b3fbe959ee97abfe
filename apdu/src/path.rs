// Copyright (c) 2024-2025 The Solar Network Developers

//! BIP32 derivation path wire type
//!
//! Paths are encoded as a component count followed by that many u32
//! (little-endian) components:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   NUM_COMPS   |                 COMPONENT_0                   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! /                     ... (2..=10 components)                   /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use byteorder::{ByteOrder, LittleEndian};
use encdec::{DecodeOwned, Encode};
use zeroize::Zeroize;

use crate::ApduError;

/// Minimum number of path components
pub const BIP32_PATH_MIN: usize = 2;

/// Maximum number of path components
pub const BIP32_PATH_MAX: usize = 10;

/// Hardened derivation flag
pub const HARDENED: u32 = 0x8000_0000;

/// BIP32 derivation path, between [BIP32_PATH_MIN] and [BIP32_PATH_MAX]
/// u32 components
#[derive(Clone, PartialEq, Default)]
pub struct DerivationPath {
    components: [u32; BIP32_PATH_MAX],
    len: u8,
}

impl DerivationPath {
    /// Create a derivation path from a component slice
    pub fn new(path: &[u32]) -> Result<Self, ApduError> {
        if path.len() < BIP32_PATH_MIN || path.len() > BIP32_PATH_MAX {
            return Err(ApduError::InvalidLength);
        }

        let mut components = [0u32; BIP32_PATH_MAX];
        components[..path.len()].copy_from_slice(path);

        Ok(Self {
            components,
            len: path.len() as u8,
        })
    }

    /// Fetch path components as a slice
    pub fn as_slice(&self) -> &[u32] {
        &self.components[..self.len as usize]
    }

    /// Number of components in the path
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true for a cleared / unset path
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clear the path, zeroing all components
    pub fn clear(&mut self) {
        self.components.zeroize();
        self.len = 0;
    }
}

impl AsRef<[u32]> for DerivationPath {
    fn as_ref(&self) -> &[u32] {
        self.as_slice()
    }
}

/// Debug format paths in `m/44'/3333'/0'` notation
impl core::fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "m")?;
        for c in self.as_slice() {
            if c & HARDENED != 0 {
                write!(f, "/{}'", c & !HARDENED)?;
            } else {
                write!(f, "/{c}")?;
            }
        }
        Ok(())
    }
}

impl Encode for DerivationPath {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(1 + self.len() * 4)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < 1 + self.len() * 4 {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = self.len;
        let mut index = 1;

        for c in self.as_slice() {
            LittleEndian::write_u32(&mut buff[index..], *c);
            index += 4;
        }

        Ok(index)
    }
}

impl DecodeOwned for DerivationPath {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), ApduError> {
        if buff.is_empty() {
            return Err(ApduError::InvalidLength);
        }

        let n = buff[0] as usize;
        if !(BIP32_PATH_MIN..=BIP32_PATH_MAX).contains(&n) {
            return Err(ApduError::InvalidEncoding);
        }
        if buff.len() < 1 + n * 4 {
            return Err(ApduError::InvalidLength);
        }

        let mut components = [0u32; BIP32_PATH_MAX];
        let mut index = 1;

        for c in components.iter_mut().take(n) {
            *c = LittleEndian::read_u32(&buff[index..]);
            index += 4;
        }

        Ok((
            Self {
                components,
                len: n as u8,
            },
            index,
        ))
    }
}
