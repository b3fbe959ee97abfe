// Copyright (c) 2024-2025 The Solar Network Developers

//! Application name / version APDUs

use encdec::{Decode, DecodeOwned, Encode};

use super::{ApduError, ApduStatic, Instruction, SOLAR_APDU_CLA};

/// Fetch application name APDU
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct AppNameReq {}

impl ApduStatic for AppNameReq {
    const CLA: u8 = SOLAR_APDU_CLA;
    const INS: u8 = Instruction::GetAppName as u8;
}

impl Encode for AppNameReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn encode(&self, _buff: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl DecodeOwned for AppNameReq {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(_buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        Ok((Self {}, 0))
    }
}

/// Application name response APDU
///
/// ## Encoding:
/// ```text
/// | NAME (ascii, variable) |
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AppNameResp<'a> {
    /// Application name
    pub name: &'a str,
}

impl<'a> AppNameResp<'a> {
    /// Create a new [`AppNameResp`] APDU
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }
}

impl<'a> Encode for AppNameResp<'a> {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.name.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let d = self.name.as_bytes();

        if buff.len() < d.len() {
            return Err(ApduError::InvalidLength);
        }

        buff[..d.len()].copy_from_slice(d);

        Ok(d.len())
    }
}

impl<'a> Decode<'a> for AppNameResp<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        let name = core::str::from_utf8(buff).map_err(|_| ApduError::InvalidEncoding)?;

        Ok((Self { name }, buff.len()))
    }
}

/// Fetch application version APDU
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct VersionReq {}

impl ApduStatic for VersionReq {
    const CLA: u8 = SOLAR_APDU_CLA;
    const INS: u8 = Instruction::GetVersion as u8;
}

impl Encode for VersionReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn encode(&self, _buff: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl DecodeOwned for VersionReq {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(_buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        Ok((Self {}, 0))
    }
}

/// Application version response APDU
///
/// ## Encoding:
/// ```text
/// | MAJOR (1) | MINOR (1) | PATCH (1) |
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct VersionResp {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Patch version
    pub patch: u8,
}

impl VersionResp {
    /// Create a new [`VersionResp`] APDU
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}
