// Copyright (c) 2024-2025 The Solar Network Developers

use encdec::Encode;
use ledger_proto::ApduError;

use ledger_solar_apdu::{
    address::AddressResp,
    app_info::{AppNameResp, VersionResp},
    public_key::PublicKeyResp,
    sign::SignatureResp,
    ADDRESS_LEN, CHAIN_CODE_LEN, PUBKEY_LEN, SIGNATURE_LEN,
};

/// [`Engine`][super::Engine] outputs (in response to events), encoded to
/// response APDUs for transmission
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    None,

    /// Acknowledge with a bare success status
    Ok,

    /// Indicate the device is waiting for user input; the response is
    /// deferred until [`approve`][super::Engine::approve] or
    /// [`deny`][super::Engine::deny]
    Pending,

    /// Application name
    AppName { name: &'static str },

    /// Application version
    Version { major: u8, minor: u8, patch: u8 },

    /// Derived public key (and chain code when requested)
    PublicKey {
        public_key: [u8; PUBKEY_LEN],
        chain_code: Option<[u8; CHAIN_CODE_LEN]>,
    },

    /// Encoded address string
    Address { address: [u8; ADDRESS_LEN] },

    /// Signature over the reference hash
    Signature { signature: [u8; SIGNATURE_LEN] },
}

impl Output {
    /// Encode an [`Output`] object to response data (the trailing status
    /// word is appended by the transport shell)
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        match self {
            Output::None | Output::Ok | Output::Pending => Ok(0),

            Output::AppName { name } => AppNameResp::new(name).encode(buff),

            Output::Version {
                major,
                minor,
                patch,
            } => VersionResp::new(*major, *minor, *patch).encode(buff),

            Output::PublicKey {
                public_key,
                chain_code,
            } => PublicKeyResp::new(*public_key, *chain_code).encode(buff),

            Output::Address { address } => {
                let s = core::str::from_utf8(&address[..])
                    .map_err(|_| ApduError::InvalidEncoding)?;
                AddressResp::new(s).encode(buff)
            }

            Output::Signature { signature } => SignatureResp::new(*signature).encode(buff),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_outputs_encode_nothing() {
        let mut buff = [0u8; 8];

        assert_eq!(Output::None.encode(&mut buff), Ok(0));
        assert_eq!(Output::Ok.encode(&mut buff), Ok(0));
        assert_eq!(Output::Pending.encode(&mut buff), Ok(0));
    }

    #[test]
    fn signature_output_encoding() {
        let mut buff = [0u8; 128];

        let o = Output::Signature {
            signature: [0xe1; SIGNATURE_LEN],
        };
        let n = o.encode(&mut buff).unwrap();

        assert_eq!(n, SIGNATURE_LEN);
        assert_eq!(&buff[..n], &[0xe1; SIGNATURE_LEN]);
    }

    #[test]
    fn pubkey_output_encoding() {
        let mut buff = [0u8; 128];

        let o = Output::PublicKey {
            public_key: [0xab; PUBKEY_LEN],
            chain_code: Some([0xcd; CHAIN_CODE_LEN]),
        };
        let n = o.encode(&mut buff).unwrap();

        assert_eq!(n, 2 + PUBKEY_LEN + CHAIN_CODE_LEN);
        assert_eq!(buff[0] as usize, PUBKEY_LEN);
    }
}
