// Copyright (c) 2024-2025 The Solar Network Developers

//! The [Engine] provides the signing session state machine for Solar
//! hardware wallets.
//!
//! This handles [Event] inputs and returns [Output] responses to the
//! caller, see [apdu][crate::apdu] for APDU protocol / encoding
//! specifications. Platform cryptography is provided via the [Driver]
//! trait.
//!
//! A session is a single in-flight request. It is reset at engine
//! construction, at the start of every request, and unconditionally
//! after a response is emitted (success, rejection, or error), zeroing
//! the reassembly buffer, derivation path, and key material so nothing
//! survives across requests.

use strum::{Display, EnumIter, EnumString, EnumVariantNames};
use zeroize::Zeroize;

use ledger_solar_apdu::{
    path::DerivationPath, Network, ADDRESS_LEN, CHAIN_CODE_LEN, PUBKEY_LEN, SIGNATURE_LEN,
};

use crate::tx::{Message, Transaction};

mod buffer;
pub use buffer::TxBuffer;

mod digest;
pub use digest::{TxDigest, DIGEST_LEN};

mod error;
pub use error::Error;

mod event;
pub use event::Event;

mod output;
pub use output::Output;

/// Session lifecycle states, linear with no cycles; any state resets to
/// [State::Init]
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// No parsed data, reassembly may be in progress
    Init,

    /// Payload reassembled, hashed, and parsed; awaiting user decision
    Parsed,

    /// User approved and the signature was produced
    Approved,
}

/// Kind of request being confirmed by the current session
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum RequestKind {
    /// No request in flight
    None,

    /// Public key request
    PublicKey,

    /// Address request
    Address,

    /// Transaction signing request
    Transaction,

    /// Message signing request
    Message,
}

/// Derived public key material held while a key or address request
/// awaits confirmation
struct PubkeyInfo {
    public_key: [u8; PUBKEY_LEN],
    chain_code: [u8; CHAIN_CODE_LEN],
    use_chain_code: bool,
}

impl PubkeyInfo {
    const fn new() -> Self {
        Self {
            public_key: [0u8; PUBKEY_LEN],
            chain_code: [0u8; CHAIN_CODE_LEN],
            use_chain_code: false,
        }
    }

    fn clear(&mut self) {
        self.public_key.zeroize();
        self.chain_code.zeroize();
        self.use_chain_code = false;
    }
}

/// [`Driver`] trait provides platform cryptography for [`Engine`]
/// instances: key derivation, address encoding, and BIP340 signing are
/// performed by the secure element, not by this crate.
pub trait Driver {
    /// Derive the compressed secp256k1 public key and chain code for a
    /// BIP32 path
    fn derive_public_key(
        &self,
        path: &[u32],
    ) -> Result<([u8; PUBKEY_LEN], [u8; CHAIN_CODE_LEN]), Error>;

    /// Encode the base58check address for a public key on a network
    fn address(
        &self,
        public_key: &[u8; PUBKEY_LEN],
        network: Network,
    ) -> Result<[u8; ADDRESS_LEN], Error>;

    /// Produce a BIP340 Schnorr signature over a 32-byte hash with the
    /// key at the given path
    fn sign_hash(&self, path: &[u32], hash: &[u8; DIGEST_LEN])
        -> Result<[u8; SIGNATURE_LEN], Error>;
}

impl<T: Driver> Driver for &T {
    fn derive_public_key(
        &self,
        path: &[u32],
    ) -> Result<([u8; PUBKEY_LEN], [u8; CHAIN_CODE_LEN]), Error> {
        T::derive_public_key(self, path)
    }

    fn address(
        &self,
        public_key: &[u8; PUBKEY_LEN],
        network: Network,
    ) -> Result<[u8; ADDRESS_LEN], Error> {
        T::address(self, public_key, network)
    }

    fn sign_hash(
        &self,
        path: &[u32],
        hash: &[u8; DIGEST_LEN],
    ) -> Result<[u8; SIGNATURE_LEN], Error> {
        T::sign_hash(self, path, hash)
    }
}

/// [Engine] provides hardware-independent support for Solar wallet
/// operations over a single mutable session
pub struct Engine<DRV: Driver> {
    state: State,
    request: RequestKind,

    chunk: u8,

    path: DerivationPath,
    network: Network,
    pubkey: PubkeyInfo,

    buffer: TxBuffer,
    digest: TxDigest,

    drv: DRV,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver
    pub fn new(drv: DRV) -> Self {
        Self {
            state: State::Init,
            request: RequestKind::None,
            chunk: 0,
            path: DerivationPath::default(),
            network: Network::Mainnet,
            pubkey: PubkeyInfo::new(),
            buffer: TxBuffer::new(),
            digest: TxDigest::new(),
            drv,
        }
    }

    /// Handle an incoming event, returning response data or the error
    /// to surface as a status word.
    ///
    /// Rejected transitions leave the session untouched; resets happen
    /// only where the protocol specifies them (request start, terminal
    /// responses).
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:02x?}", evt);

        match evt {
            Event::None => Ok(Output::None),

            Event::GetAppName => Ok(Output::AppName {
                name: crate::APP_NAME,
            }),

            Event::GetVersion => Ok(Output::Version {
                major: crate::APP_VERSION_MAJOR,
                minor: crate::APP_VERSION_MINOR,
                patch: crate::APP_VERSION_PATCH,
            }),

            Event::GetPublicKey {
                path,
                confirm,
                chain_code,
            } => self.start_pubkey(path, *confirm, *chain_code),

            Event::GetAddress {
                path,
                confirm,
                network,
            } => self.start_address(path, *confirm, *network),

            Event::SignStart { kind, path } => self.sign_start(*kind, path),

            Event::SignChunk {
                kind,
                index,
                more,
                data,
            } => self.sign_chunk(*kind, *index, *more, data),
        }
    }

    /// Fetch current session state
    pub fn state(&self) -> State {
        self.state
    }

    /// Fetch the kind of request in flight
    pub fn request(&self) -> RequestKind {
        self.request
    }

    /// Number of raw bytes accumulated for the current request
    pub fn raw_len(&self) -> usize {
        self.buffer.len()
    }

    /// Fetch the reference digest for the current request
    pub fn digest(&self) -> &TxDigest {
        &self.digest
    }

    /// Fetch the parsed transaction for display, re-verifying the
    /// reference hash first.
    ///
    /// The returned value borrows the session buffer and is re-parsed
    /// from the very bytes the reference hash covers.
    pub fn transaction(&self) -> Result<Transaction<'_>, Error> {
        if self.state == State::Init || self.request != RequestKind::Transaction {
            return Err(Error::BadState);
        }

        self.digest.verify(self.buffer.as_slice())?;

        Transaction::deserialise(self.buffer.as_slice()).map_err(Error::Parse)
    }

    /// Fetch the parsed message for display, re-verifying the reference
    /// hash first
    pub fn message(&self) -> Result<Message<'_>, Error> {
        if self.state == State::Init || self.request != RequestKind::Message {
            return Err(Error::BadState);
        }

        self.digest.verify(self.buffer.as_slice())?;

        Message::deserialise(self.buffer.as_slice()).map_err(Error::Parse)
    }

    /// Approve the pending request (external user event).
    ///
    /// For signing requests this re-verifies the reference hash
    /// immediately before the signature is produced; the session is
    /// reset once the response output is built.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn approve(&mut self) -> Result<Output, Error> {
        let output = match self.request {
            RequestKind::PublicKey => self.pubkey_output(),

            RequestKind::Address => {
                let address = self.drv.address(&self.pubkey.public_key, self.network)?;
                Output::Address { address }
            }

            RequestKind::Transaction | RequestKind::Message => {
                if self.state != State::Parsed {
                    return Err(Error::BadState);
                }

                // Final re-verification before any signature exists
                self.digest.verify(self.buffer.as_slice())?;

                let signature = self.drv.sign_hash(self.path.as_slice(), self.digest.as_bytes())?;

                self.state = State::Approved;

                Output::Signature { signature }
            }

            RequestKind::None => return Err(Error::BadState),
        };

        self.reset();

        Ok(output)
    }

    /// Deny the pending request (external user event), resetting the
    /// session regardless of its state. The caller responds with the
    /// denied status word.
    pub fn deny(&mut self) {
        #[cfg(feature = "log")]
        log::debug!("request denied in state {:?}", self.state);

        self.reset();
    }

    /// Reset the session to a zeroed idle state
    pub fn reset(&mut self) {
        self.state = State::Init;
        self.request = RequestKind::None;
        self.chunk = 0;
        self.path.clear();
        self.network = Network::Mainnet;
        self.pubkey.clear();
        self.buffer.clear();
        self.digest.clear();
    }

    /// Start a public key request
    #[cfg_attr(feature = "noinline", inline(never))]
    fn start_pubkey(
        &mut self,
        path: &DerivationPath,
        confirm: bool,
        use_chain_code: bool,
    ) -> Result<Output, Error> {
        self.reset();
        self.request = RequestKind::PublicKey;
        self.path = path.clone();

        let (public_key, chain_code) = self.drv.derive_public_key(path.as_slice())?;
        self.pubkey = PubkeyInfo {
            public_key,
            chain_code,
            use_chain_code,
        };

        match confirm {
            true => Ok(Output::Pending),
            false => {
                let output = self.pubkey_output();
                self.reset();
                Ok(output)
            }
        }
    }

    /// Start an address request
    #[cfg_attr(feature = "noinline", inline(never))]
    fn start_address(
        &mut self,
        path: &DerivationPath,
        confirm: bool,
        network: Network,
    ) -> Result<Output, Error> {
        self.reset();
        self.request = RequestKind::Address;
        self.path = path.clone();
        self.network = network;

        let (public_key, chain_code) = self.drv.derive_public_key(path.as_slice())?;
        self.pubkey = PubkeyInfo {
            public_key,
            chain_code,
            use_chain_code: false,
        };

        match confirm {
            true => Ok(Output::Pending),
            false => {
                let address = self.drv.address(&self.pubkey.public_key, self.network)?;
                self.reset();
                Ok(Output::Address { address })
            }
        }
    }

    /// Start a signing request (first chunk, carrying the derivation
    /// path)
    fn sign_start(&mut self, kind: RequestKind, path: &DerivationPath) -> Result<Output, Error> {
        self.reset();
        self.request = kind;
        self.path = path.clone();

        Ok(Output::Ok)
    }

    /// Append a signing request chunk, parsing on the final one
    #[cfg_attr(feature = "noinline", inline(never))]
    fn sign_chunk(
        &mut self,
        kind: RequestKind,
        index: u8,
        more: bool,
        data: &[u8],
    ) -> Result<Output, Error> {
        // The declared kind must match the active request (this also
        // rejects chunks arriving with no request started)
        if self.request != kind {
            return Err(Error::BadState);
        }

        // Chunks are strictly ordered; a wrapped counter can never match
        if self.chunk.checked_add(1) != Some(index) {
            return Err(Error::OutOfOrder);
        }

        // Capacity is enforced before any mutation
        self.buffer.append(data)?;
        self.chunk = index;

        if more {
            return Ok(Output::Ok);
        }

        // Final chunk: capture the reference hash over the complete
        // buffer, then parse
        self.digest = TxDigest::compute(self.buffer.as_slice());

        let r = match self.request {
            RequestKind::Transaction => {
                Transaction::deserialise(self.buffer.as_slice()).map(|_| ())
            }
            RequestKind::Message => Message::deserialise(self.buffer.as_slice()).map(|_| ()),
            _ => return Err(Error::BadState),
        };

        match r {
            Ok(()) => {
                self.state = State::Parsed;
                Ok(Output::Pending)
            }
            Err(e) => {
                #[cfg(feature = "log")]
                log::warn!("parse failed: {:?}", e);

                Err(Error::Parse(e))
            }
        }
    }

    /// Build the public key response from held session state
    fn pubkey_output(&self) -> Output {
        Output::PublicKey {
            public_key: self.pubkey.public_key,
            chain_code: match self.pubkey.use_chain_code {
                true => Some(self.pubkey.chain_code),
                false => None,
            },
        }
    }
}
