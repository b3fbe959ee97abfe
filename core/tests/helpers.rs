#![allow(unused)]

use ledger_solar_core::apdu::{
    path::{DerivationPath, HARDENED},
    Network, ADDRESS_LEN, CHAIN_CODE_LEN, PUBKEY_HASH_LEN, PUBKEY_LEN, SIGNATURE_LEN,
};
use ledger_solar_core::engine::{Driver, Error, DIGEST_LEN};

/// Driver implementation for test use, producing recognisable
/// deterministic values in place of real platform cryptography
pub struct TestDriver {}

impl TestDriver {
    pub fn new() -> Self {
        Self {}
    }
}

impl Driver for TestDriver {
    fn derive_public_key(
        &self,
        path: &[u32],
    ) -> Result<([u8; PUBKEY_LEN], [u8; CHAIN_CODE_LEN]), Error> {
        let mut pk = [0x02u8; PUBKEY_LEN];
        pk[1] = path.len() as u8;
        pk[2] = path[0] as u8;

        Ok((pk, [0xccu8; CHAIN_CODE_LEN]))
    }

    fn address(
        &self,
        public_key: &[u8; PUBKEY_LEN],
        network: Network,
    ) -> Result<[u8; ADDRESS_LEN], Error> {
        let c = match network {
            Network::Mainnet => b'S',
            Network::Testnet => b'D',
        };

        let mut address = [c; ADDRESS_LEN];
        address[1] = b'A' + (public_key[2] % 26);

        Ok(address)
    }

    fn sign_hash(
        &self,
        _path: &[u32],
        hash: &[u8; DIGEST_LEN],
    ) -> Result<[u8; SIGNATURE_LEN], Error> {
        // Signature = hash || hash, letting tests confirm exactly which
        // bytes were signed over
        let mut sig = [0u8; SIGNATURE_LEN];
        sig[..DIGEST_LEN].copy_from_slice(hash);
        sig[DIGEST_LEN..].copy_from_slice(hash);

        Ok(sig)
    }
}

/// Default signing path used across tests
pub fn test_path() -> DerivationPath {
    DerivationPath::new(&[44 | HARDENED, 3333 | HARDENED, 0]).unwrap()
}

/// Wire-format transaction builder for synthetic test vectors
pub struct TxBuilder {
    buf: Vec<u8>,
}

impl TxBuilder {
    /// Start a transaction with the common header fields
    pub fn new(network: u8, type_group: u32, tx_type: u16, fee: u64) -> Self {
        Self::with_memo(network, type_group, tx_type, fee, &[])
    }

    /// Start a transaction carrying a memo
    pub fn with_memo(network: u8, type_group: u32, tx_type: u16, fee: u64, memo: &[u8]) -> Self {
        let mut buf = vec![0xff, 0x03, network];

        buf.extend_from_slice(&type_group.to_le_bytes());
        buf.extend_from_slice(&tx_type.to_le_bytes());
        buf.extend_from_slice(&[0x11u8; 8]); // nonce
        buf.extend_from_slice(&SENDER_PUBKEY);
        buf.extend_from_slice(&fee.to_le_bytes());
        buf.push(memo.len() as u8);
        buf.extend_from_slice(memo);

        Self { buf }
    }

    pub fn push_u8(mut self, v: u8) -> Self {
        self.buf.push(v);
        self
    }

    pub fn push_u16(mut self, v: u16) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn push_u64(mut self, v: u64) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn push_bytes(mut self, v: &[u8]) -> Self {
        self.buf.extend_from_slice(v);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// Sender public key used by the builders
pub const SENDER_PUBKEY: [u8; PUBKEY_LEN] = [0xab; PUBKEY_LEN];

/// Serialise a transfer transaction
pub fn transfer_tx(fee: u64, payments: &[(u64, [u8; PUBKEY_HASH_LEN])], memo: &[u8]) -> Vec<u8> {
    let mut b = TxBuilder::with_memo(0x3f, 1, 6, fee, memo).push_u16(payments.len() as u16);

    for (amount, recipient) in payments {
        b = b.push_u64(*amount).push_bytes(recipient);
    }

    b.build()
}

/// Serialise a burn transaction
pub fn burn_tx(fee: u64, amount: u64) -> Vec<u8> {
    TxBuilder::new(0x3f, 2, 0, fee).push_u64(amount).build()
}

/// Serialise an IPFS transaction
pub fn ipfs_tx(fee: u64, digest: &[u8]) -> Vec<u8> {
    TxBuilder::new(0x3f, 1, 5, fee)
        .push_u8(0x12) // hash-function tag (sha2-256)
        .push_u8(digest.len() as u8)
        .push_bytes(digest)
        .build()
}

/// Serialise a vote transaction
pub fn vote_tx(fee: u64, votes: &[(&str, u16)]) -> Vec<u8> {
    let mut b = TxBuilder::new(0x3f, 2, 2, fee).push_u8(votes.len() as u8);

    for (username, percent) in votes {
        b = b
            .push_u8(username.len() as u8)
            .push_bytes(username.as_bytes())
            .push_u16(*percent);
    }

    b.build()
}

/// Serialise a cancel-vote transaction
pub fn cancel_vote_tx(fee: u64) -> Vec<u8> {
    TxBuilder::new(0x3f, 2, 2, fee).push_u8(0).build()
}

/// Serialise a message payload
pub fn message(payload: &[u8]) -> Vec<u8> {
    let mut b = (payload.len() as u16).to_le_bytes().to_vec();
    b.extend_from_slice(payload);
    b
}
