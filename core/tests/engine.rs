//! Engine integration tests, driving full request flows through APDU
//! encode / parse / update

use encdec::Encode;

use ledger_solar_core::apdu::{
    address::AddressReq,
    app_info::{AppNameReq, VersionReq},
    public_key::PublicKeyReq,
    sign::{SignMessageChunk, SignMessageStart, SignTxChunk, SignTxStart},
    ApduReq, Network,
};
use ledger_solar_core::engine::{
    Engine, Error, Event, Output, RequestKind, State, TxDigest,
};
use ledger_solar_core::tx::Asset;
use ledger_solar_core::{APP_NAME, TRANSACTION_LEN_MAX};

mod helpers;
use helpers::*;

/// Encode a request APDU, parse it back to an event, and update the
/// engine, mirroring the firmware shell
fn exchange<'a>(
    e: &mut Engine<TestDriver>,
    req: impl ApduReq<'a> + Encode<Error = ledger_solar_core::apdu::ApduError>,
) -> Result<Output, Error> {
    let mut buff = [0u8; 512];

    let hdr = req.header();
    let n = req.encode(&mut buff).expect("encode failed");

    let evt = Event::parse(&hdr, &buff[..n])?;

    e.update(&evt)
}

fn init_logger() {
    let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, Default::default());
}

#[test]
fn transaction_flow() {
    init_logger();

    let mut e = Engine::new(TestDriver::new());

    let raw = transfer_tx(5_000_000, &[(1_000, [0x3f; 21]), (2_000, [0x51; 21])], b"");
    let (a, b) = raw.split_at(raw.len() / 2);

    // First chunk carries the path
    let r = exchange(&mut e, SignTxStart::new(test_path())).unwrap();
    assert_eq!(r, Output::Ok);
    assert_eq!(e.request(), RequestKind::Transaction);
    assert_eq!(e.state(), State::Init);

    // Intermediate chunk is acknowledged
    let r = exchange(&mut e, SignTxChunk::new(1, false, a)).unwrap();
    assert_eq!(r, Output::Ok);
    assert_eq!(e.raw_len(), a.len());

    // Final chunk parses and defers to approval
    let r = exchange(&mut e, SignTxChunk::new(2, true, b)).unwrap();
    assert_eq!(r, Output::Pending);
    assert_eq!(e.state(), State::Parsed);

    // Display accessor re-verifies the hash and re-parses the buffer
    let tx = e.transaction().unwrap();
    assert_eq!(tx.fee, 5_000_000);
    match &tx.asset {
        Asset::Transfer(t) => assert_eq!(t.count(), 2),
        a => panic!("unexpected asset: {a:?}"),
    }

    // Approval signs the reference hash and resets the session
    let expected = TxDigest::compute(&raw);
    match e.approve().unwrap() {
        Output::Signature { signature } => {
            assert_eq!(&signature[..32], expected.as_bytes());
            assert_eq!(&signature[32..], expected.as_bytes());
        }
        r => panic!("unexpected output: {r:?}"),
    }

    assert_eq!(e.state(), State::Init);
    assert_eq!(e.request(), RequestKind::None);
    assert_eq!(e.raw_len(), 0);
}

#[test]
fn message_flow() {
    init_logger();

    let mut e = Engine::new(TestDriver::new());

    let raw = message(b"ccccccc");

    exchange(&mut e, SignMessageStart::new(test_path())).unwrap();
    let r = exchange(&mut e, SignMessageChunk::new(1, true, &raw)).unwrap();
    assert_eq!(r, Output::Pending);

    let m = e.message().unwrap();
    assert_eq!(m.len(), 7);
    assert_eq!(m.as_str(), "ccccccc");

    assert!(matches!(e.approve(), Ok(Output::Signature { .. })));
}

#[test]
fn repeated_chunk_rejected() {
    let mut e = Engine::new(TestDriver::new());

    exchange(&mut e, SignTxStart::new(test_path())).unwrap();
    exchange(&mut e, SignTxChunk::new(1, false, &[0xaa; 64])).unwrap();

    // Same index again
    let r = exchange(&mut e, SignTxChunk::new(1, false, &[0xbb; 64]));
    assert_eq!(r.err(), Some(Error::OutOfOrder));
    assert_eq!(e.raw_len(), 64);

    // Skipped index
    let r = exchange(&mut e, SignTxChunk::new(3, false, &[0xbb; 64]));
    assert_eq!(r.err(), Some(Error::OutOfOrder));
    assert_eq!(e.raw_len(), 64);

    // The expected index still proceeds
    let r = exchange(&mut e, SignTxChunk::new(2, false, &[0xbb; 64]));
    assert!(r.is_ok());
    assert_eq!(e.raw_len(), 128);
}

#[test]
fn chunk_without_start_rejected() {
    let mut e = Engine::new(TestDriver::new());

    let r = exchange(&mut e, SignTxChunk::new(1, false, &[0xaa; 16]));
    assert_eq!(r.err(), Some(Error::BadState));
    assert_eq!(e.raw_len(), 0);
}

#[test]
fn kind_mismatch_rejected() {
    let mut e = Engine::new(TestDriver::new());

    exchange(&mut e, SignTxStart::new(test_path())).unwrap();

    // Message chunk against a transaction session
    let r = exchange(&mut e, SignMessageChunk::new(1, false, &[0xaa; 16]));
    assert_eq!(r.err(), Some(Error::BadState));
    assert_eq!(e.raw_len(), 0);
}

#[test]
fn capacity_enforced() {
    let mut e = Engine::new(TestDriver::new());

    exchange(&mut e, SignTxStart::new(test_path())).unwrap();

    // Fill the buffer in 255-byte chunks
    let chunk = [0x55u8; 255];
    let full_chunks = TRANSACTION_LEN_MAX / chunk.len();
    for i in 0..full_chunks {
        exchange(&mut e, SignTxChunk::new((i + 1) as u8, false, &chunk)).unwrap();
    }

    let len = e.raw_len();
    assert_eq!(len, full_chunks * chunk.len());

    // One more full chunk would exceed the buffer
    let r = exchange(&mut e, SignTxChunk::new((full_chunks + 1) as u8, false, &chunk));
    assert_eq!(r.err(), Some(Error::TxTooLarge));
    assert_eq!(e.raw_len(), len);
}

#[test]
fn version_and_app_name() {
    let mut e = Engine::new(TestDriver::new());

    let r = exchange(&mut e, VersionReq::default()).unwrap();
    assert!(matches!(r, Output::Version { major: 1, .. }));

    let r = exchange(&mut e, AppNameReq::default()).unwrap();
    assert_eq!(r, Output::AppName { name: APP_NAME });
}

#[test]
fn public_key_flow() {
    let mut e = Engine::new(TestDriver::new());

    // Without confirmation the response is immediate and the session
    // does not linger
    let r = exchange(&mut e, PublicKeyReq::new(test_path(), false, true)).unwrap();
    match r {
        Output::PublicKey {
            public_key,
            chain_code,
        } => {
            assert_eq!(public_key[0], 0x02);
            assert_eq!(chain_code, Some([0xcc; 32]));
        }
        r => panic!("unexpected output: {r:?}"),
    }
    assert_eq!(e.request(), RequestKind::None);

    // With confirmation the response is deferred until approval
    let r = exchange(&mut e, PublicKeyReq::new(test_path(), true, false)).unwrap();
    assert_eq!(r, Output::Pending);
    assert_eq!(e.request(), RequestKind::PublicKey);

    match e.approve().unwrap() {
        Output::PublicKey { chain_code, .. } => assert_eq!(chain_code, None),
        r => panic!("unexpected output: {r:?}"),
    }
    assert_eq!(e.request(), RequestKind::None);
}

#[test]
fn address_flow() {
    let mut e = Engine::new(TestDriver::new());

    let r = exchange(
        &mut e,
        AddressReq::new(test_path(), false, Network::Testnet),
    )
    .unwrap();
    match r {
        Output::Address { address } => assert_eq!(address[0], b'D'),
        r => panic!("unexpected output: {r:?}"),
    }

    let r = exchange(&mut e, AddressReq::new(test_path(), true, Network::Mainnet)).unwrap();
    assert_eq!(r, Output::Pending);

    match e.approve().unwrap() {
        Output::Address { address } => assert_eq!(address[0], b'S'),
        r => panic!("unexpected output: {r:?}"),
    }
}

#[test]
fn deny_then_fresh_request() {
    let mut e = Engine::new(TestDriver::new());

    let raw = burn_tx(100_000_000, 50_000_000);

    exchange(&mut e, SignTxStart::new(test_path())).unwrap();
    exchange(&mut e, SignTxChunk::new(1, true, &raw)).unwrap();
    assert_eq!(e.state(), State::Parsed);

    e.deny();
    assert_eq!(e.state(), State::Init);
    assert_eq!(e.raw_len(), 0);

    // Denial leaves the engine ready for a new request from chunk zero
    exchange(&mut e, SignTxStart::new(test_path())).unwrap();
    let r = exchange(&mut e, SignTxChunk::new(1, true, &raw)).unwrap();
    assert_eq!(r, Output::Pending);

    let tx = e.transaction().unwrap();
    match tx.asset {
        Asset::Burn(b) => assert_eq!(b.amount, 50_000_000),
        a => panic!("unexpected asset: {a:?}"),
    }
}

#[test]
fn new_request_resets_prior_session() {
    let mut e = Engine::new(TestDriver::new());

    exchange(&mut e, SignTxStart::new(test_path())).unwrap();
    exchange(&mut e, SignTxChunk::new(1, false, &[0xaa; 100])).unwrap();

    // A new first chunk abandons the half-assembled session
    exchange(&mut e, SignTxStart::new(test_path())).unwrap();
    assert_eq!(e.raw_len(), 0);

    let raw = burn_tx(1, 2);
    let r = exchange(&mut e, SignTxChunk::new(1, true, &raw)).unwrap();
    assert_eq!(r, Output::Pending);
}

#[test]
fn display_accessors_check_request_kind() {
    let mut e = Engine::new(TestDriver::new());

    // Nothing parsed yet
    assert_eq!(e.transaction().err(), Some(Error::BadState));
    assert_eq!(e.message().err(), Some(Error::BadState));

    let raw = burn_tx(7, 9);
    exchange(&mut e, SignTxStart::new(test_path())).unwrap();
    exchange(&mut e, SignTxChunk::new(1, true, &raw)).unwrap();

    // A transaction session never exposes a message view
    assert!(e.transaction().is_ok());
    assert_eq!(e.message().err(), Some(Error::BadState));
}
