//! Black-box scenarios exercised through the public API only, covering a
//! full client hello with extensions and the DTLS auto-detect path — the
//! two cases that touch every layer (record, handshake, extension list,
//! and the `Ssl` compound) at once.

use veilwire::clock::test_support::{FixedClock, FixedEntropy};
use veilwire::packet::{InjectedEnv, Payload};
use veilwire::{LayerId, Packet, Underlay, Value};

fn env<'a>(clock: &'a FixedClock, entropy: &'a FixedEntropy) -> InjectedEnv<'a> {
    InjectedEnv { clock, entropy }
}

#[test]
fn hello_clock_and_entropy_defaults_are_fixed_at_construction() {
    let _ = env_logger::builder().is_test(true).try_init();

    let clock = veilwire::clock::test_support::CountingClock::default();
    let env = InjectedEnv { clock: &clock, entropy: &FixedEntropy(0x09) };
    let hello = Packet::new_with(LayerId::TlsClientHello, &env);
    assert_eq!(clock.0.load(std::sync::atomic::Ordering::SeqCst), 1);

    let first = hello.build().unwrap();
    let _ = hello.encoded_len();
    let second = hello.build().unwrap();
    assert_eq!(first, second);
    assert_eq!(clock.0.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn client_hello_with_sni_round_trips_through_a_full_record() {
    let _ = env_logger::builder().is_test(true).try_init();

    let clock = FixedClock(1_700_000_000);
    let entropy = FixedEntropy(0x10);
    let env = env(&clock, &entropy);

    let server_name = Packet::new(LayerId::TlsServerName)
        .with_field("data", Value::Bytes(b"a.test".as_slice().into()));
    let sni = Packet::new(LayerId::TlsServerNameIndication)
        .with_field("server_names", Value::Packets(vec![server_name]));
    let sni_bytes = sni.build().unwrap();

    let extension = Packet::new(LayerId::TlsExtension)
        .with_field("extension_type", Value::UInt(0x0000))
        .with_payload(Payload::Trailer(sni_bytes));

    let hello = Packet::new_with(LayerId::TlsClientHello, &env)
        .with_field("version", Value::UInt(0x0303))
        .with_field("cipher_suites", Value::UIntList(vec![0x002f, 0x0035]))
        .with_field("compression_methods", Value::UIntList(vec![0x00]))
        .with_field("extensions", Value::Packets(vec![extension]));
    let hello_bytes = hello.build().unwrap();

    let handshake = Packet::new(LayerId::TlsHandshake)
        .with_field("msg_type", Value::UInt(0x01))
        .with_payload(Payload::Trailer(hello_bytes));
    let handshake_bytes = handshake.build().unwrap();

    let record = Packet::new(LayerId::TlsRecord)
        .with_field("content_type", Value::UInt(0x16))
        .with_field("version", Value::UInt(0x0303))
        .with_payload(Payload::Trailer(handshake_bytes));
    let wire = record.build().unwrap();

    let dissected = Packet::dissect(LayerId::TlsRecord, &wire);
    let hs = dissected.next_layer().expect("handshake");
    let ch = hs.next_layer().expect("client hello");
    assert_eq!(ch.layer, LayerId::TlsClientHello);

    let exts = ch.field("extensions").and_then(Value::as_packets).unwrap();
    assert_eq!(exts.len(), 1);
    let ext_sni = exts[0].next_layer().expect("sni body");
    assert_eq!(ext_sni.layer, LayerId::TlsServerNameIndication);
    let names = ext_sni.field("server_names").and_then(Value::as_packets).unwrap();
    assert_eq!(
        names[0].field("data").and_then(Value::as_bytes).map(|b| b.as_ref()),
        Some(&b"a.test"[..])
    );

    let extensions_length_field = ch.field("extensions_length").and_then(Value::as_uint).unwrap();
    let reencoded_extensions: usize = exts.iter().map(|e| e.encoded_len()).sum();
    assert_eq!(extensions_length_field as usize, reencoded_extensions);

    assert_eq!(dissected.build().unwrap(), wire);
}

#[test]
fn dtls_client_hello_resolves_beneath_a_udp_underlay() {
    let _ = env_logger::builder().is_test(true).try_init();

    let clock = FixedClock(1_700_000_000);
    let entropy = FixedEntropy(0x20);
    let env = env(&clock, &entropy);

    let hello = Packet::new_with(LayerId::DtlsClientHello, &env)
        .with_field("cookie", Value::Bytes(b"abc123".as_slice().into()))
        .with_field("cipher_suites", Value::UIntList(vec![0x002f]));
    let hello_bytes = hello.build().unwrap();

    let handshake = Packet::new(LayerId::DtlsHandshake)
        .with_field("msg_type", Value::UInt(0x01))
        .with_payload(Payload::Trailer(hello_bytes));
    let handshake_bytes = handshake.build().unwrap();

    let record = Packet::new(LayerId::DtlsRecord)
        .with_field("content_type", Value::UInt(0x16))
        .with_payload(Payload::Trailer(handshake_bytes));
    let wire = record.build().unwrap();

    assert!(veilwire::ssl::applies(Underlay::Udp { src_port: 51234, dst_port: 4433 }));
    let ssl = veilwire::Ssl::dissect(Underlay::Udp { src_port: 51234, dst_port: 4433 }, &wire);
    assert_eq!(ssl.records.len(), 1);
    assert!(ssl.trailer.is_none());

    let record = &ssl.records[0];
    assert_eq!(record.layer, LayerId::DtlsRecord);
    let hs = record.next_layer().expect("handshake");
    let ch = hs.next_layer().expect("client hello");
    assert_eq!(ch.layer, LayerId::DtlsClientHello);
    assert_eq!(
        ch.field("cookie").and_then(Value::as_bytes).map(|b| b.as_ref()),
        Some(&b"abc123"[..])
    );
}

#[test]
fn truncated_u24_handshake_length_serializes_as_exactly_three_bytes() {
    let handshake = Packet::new(LayerId::TlsHandshake)
        .with_field("msg_type", Value::UInt(0x0b))
        .with_field("length", Value::UInt(0x000123));
    let built = handshake.build().unwrap();
    assert_eq!(&built[1..4], &[0x00, 0x01, 0x23]);
    assert_eq!(built.len(), 4);
}
