//! DTLS variants (RFC 6347): a record header with an explicit epoch and
//! 48-bit sequence number in place of TLS's implicit one, and a handshake
//! envelope that adds fragmentation fields. This crate does not reassemble
//! fragmented handshake messages (out of scope, like the rest of the state
//! machine); `fragment_offset` always defaults to zero and `fragment_length`
//! is treated as the full message length, i.e. every handshake is assumed to
//! arrive as a single fragment.

use crate::field::{self, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::{LayerId, Schema};
use crate::tls::cipher_suites::{CIPHER_SUITES, COMPRESSION_METHODS};
use crate::tls::handshake::MSG_TYPES;
use crate::tls::record::{CONTENT_TYPES, VERSIONS};

fn peek_record(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 13 {
        return None;
    }
    let length = field::read_uint_be(&bytes[11..13]) as usize;
    Some(13 + length)
}

const RECORD_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "content_type",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(CONTENT_TYPES),
        },
        FieldDefault::UInt(0xff),
    ),
    field::plain(
        "version",
        FieldKind::UInt {
            width: 2,
            enum_map: Some(VERSIONS),
        },
        FieldDefault::UInt(0xfeff),
    ),
    field::plain("epoch", FieldKind::UInt { width: 2, enum_map: None }, FieldDefault::UInt(0)),
    field::plain(
        "sequence",
        FieldKind::UInt { width: 6, enum_map: None },
        FieldDefault::UInt(0),
    ),
    field::bounds_payload("length", FieldKind::UInt { width: 2, enum_map: None }),
];

pub static RECORD_SCHEMA: Schema = Schema {
    name: "DTLSRecord",
    fields: RECORD_FIELDS,
    peek_len: Some(peek_record),
};

const HANDSHAKE_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "msg_type",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(MSG_TYPES),
        },
        FieldDefault::UInt(0xff),
    ),
    // Both `length` and `fragment_length` bound the payload the same way:
    // with no reassembly, a DTLS handshake message is always one full
    // fragment, so the two values coincide.
    field::bounds_payload("length", FieldKind::UInt { width: 3, enum_map: None }),
    field::plain(
        "message_seq",
        FieldKind::UInt { width: 2, enum_map: None },
        FieldDefault::UInt(0),
    ),
    field::plain(
        "fragment_offset",
        FieldKind::UInt { width: 3, enum_map: None },
        FieldDefault::UInt(0),
    ),
    field::bounds_payload("fragment_length", FieldKind::UInt { width: 3, enum_map: None }),
];

pub static HANDSHAKE_SCHEMA: Schema = Schema {
    name: "DTLSHandshake",
    fields: HANDSHAKE_FIELDS,
    peek_len: None,
};

const CLIENT_HELLO_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "version",
        FieldKind::UInt {
            width: 2,
            enum_map: Some(VERSIONS),
        },
        FieldDefault::UInt(0xfeff),
    ),
    field::plain(
        "gmt_unix_time",
        FieldKind::UInt { width: 4, enum_map: None },
        FieldDefault::ClockUnixTime,
    ),
    field::plain(
        "random_bytes",
        FieldKind::FixedBytes { len: 28 },
        FieldDefault::EntropyBytes(28),
    ),
    field::length_of(
        "session_id_length",
        FieldKind::UInt { width: 1, enum_map: None },
        "session_id",
    ),
    field::plain(
        "session_id",
        FieldKind::Bytes { length_from: "session_id_length" },
        FieldDefault::Bytes(b""),
    ),
    // Inserted between `session_id` and `cipher_suites`, the one structural
    // difference from `TLSClientHello` (RFC 6347 §4.2.1).
    field::length_of("cookie_length", FieldKind::UInt { width: 1, enum_map: None }, "cookie"),
    field::plain(
        "cookie",
        FieldKind::Bytes { length_from: "cookie_length" },
        FieldDefault::Bytes(b""),
    ),
    field::length_of(
        "cipher_suites_length",
        FieldKind::UInt { width: 2, enum_map: None },
        "cipher_suites",
    ),
    field::plain(
        "cipher_suites",
        FieldKind::UIntList {
            item_width: 2,
            length_from: "cipher_suites_length",
            enum_map: Some(CIPHER_SUITES),
        },
        FieldDefault::EmptyList,
    ),
    field::length_of(
        "compression_methods_length",
        FieldKind::UInt { width: 1, enum_map: None },
        "compression_methods",
    ),
    field::plain(
        "compression_methods",
        FieldKind::UIntList {
            item_width: 1,
            length_from: "compression_methods_length",
            enum_map: Some(COMPRESSION_METHODS),
        },
        FieldDefault::EmptyList,
    ),
    field::length_of(
        "extensions_length",
        FieldKind::UInt { width: 2, enum_map: None },
        "extensions",
    ),
    field::plain(
        "extensions",
        FieldKind::PacketList {
            item: LayerId::TlsExtension,
            length_from: "extensions_length",
        },
        FieldDefault::EmptyList,
    ),
];

pub static CLIENT_HELLO_SCHEMA: Schema = Schema {
    name: "DTLSClientHello",
    fields: CLIENT_HELLO_FIELDS,
    peek_len: None,
};

const HELLO_VERIFY_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "version",
        FieldKind::UInt {
            width: 2,
            enum_map: Some(VERSIONS),
        },
        FieldDefault::UInt(0xfeff),
    ),
    field::length_of("cookie_length", FieldKind::UInt { width: 1, enum_map: None }, "cookie"),
    field::plain(
        "cookie",
        FieldKind::Bytes { length_from: "cookie_length" },
        FieldDefault::Bytes(b""),
    ),
];

pub static HELLO_VERIFY_SCHEMA: Schema = Schema {
    name: "DTLSHelloVerify",
    fields: HELLO_VERIFY_FIELDS,
    peek_len: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_support::{FixedClock, FixedEntropy};
    use crate::field::Value;
    use crate::packet::{InjectedEnv, Packet, Payload};

    #[test]
    fn client_hello_round_trips_with_a_cookie() {
        let env = InjectedEnv {
            clock: &FixedClock(1_700_000_000),
            entropy: &FixedEntropy(0x33),
        };
        let hello = Packet::new_with(LayerId::DtlsClientHello, &env)
            .with_field("cookie", Value::Bytes(b"cookie-bytes".as_slice().into()))
            .with_field("cipher_suites", Value::UIntList(vec![0x002f]));
        let built = hello.build().unwrap();

        let dissected = Packet::dissect(LayerId::DtlsClientHello, &built);
        assert_eq!(
            dissected.field("cookie").and_then(Value::as_bytes).map(|b| b.as_ref()),
            Some(&b"cookie-bytes"[..])
        );
        assert_eq!(
            dissected.field("cipher_suites").and_then(Value::as_uint_list),
            Some(&[0x002fu64][..])
        );
    }

    #[test]
    fn record_wraps_handshake_wraps_client_hello() {
        let env = InjectedEnv {
            clock: &FixedClock(1_700_000_000),
            entropy: &FixedEntropy(0x44),
        };
        let hello = Packet::new_with(LayerId::DtlsClientHello, &env);
        let hello_bytes = hello.build().unwrap();
        let handshake = Packet::new(LayerId::DtlsHandshake)
            .with_field("msg_type", Value::UInt(1))
            .with_payload(Payload::Trailer(hello_bytes));
        let handshake_bytes = handshake.build().unwrap();
        let record = Packet::new(LayerId::DtlsRecord)
            .with_field("content_type", Value::UInt(0x16))
            .with_payload(Payload::Trailer(handshake_bytes));
        let built = record.build().unwrap();

        let dissected = Packet::dissect(LayerId::DtlsRecord, &built);
        let hs = dissected.next_layer().expect("handshake payload");
        assert_eq!(hs.layer, LayerId::DtlsHandshake);
        let ch = hs.next_layer().expect("client hello payload");
        assert_eq!(ch.layer, LayerId::DtlsClientHello);
    }
}
