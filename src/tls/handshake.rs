//! `TLSHandshake`, the handshake-message envelope, and its two hello bodies.

use crate::field::{self, EnumMap, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::{LayerId, Schema};
use crate::tls::cipher_suites::{CIPHER_SUITES, COMPRESSION_METHODS};

pub const MSG_TYPES: EnumMap = &[
    (1, "client_hello"),
    (2, "server_hello"),
    (3, "hello_verify_request"),
    (11, "certificate"),
    (12, "server_key_exchange"),
    (13, "certificate_request"),
    (14, "server_hello_done"),
    (15, "certificate_verify"),
    (16, "client_key_exchange"),
    (20, "finished"),
];

const FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "msg_type",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(MSG_TYPES),
        },
        FieldDefault::UInt(0xff),
    ),
    field::bounds_payload("length", FieldKind::UInt { width: 3, enum_map: None }),
];

pub static SCHEMA: Schema = Schema {
    name: "TLSHandshake",
    fields: FIELDS,
    peek_len: None,
};

const CLIENT_HELLO_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "version",
        FieldKind::UInt {
            width: 2,
            enum_map: Some(crate::tls::record::VERSIONS),
        },
        FieldDefault::UInt(0x0303),
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
    // Named `extensions_length`, not the source's `extension_length` typo —
    // the distilled naming this schema follows.
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
    name: "TLSClientHello",
    fields: CLIENT_HELLO_FIELDS,
    peek_len: None,
};

const SERVER_HELLO_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "version",
        FieldKind::UInt {
            width: 2,
            enum_map: Some(crate::tls::record::VERSIONS),
        },
        FieldDefault::UInt(0x0303),
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
    field::plain(
        "cipher_suite",
        FieldKind::UInt {
            width: 2,
            enum_map: Some(CIPHER_SUITES),
        },
        FieldDefault::UInt(0x0000),
    ),
    field::plain(
        "compression_method",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(COMPRESSION_METHODS),
        },
        FieldDefault::UInt(0x00),
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

pub static SERVER_HELLO_SCHEMA: Schema = Schema {
    name: "TLSServerHello",
    fields: SERVER_HELLO_FIELDS,
    peek_len: None,
};
