//! `TLSExtension` and the small set of extension bodies this crate knows how
//! to dissect further: server name indication, max fragment length, and
//! certificate URL. Any other extension type is left as an opaque trailer by
//! the binder returning no match, exactly like an unrecognized handshake
//! message type.

use crate::field::{self, EnumMap, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::{LayerId, Schema};

pub const EXTENSION_TYPES: EnumMap = &[
    (0x0000, "server_name"),
    (0x0001, "max_fragment_length"),
    (0x0002, "client_certificate_url"),
    (0x0003, "trusted_ca_keys"),
    (0x0004, "truncated_hmac"),
    (0x0005, "status_request"),
    (0x000a, "elliptic_curves"),
    (0x000b, "ec_point_formats"),
    (0x000d, "signature_algorithms"),
    (0x000f, "heartbeat"),
    (0x0023, "session_ticket_tls"),
    (0x3374, "next_protocol_negotiation"),
    (0xff01, "renegotiation_info"),
];

const EXTENSION_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "extension_type",
        FieldKind::UInt {
            width: 2,
            enum_map: Some(EXTENSION_TYPES),
        },
        FieldDefault::UInt(0xffff),
    ),
    field::bounds_payload("length", FieldKind::UInt { width: 2, enum_map: None }),
];

pub static EXTENSION_SCHEMA: Schema = Schema {
    name: "TLSExtension",
    fields: EXTENSION_FIELDS,
    peek_len: None,
};

// -- server_name_indication -------------------------------------------------

const SNI_FIELDS: &[FieldDescriptor] = &[
    field::length_of(
        "server_name_list_length",
        FieldKind::UInt { width: 2, enum_map: None },
        "server_names",
    ),
    field::plain(
        "server_names",
        FieldKind::PacketList {
            item: LayerId::TlsServerName,
            length_from: "server_name_list_length",
        },
        FieldDefault::EmptyList,
    ),
];

pub static SNI_SCHEMA: Schema = Schema {
    name: "TLSServerNameIndication",
    fields: SNI_FIELDS,
    peek_len: None,
};

pub const SERVER_NAME_TYPES: EnumMap = &[(0x00, "host_name")];

fn peek_server_name(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 3 {
        return None;
    }
    let length = field::read_uint_be(&bytes[1..3]) as usize;
    Some(3 + length)
}

const SERVER_NAME_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "name_type",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(SERVER_NAME_TYPES),
        },
        FieldDefault::UInt(0x00),
    ),
    field::length_of("length", FieldKind::UInt { width: 2, enum_map: None }, "data"),
    field::plain(
        "data",
        FieldKind::Bytes { length_from: "length" },
        FieldDefault::Bytes(b""),
    ),
];

pub static SERVER_NAME_SCHEMA: Schema = Schema {
    name: "TLSServerName",
    fields: SERVER_NAME_FIELDS,
    peek_len: Some(peek_server_name),
};

// -- max_fragment_length ----------------------------------------------------

/// RFC 6066 §4's single-byte code -> negotiated maximum fragment size. Purely
/// presentational: the wire byte is always the code (1..=4), never the
/// looked-up size.
pub const MAX_FRAGMENT_LENGTHS: EnumMap = &[
    (0x01, "512"),
    (0x02, "1024"),
    (0x03, "2048"),
    (0x04, "4096"),
];

const MAX_FRAGMENT_LENGTH_FIELDS: &[FieldDescriptor] = &[field::plain(
    "fragment_length_code",
    FieldKind::UInt {
        width: 1,
        enum_map: Some(MAX_FRAGMENT_LENGTHS),
    },
    FieldDefault::UInt(0x01),
)];

pub static MAX_FRAGMENT_LENGTH_SCHEMA: Schema = Schema {
    name: "TLSExtMaxFragmentLength",
    fields: MAX_FRAGMENT_LENGTH_FIELDS,
    peek_len: None,
};

/// Maps an RFC 6066 code byte to the negotiated size in bytes, for callers
/// who want the resolved number rather than the raw wire code.
pub fn max_fragment_length_bytes(code: u64) -> Option<u32> {
    match code {
        0x01 => Some(512),
        0x02 => Some(1024),
        0x03 => Some(2048),
        0x04 => Some(4096),
        _ => None,
    }
}

// -- certificate_url ---------------------------------------------------------

/// Bound (per the registered layer-binder table) to extension type `0x0002`
/// (`client_certificate_url`), even though this structure — a chain of
/// URL-and-hash entries — describes a server-pushed certificate URL chain,
/// not a client's certificate URL. That mismatch is inherited unchanged from
/// the source this schema mirrors; see the crate-level docs for the call.
pub const CHAIN_TYPES: EnumMap = &[(0x00, "individual_certs"), (0x01, "pkipath")];

const CERTIFICATE_URL_FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "chain_type",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(CHAIN_TYPES),
        },
        FieldDefault::UInt(0x00),
    ),
    field::length_of(
        "url_and_hash_list_length",
        FieldKind::UInt { width: 2, enum_map: None },
        "url_and_hash_list",
    ),
    field::plain(
        "url_and_hash_list",
        FieldKind::PacketList {
            item: LayerId::TlsUrlAndHash,
            length_from: "url_and_hash_list_length",
        },
        FieldDefault::EmptyList,
    ),
];

pub static CERTIFICATE_URL_SCHEMA: Schema = Schema {
    name: "TLSExtCertificateURL",
    fields: CERTIFICATE_URL_FIELDS,
    peek_len: None,
};

fn peek_url_and_hash(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 2 {
        return None;
    }
    let url_len = field::read_uint_be(&bytes[0..2]) as usize;
    // url_length(2) + url + padding(1) + hash_present(1) + hash(20 if present)
    let fixed_tail = bytes.get(2 + url_len + 1)?;
    let hash_len = if *fixed_tail != 0 { 20 } else { 0 };
    Some(2 + url_len + 2 + hash_len)
}

const URL_AND_HASH_FIELDS: &[FieldDescriptor] = &[
    field::length_of("url_length", FieldKind::UInt { width: 2, enum_map: None }, "url"),
    field::plain(
        "url",
        FieldKind::Bytes { length_from: "url_length" },
        FieldDefault::Bytes(b""),
    ),
    // Reserved octet, always zero on the wire (RFC 6066 `padding`).
    field::plain("padding", FieldKind::UInt { width: 1, enum_map: None }, FieldDefault::UInt(0)),
    field::plain(
        "hash_present",
        FieldKind::UInt { width: 1, enum_map: None },
        FieldDefault::UInt(0),
    ),
    field::plain(
        "hash",
        FieldKind::GatedBytes {
            gate: "hash_present",
            len: 20,
        },
        FieldDefault::Bytes(b""),
    ),
];

pub static URL_AND_HASH_SCHEMA: Schema = Schema {
    name: "TLSURLAndHash",
    fields: URL_AND_HASH_FIELDS,
    peek_len: Some(peek_url_and_hash),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;
    use crate::packet::Packet;

    #[test]
    fn sni_round_trips_a_single_host_name() {
        let server_name = Packet::new(LayerId::TlsServerName)
            .with_field("data", Value::Bytes(b"a.test".as_slice().into()));
        let sni = Packet::new(LayerId::TlsServerNameIndication)
            .with_field("server_names", Value::Packets(vec![server_name]));
        let built = sni.build().unwrap();

        let dissected = Packet::dissect(LayerId::TlsServerNameIndication, &built);
        let names = dissected.field("server_names").and_then(Value::as_packets).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(
            names[0].field("data").and_then(Value::as_bytes).map(|b| b.as_ref()),
            Some(&b"a.test"[..])
        );
        assert_eq!(
            dissected.field("server_name_list_length").and_then(Value::as_uint),
            Some(names[0].encoded_len() as u64)
        );
    }

    #[test]
    fn url_and_hash_with_no_hash_serializes_without_the_twenty_bytes() {
        let entry = Packet::new(LayerId::TlsUrlAndHash)
            .with_field("url", Value::Bytes(b"https://example.test/cert".as_slice().into()));
        let out = entry.build().unwrap();
        // url_length(2) + url(26) + padding(1) + hash_present(1), no hash bytes.
        assert_eq!(out.len(), 2 + 26 + 1 + 1);
    }

    #[test]
    fn url_and_hash_with_hash_present_carries_twenty_hash_bytes() {
        let entry = Packet::new(LayerId::TlsUrlAndHash)
            .with_field("url", Value::Bytes(b"u".as_slice().into()))
            .with_field("hash_present", Value::UInt(1))
            .with_field("hash", Value::Bytes(vec![0xAB; 20].into()));
        let out = entry.build().unwrap();
        assert_eq!(out.len(), 2 + 1 + 1 + 1 + 20);
        assert_eq!(&out[out.len() - 20..], &[0xAB; 20][..]);
    }
}
