//! `TLSServerKeyExchange`, `TLSDHServerParams`, and `TLSServerHelloDone`.
//!
//! Key-exchange bodies are opaque; this crate performs no cryptography.
//! `TLSServerKeyExchange.data` carries no standalone discriminator for which
//! key-exchange algorithm produced it, so the binder never dissects it
//! further. `TLSDHServerParams` (the source's only concrete key-exchange
//! layout) is only ever constructed by a caller who already knows the
//! cipher suite is Diffie-Hellman, by explicitly dissecting the extracted
//! `data` bytes.

use crate::field::{self, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::Schema;

const SERVER_KEY_EXCHANGE_FIELDS: &[FieldDescriptor] = &[
    field::length_of("length", FieldKind::UInt { width: 3, enum_map: None }, "data"),
    field::plain(
        "data",
        FieldKind::Bytes { length_from: "length" },
        FieldDefault::Bytes(b""),
    ),
];

pub static SERVER_KEY_EXCHANGE_SCHEMA: Schema = Schema {
    name: "TLSServerKeyExchange",
    fields: SERVER_KEY_EXCHANGE_FIELDS,
    peek_len: None,
};

const DH_SERVER_PARAMS_FIELDS: &[FieldDescriptor] = &[
    field::length_of("p_length", FieldKind::UInt { width: 2, enum_map: None }, "p"),
    field::plain("p", FieldKind::Bytes { length_from: "p_length" }, FieldDefault::Bytes(b"")),
    field::length_of("g_length", FieldKind::UInt { width: 2, enum_map: None }, "g"),
    field::plain("g", FieldKind::Bytes { length_from: "g_length" }, FieldDefault::Bytes(b"")),
    field::length_of(
        "pubkey_length",
        FieldKind::UInt { width: 2, enum_map: None },
        "pubkey",
    ),
    field::plain(
        "pubkey",
        FieldKind::Bytes { length_from: "pubkey_length" },
        FieldDefault::Bytes(b""),
    ),
    field::length_of(
        "signature_length",
        FieldKind::UInt { width: 2, enum_map: None },
        "signature",
    ),
    field::plain(
        "signature",
        FieldKind::Bytes { length_from: "signature_length" },
        FieldDefault::Bytes(b""),
    ),
];

pub static DH_SERVER_PARAMS_SCHEMA: Schema = Schema {
    name: "TLSDHServerParams",
    fields: DH_SERVER_PARAMS_FIELDS,
    peek_len: None,
};

const SERVER_HELLO_DONE_FIELDS: &[FieldDescriptor] = &[
    field::length_of("length", FieldKind::UInt { width: 3, enum_map: None }, "data"),
    field::plain(
        "data",
        FieldKind::Bytes { length_from: "length" },
        FieldDefault::Bytes(b""),
    ),
];

pub static SERVER_HELLO_DONE_SCHEMA: Schema = Schema {
    name: "TLSServerHelloDone",
    fields: SERVER_HELLO_DONE_FIELDS,
    peek_len: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;
    use crate::packet::Packet;
    use crate::schema::LayerId;

    #[test]
    fn server_hello_done_binds_under_handshake_type_0x0e() {
        // TLSHandshake(type=0x0e, length=0) -> TLSServerHelloDone(length=0, data=b"")
        let bytes = [0x0e, 0x00, 0x00, 0x00];
        let packet = Packet::dissect(LayerId::TlsHandshake, &bytes);
        assert_eq!(packet.field("msg_type").and_then(Value::as_uint), Some(0x0e));
        let done = packet.next_layer().expect("server_hello_done payload");
        assert_eq!(done.layer, LayerId::TlsServerHelloDone);
        assert_eq!(done.field("length").and_then(Value::as_uint), Some(0));
    }

    #[test]
    fn server_key_exchange_data_is_not_auto_dissected() {
        // p_length=1,p=[0x05], g_length=1,g=[0x02], pubkey_length=0,
        // signature_length=0 — a well-formed DH params body, but the binder
        // has no rule for TLSServerKeyExchange, so it stays opaque.
        let dh_bytes: &[u8] = &[0x00, 0x01, 0x05, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00];
        let mut wire = vec![0x00, 0x00, dh_bytes.len() as u8];
        wire.extend_from_slice(dh_bytes);
        let packet = Packet::dissect(LayerId::TlsServerKeyExchange, &wire);
        assert!(packet.next_layer().is_none());

        // The caller explicitly layers TLSDHServerParams on the extracted data.
        let data = packet.field("data").and_then(Value::as_bytes).expect("data field");
        let dh = Packet::dissect(LayerId::TlsDhServerParams, data);
        assert_eq!(dh.field("p").and_then(Value::as_bytes).map(|b| b.as_ref()), Some(&[0x05][..]));
    }
}
