//! `TLSRecord`: the outer framing unit, dispatched to a handshake, alert,
//! heartbeat, or change-cipher-spec body by `content_type`.

use crate::field::{self, EnumMap, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::Schema;

pub const CONTENT_TYPES: EnumMap = &[
    (0x14, "change_cipher_spec"),
    (0x15, "alert"),
    (0x16, "handshake"),
    (0x17, "application_data"),
    (0x18, "heartbeat"),
    (0xff, "unknown"),
];

pub const VERSIONS: EnumMap = &[
    (0x0300, "SSL_3_0"),
    (0x0301, "TLS_1_0"),
    (0x0302, "TLS_1_1"),
    (0x0303, "TLS_1_2"),
    (0x0100, "PROTOCOL_DTLS_1_0_OPENSSL_PRE_0_9_8F"),
    (0xfeff, "DTLS_1_0"),
    (0xfefd, "DTLS_1_1"),
];

fn peek(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 5 {
        return None;
    }
    let length = field::read_uint_be(&bytes[3..5]) as usize;
    Some(5 + length)
}

const FIELDS: &[FieldDescriptor] = &[
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
        FieldDefault::UInt(0x0301),
    ),
    field::bounds_payload("length", FieldKind::UInt { width: 2, enum_map: None }),
];

pub static SCHEMA: Schema = Schema {
    name: "TLSRecord",
    fields: FIELDS,
    peek_len: Some(peek),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;
    use crate::packet::Packet;
    use crate::schema::LayerId;

    #[test]
    fn alert_record_round_trip() {
        let bytes = [0x15, 0x03, 0x01, 0x00, 0x02, 0x02, 0x28];
        let packet = Packet::dissect(LayerId::TlsRecord, &bytes);
        assert_eq!(packet.field("content_type").and_then(Value::as_uint), Some(0x15));
        assert_eq!(packet.field("version").and_then(Value::as_uint), Some(0x0301));
        let alert = packet.next_layer().expect("alert payload");
        assert_eq!(alert.field("level").and_then(Value::as_uint), Some(0x02));
        assert_eq!(alert.field("description").and_then(Value::as_uint), Some(0x28));
        assert_eq!(packet.build().unwrap().as_ref(), &bytes);
    }

    #[test]
    fn change_cipher_spec_minimal_round_trip() {
        let bytes = [0x14, 0x03, 0x03, 0x00, 0x01, 0x01];
        let packet = Packet::dissect(LayerId::TlsRecord, &bytes);
        let ccs = packet.next_layer().expect("change_cipher_spec payload");
        assert_eq!(ccs.field("message").and_then(Value::as_bytes).map(|b| b.as_ref()), Some(&[0x01][..]));
        assert_eq!(packet.build().unwrap().as_ref(), &bytes);
    }
}
