//! `TLSCertificate` / `TLSCertificateList`. Certificate bodies are treated
//! as opaque DER octets, matching the crate's no-cryptography scope.
//!
//! The list no longer needs the bespoke dissector the source used: the
//! generic `PacketList` field kind already parses back-to-back items inside
//! a bounded budget and stops cleanly (never looping on a zero-length
//! entry) the moment one doesn't fit, which is exactly the behavior the
//! inner loop there was hand-written to achieve.

use crate::field::{self, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::{LayerId, Schema};

fn peek_certificate(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 3 {
        return None;
    }
    let length = field::read_uint_be(&bytes[0..3]) as usize;
    Some(3 + length)
}

const CERTIFICATE_FIELDS: &[FieldDescriptor] = &[
    field::length_of("length", FieldKind::UInt { width: 3, enum_map: None }, "data"),
    field::plain(
        "data",
        FieldKind::Bytes { length_from: "length" },
        FieldDefault::Bytes(b""),
    ),
];

pub static CERTIFICATE_SCHEMA: Schema = Schema {
    name: "TLSCertificate",
    fields: CERTIFICATE_FIELDS,
    peek_len: Some(peek_certificate),
};

const LIST_FIELDS: &[FieldDescriptor] = &[
    field::length_of(
        "length",
        FieldKind::UInt { width: 3, enum_map: None },
        "certificates",
    ),
    field::plain(
        "certificates",
        FieldKind::PacketList {
            item: LayerId::TlsCertificate,
            length_from: "length",
        },
        FieldDefault::EmptyList,
    ),
];

pub static LIST_SCHEMA: Schema = Schema {
    name: "TLSCertificateList",
    fields: LIST_FIELDS,
    peek_len: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;
    use crate::packet::Packet;

    #[test]
    fn zero_length_certificate_terminates_instead_of_looping() {
        // length=0 (3 bytes of 00), followed by junk that would spin a naive
        // loop forever if it advanced zero bytes per iteration.
        let bytes = [0x00, 0x00, 0x00, 0xAA, 0xBB];
        let packet = Packet::dissect(LayerId::TlsCertificateList, &bytes);
        // length field only covers 0 declared certificate bytes; nothing to
        // parse within that budget.
        let certs = packet.field("certificates").and_then(Value::as_packets).unwrap();
        assert!(certs.is_empty());
    }

    #[test]
    fn truncated_inner_certificate_stops_cleanly_keeping_prior_entries() {
        // One well-formed 2-byte certificate (length=2, data=AA BB), declared
        // outer length covers it plus 3 more bytes that don't form a full
        // second certificate.
        let mut bytes = vec![0x00, 0x00, 0x09]; // outer length = 9
        bytes.extend([0x00, 0x00, 0x02, 0xAA, 0xBB]); // cert 1: length=2, data
        bytes.extend([0x00, 0x00, 0xff]); // cert 2 header claims 255 more bytes, none present
        let packet = Packet::dissect(LayerId::TlsCertificateList, &bytes);
        let certs = packet.field("certificates").and_then(Value::as_packets).unwrap();
        assert_eq!(certs.len(), 1);
        assert_eq!(
            certs[0].field("data").and_then(Value::as_bytes).map(|b| b.as_ref()),
            Some(&[0xAA, 0xBB][..])
        );
    }
}
