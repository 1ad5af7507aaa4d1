//! `TLSHeartBeat`. Dissection keeps everything after the declared `data`
//! length as `padding`, however much that is; building pads `data` up to a
//! minimum total of 16 octets using `0x50` (`'P'`), matching the source this
//! schema mirrors.

use crate::field::{self, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::Schema;

const FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "type",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(&[(0x01, "request")]),
        },
        FieldDefault::UInt(0x01),
    ),
    field::length_of("length", FieldKind::UInt { width: 2, enum_map: None }, "data"),
    field::plain(
        "data",
        FieldKind::Bytes { length_from: "length" },
        FieldDefault::Bytes(b""),
    ),
    field::padding("padding", "data", 16, b'P'),
];

pub static SCHEMA: Schema = Schema {
    name: "TLSHeartBeat",
    fields: FIELDS,
    peek_len: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;
    use crate::packet::Packet;
    use crate::schema::LayerId;

    #[test]
    fn short_data_is_padded_to_sixteen_bytes_on_build() {
        let packet = Packet::new(LayerId::TlsHeartBeat).with_field("data", Value::Bytes(b"hi".as_slice().into()));
        let out = packet.build().unwrap();
        // type(1) + length(2) + data(2) + padding(14) = 19
        assert_eq!(out.len(), 19);
        assert!(out[5..].iter().all(|&b| b == b'P'));
    }

    #[test]
    fn dissect_keeps_all_trailing_bytes_as_padding_even_past_sixteen() {
        let mut bytes = vec![0x01, 0x00, 0x02, b'h', b'i'];
        bytes.extend(std::iter::repeat(b'P').take(40));
        let packet = Packet::dissect(LayerId::TlsHeartBeat, &bytes);
        let padding = packet.field("padding").and_then(Value::as_bytes).unwrap();
        assert_eq!(padding.len(), 40);
    }
}
