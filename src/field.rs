//! The field kernel: elementary schema elements shared by every (D)TLS
//! message class.
//!
//! A [`FieldDescriptor`] is pure, `'static` data — the schema really is data,
//! per the packet engine's design. Nothing here knows about TLS; the TLS
//! message shapes live in [`crate::tls`] as tables of these descriptors.

use bytes::{Bytes, BytesMut};

use crate::schema::LayerId;

/// Runtime value held by a field in a dissected or under-construction packet.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UInt(u64),
    Bytes(Bytes),
    UIntList(Vec<u64>),
    Packets(Vec<crate::packet::Packet>),
}

impl Value {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_uint_list(&self) -> Option<&[u64]> {
        match self {
            Value::UIntList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_packets(&self) -> Option<&[crate::packet::Packet]> {
        match self {
            Value::Packets(v) => Some(v),
            _ => None,
        }
    }
}

/// A `(numeric value, label)` table used purely for presentation/matching.
/// Parsing always preserves the raw integer even when it has no entry here.
pub type EnumMap = &'static [(u64, &'static str)];

pub fn enum_label(map: EnumMap, value: u64) -> Option<&'static str> {
    map.iter().find(|(v, _)| *v == value).map(|(_, label)| *label)
}

/// The shape of a field's on-the-wire representation.
#[derive(Clone, Copy)]
pub enum FieldKind {
    /// A big-endian integer encoded in `width` bytes (1..=8). `enum_map`, if
    /// present, is informational only.
    UInt { width: usize, enum_map: Option<EnumMap> },
    /// A fixed-length opaque byte string.
    FixedBytes { len: usize },
    /// A variable-length opaque byte string whose length in bytes is given
    /// by the sibling field named `length_from`.
    Bytes { length_from: &'static str },
    /// A homogeneous list of fixed-width big-endian integers. The sibling
    /// field named `length_from` holds the *byte* length of the whole list;
    /// the element count is `byte_length / item_width`.
    UIntList {
        item_width: usize,
        length_from: &'static str,
        enum_map: Option<EnumMap>,
    },
    /// A list of nested packets of class `item`, bounded to exactly the byte
    /// length given by the sibling field named `length_from`. Items are
    /// parsed back-to-back; each item's own schema determines where the next
    /// one starts.
    PacketList {
        item: LayerId,
        length_from: &'static str,
    },
    /// Consumes whatever octets remain in the input, with no length field of
    /// its own. The only user is `TLSHeartBeat.padding`: dissection keeps
    /// every trailing byte rather than trusting a length, since nothing
    /// declares how much padding is actually present on the wire.
    Remainder,
    /// A fixed-length opaque byte string present only when the sibling field
    /// named `gate` holds a non-zero value; absent (zero bytes) otherwise.
    /// The only user is `TLSURLAndHash.hash`, gated by `hash_present`.
    GatedBytes { gate: &'static str, len: usize },
}

/// How an unset field's value is produced.
#[derive(Clone, Copy)]
pub enum FieldDefault {
    /// A literal default value, e.g. `content_type = 0xff`.
    UInt(u64),
    /// A literal default byte string, usually empty (`b""`).
    Bytes(&'static [u8]),
    /// An empty list (`UIntList` or `Packets`, matching the field's kind).
    EmptyList,
    /// Read from the injected [`crate::clock::Clock`] — used by
    /// `gmt_unix_time`.
    ClockUnixTime,
    /// Filled from the injected [`crate::clock::EntropySource`] — used by
    /// `random_bytes`.
    EntropyBytes(usize),
    /// This field has no standalone default: it is a length/count field (or
    /// the field that bounds this layer's payload) and must be resolved by
    /// measuring another field or the payload, at build time.
    Unresolved,
}

/// An immutable schema element. See `crate::field` module docs.
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Set when this field's value should be derived from the *serialized
    /// byte size* of the named sibling field at build time.
    pub length_of: Option<&'static str>,
    /// Set when this field's value should be derived from the *element
    /// count* of the named sibling field at build time.
    pub count_of: Option<&'static str>,
    /// Pure transform applied to a measured size/count before it is stored,
    /// e.g. "stored length = measured + 1". Identity for every field in this
    /// crate's schema; kept as a real hook because the resolver contract
    /// requires it.
    pub adjust: fn(u64) -> u64,
    /// True for the one field per payload-bearing schema whose value bounds
    /// how many of the remaining bytes belong to this layer's payload
    /// (`TLSRecord.length`, `TLSExtension.length`, ...). At most one field
    /// per schema may set this.
    pub bounds_payload: bool,
    /// Set only for `TLSHeartBeat.padding`: pads the named sibling (`data`)
    /// up to `minimum` total bytes with `fill`, resolved after every other
    /// field (including length fields) has a value.
    pub pad_to: Option<PadRule>,
    pub default: FieldDefault,
}

#[derive(Clone, Copy)]
pub struct PadRule {
    pub of: &'static str,
    pub minimum: usize,
    pub fill: u8,
}

pub const fn identity(x: u64) -> u64 {
    x
}

/// A plain field with a concrete default: content fields, never a
/// length/count/payload-bound field.
pub const fn plain(name: &'static str, kind: FieldKind, default: FieldDefault) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind,
        length_of: None,
        count_of: None,
        adjust: identity,
        bounds_payload: false,
        pad_to: None,
        default,
    }
}

/// A length field resolved at build time from the serialized byte size of
/// the sibling named `target`, unless the caller sets it explicitly.
pub const fn length_of(name: &'static str, kind: FieldKind, target: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind,
        length_of: Some(target),
        count_of: None,
        adjust: identity,
        bounds_payload: false,
        pad_to: None,
        default: FieldDefault::Unresolved,
    }
}

/// A count field resolved at build time from the element count of the
/// sibling named `target`, unless the caller sets it explicitly.
pub const fn count_of(name: &'static str, kind: FieldKind, target: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind,
        length_of: None,
        count_of: Some(target),
        adjust: identity,
        bounds_payload: false,
        pad_to: None,
        default: FieldDefault::Unresolved,
    }
}

/// The one field per payload-bearing schema whose value both defaults to,
/// and at dissect time bounds, the length of this layer's payload.
pub const fn bounds_payload(name: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind,
        length_of: None,
        count_of: None,
        adjust: identity,
        bounds_payload: true,
        pad_to: None,
        default: FieldDefault::Unresolved,
    }
}

/// `TLSHeartBeat.padding`: consumes the remainder on dissect, pads `of` up
/// to `minimum` bytes with `fill` on build.
pub const fn padding(name: &'static str, of: &'static str, minimum: usize, fill: u8) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Remainder,
        length_of: None,
        count_of: None,
        adjust: identity,
        bounds_payload: false,
        pad_to: Some(PadRule { of, minimum, fill }),
        default: FieldDefault::Unresolved,
    }
}

impl FieldDescriptor {
    pub(crate) fn is_length_field(&self) -> bool {
        matches!(self.default, FieldDefault::Unresolved) && self.pad_to.is_none()
    }
}

pub(crate) fn write_uint_be(buf: &mut BytesMut, value: u64, width: usize) {
    let full = value.to_be_bytes();
    buf.extend_from_slice(&full[8 - width..]);
}

pub(crate) fn read_uint_be(bytes: &[u8]) -> u64 {
    let mut full = [0u8; 8];
    full[8 - bytes.len()..].copy_from_slice(bytes);
    u64::from_be_bytes(full)
}

/// Size in bytes a value would occupy on the wire for a given field kind.
/// `PacketList` sizes require walking nested packets, hence the `build_fn`
/// callback into the packet engine rather than a self-contained formula.
pub(crate) fn value_size(kind: &FieldKind, value: &Value) -> usize {
    match (kind, value) {
        (FieldKind::UInt { width, .. }, _) => *width,
        (FieldKind::FixedBytes { len }, _) => *len,
        (FieldKind::Bytes { .. }, Value::Bytes(b)) => b.len(),
        (FieldKind::UIntList { item_width, .. }, Value::UIntList(list)) => list.len() * item_width,
        (FieldKind::PacketList { .. }, Value::Packets(items)) => {
            items.iter().map(|p| p.encoded_len()).sum()
        }
        (FieldKind::Remainder, Value::Bytes(b)) => b.len(),
        (FieldKind::GatedBytes { .. }, Value::Bytes(b)) => b.len(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_be_roundtrip_truncated() {
        let mut buf = BytesMut::new();
        write_uint_be(&mut buf, 0x000123, 3);
        assert_eq!(&buf[..], &[0x00, 0x01, 0x23]);
        assert_eq!(read_uint_be(&buf), 0x000123);
    }

    #[test]
    fn uint_be_full_width() {
        let mut buf = BytesMut::new();
        write_uint_be(&mut buf, 0xdead_beef, 4);
        assert_eq!(&buf[..], &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn enum_label_lookup_and_unknown_passthrough() {
        const MAP: EnumMap = &[(0x01, "warning"), (0x02, "fatal")];
        assert_eq!(enum_label(MAP, 0x02), Some("fatal"));
        assert_eq!(enum_label(MAP, 0x77), None);
    }
}
