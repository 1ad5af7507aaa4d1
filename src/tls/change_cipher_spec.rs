//! `TLSChangeCipherSpec`: a single opaque message byte.

use crate::field::{self, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::Schema;

const FIELDS: &[FieldDescriptor] = &[field::plain(
    "message",
    FieldKind::FixedBytes { len: 1 },
    FieldDefault::Bytes(&[0x01]),
)];

pub static SCHEMA: Schema = Schema {
    name: "TLSChangeCipherSpec",
    fields: FIELDS,
    peek_len: None,
};
