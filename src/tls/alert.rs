//! `TLSAlert`: a two-byte alert level and description.

use crate::field::{self, EnumMap, FieldDefault, FieldDescriptor, FieldKind};
use crate::schema::Schema;

pub const ALERT_LEVELS: EnumMap = &[(0x01, "warning"), (0x02, "fatal"), (0xff, "unknown")];

/// The full IANA-subset table from the source this schema mirrors. Numeric
/// key `43` has two candidate labels in that source (`BAD_CERTIFICATE` then
/// `UNSUPPORTED_CERTIFICATE` — a Python dict literal where the second
/// assignment silently wins); this table keeps the value that actually wins
/// there, `UNSUPPORTED_CERTIFICATE`.
pub const ALERT_DESCRIPTIONS: EnumMap = &[
    (0, "CLOSE_NOTIFY"),
    (10, "UNEXPECTED_MESSAGE"),
    (20, "BAD_RECORD_MAC"),
    (21, "DESCRIPTION_FAILED_RESERVED"),
    (22, "RECORD_OVERFLOW"),
    (30, "DECOMPRESSION_FAILURE"),
    (40, "HANDSHAKE_FAILURE"),
    (41, "NO_CERTIFICATE_RESERVED"),
    (43, "UNSUPPORTED_CERTIFICATE"),
    (44, "CERTIFICATE_REVOKED"),
    (45, "CERTIFICATE_EXPIRED"),
    (46, "CERTIFICATE_UNKNOWN"),
    (47, "ILLEGAL_PARAMETER"),
    (48, "UNKNOWN_CA"),
    (49, "ACCESS_DENIED"),
    (50, "DECODE_ERROR"),
    (51, "DECRYPT_ERROR"),
    (60, "EXPORT_RESTRICTION_RESERVED"),
    (70, "PROTOCOL_VERSION"),
    (71, "INSUFFICIENT_SECURITY"),
    (80, "INTERNAL_ERROR"),
    (86, "INAPPROPRIATE_FALLBACK"),
    (90, "USER_CANCELED"),
    (100, "NO_RENEGOTIATION"),
    (110, "UNSUPPORTED_EXTENSION"),
    (111, "CERTIFICATE_UNOBTAINABLE"),
    (112, "UNRECOGNIZED_NAME"),
    (113, "BAD_CERTIFICATE_STATUS_RESPONSE"),
    (114, "BAD_CERTIFICATE_HASH_VALUE"),
    (255, "UNKNOWN_255"),
];

const FIELDS: &[FieldDescriptor] = &[
    field::plain(
        "level",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(ALERT_LEVELS),
        },
        FieldDefault::UInt(0xff),
    ),
    field::plain(
        "description",
        FieldKind::UInt {
            width: 1,
            enum_map: Some(ALERT_DESCRIPTIONS),
        },
        FieldDefault::UInt(0xff),
    ),
];

pub static SCHEMA: Schema = Schema {
    name: "TLSAlert",
    fields: FIELDS,
    peek_len: None,
};
