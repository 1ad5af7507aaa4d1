//! veilwire: a declarative (D)TLS record-and-handshake codec.
//!
//! The core is a generic, data-driven **packet engine**: composite message
//! types are described once as an ordered table of [`field::FieldDescriptor`]
//! ([`schema`]), and the same table drives both dissection (raw octets ->
//! structured [`packet::Packet`]) and building (structured `Packet` -> raw
//! octets). Length and count fields can reference a sibling field by name and
//! are resolved lazily at build time ([`field`]); which concrete message
//! class follows a given layer is decided at dissect time by the
//! [`binder`], a small registry of `(parent layer, discriminator value) ->
//! child layer` rules.
//!
//! The (D)TLS message set itself — records, handshake bodies, extensions,
//! alerts, heartbeats, certificates, DTLS's sequencing fields — lives in
//! [`tls`] as schema *data*; none of it is hand-written parsing code. The
//! [`ssl`] module is the one piece of non-generic logic: it picks the outer
//! record class from the underlay and greedily walks a stream of records.
//!
//! ```
//! use veilwire::{Packet, LayerId};
//!
//! // 0x15 alert, TLS 1.0, length 2, level=fatal, description=handshake_failure
//! let bytes = [0x15, 0x03, 0x01, 0x00, 0x02, 0x02, 0x28];
//! let record = Packet::dissect(LayerId::TlsRecord, &bytes);
//! let alert = record.next_layer().expect("alert payload");
//! assert_eq!(alert.field("level").and_then(|v| v.as_uint()), Some(0x02));
//! assert_eq!(record.build().unwrap().as_ref(), &bytes);
//! ```
//!
//! This crate performs no cryptography: certificate bodies and key-exchange
//! blobs are opaque octet strings, and it does not drive a TLS state
//! machine. It is a codec, not a client or a server.

pub mod binder;
pub mod clock;
pub mod error;
pub mod field;
pub mod packet;
pub mod schema;
pub mod ssl;
pub mod tls;

pub use clock::{Clock, EntropySource, OsEntropy, SystemClock};
pub use error::{CodecError, Result};
pub use field::Value;
pub use packet::{BuildEnv, InjectedEnv, Packet, Payload};
pub use schema::LayerId;
pub use ssl::{Ssl, Underlay};
