//! The concrete (D)TLS schema: one module per message family, expressed as
//! `'static` field tables consumed by the generic packet engine.

pub mod alert;
pub mod certificate;
pub mod change_cipher_spec;
pub mod cipher_suites;
pub mod dtls;
pub mod extensions;
pub mod handshake;
pub mod heartbeat;
pub mod key_exchange;
pub mod record;

pub use cipher_suites::{TlsCipherSuite, TlsCompressionMethod};
