//! Layer identity and schema lookup.
//!
//! `LayerId` names every concrete (D)TLS message class the engine knows how
//! to dissect/build. Each variant resolves to a `&'static` [`Schema`] — an
//! ordered field list and nothing else. The concrete schemas live in
//! `crate::tls::*`; this module only wires the lookup table together so
//! `field.rs` and `packet.rs` can stay TLS-agnostic.

use crate::field::FieldDescriptor;
use crate::tls;

/// Identifies a concrete (D)TLS message class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    TlsRecord,
    TlsHandshake,
    TlsClientHello,
    TlsServerHello,
    TlsExtension,
    TlsServerNameIndication,
    TlsServerName,
    TlsExtMaxFragmentLength,
    TlsExtCertificateUrl,
    TlsUrlAndHash,
    TlsAlert,
    TlsHeartBeat,
    TlsChangeCipherSpec,
    TlsCertificateList,
    TlsCertificate,
    TlsServerKeyExchange,
    TlsDhServerParams,
    TlsServerHelloDone,
    DtlsRecord,
    DtlsHandshake,
    DtlsClientHello,
    DtlsHelloVerify,
}

/// An ordered field list plus the bookkeeping the packet engine needs to
/// treat this class as a possible item inside a bounded list
/// (`peek_len`, used by [`crate::packet::parse_packet_list`] and by
/// `crate::ssl`'s greedy record loop).
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
    /// Given the start of a buffer, returns how many bytes this layer's
    /// *complete* instance occupies (its own fields plus its bounded
    /// payload), without fully dissecting it. `None` if the buffer doesn't
    /// even hold this layer's minimum fixed header. Only layers that can
    /// appear as items inside a bounded list, or as SSL records, define one.
    pub peek_len: Option<fn(&[u8]) -> Option<usize>>,
}

impl LayerId {
    pub fn schema(self) -> &'static Schema {
        match self {
            LayerId::TlsRecord => &tls::record::SCHEMA,
            LayerId::TlsHandshake => &tls::handshake::SCHEMA,
            LayerId::TlsClientHello => &tls::handshake::CLIENT_HELLO_SCHEMA,
            LayerId::TlsServerHello => &tls::handshake::SERVER_HELLO_SCHEMA,
            LayerId::TlsExtension => &tls::extensions::EXTENSION_SCHEMA,
            LayerId::TlsServerNameIndication => &tls::extensions::SNI_SCHEMA,
            LayerId::TlsServerName => &tls::extensions::SERVER_NAME_SCHEMA,
            LayerId::TlsExtMaxFragmentLength => &tls::extensions::MAX_FRAGMENT_LENGTH_SCHEMA,
            LayerId::TlsExtCertificateUrl => &tls::extensions::CERTIFICATE_URL_SCHEMA,
            LayerId::TlsUrlAndHash => &tls::extensions::URL_AND_HASH_SCHEMA,
            LayerId::TlsAlert => &tls::alert::SCHEMA,
            LayerId::TlsHeartBeat => &tls::heartbeat::SCHEMA,
            LayerId::TlsChangeCipherSpec => &tls::change_cipher_spec::SCHEMA,
            LayerId::TlsCertificateList => &tls::certificate::LIST_SCHEMA,
            LayerId::TlsCertificate => &tls::certificate::CERTIFICATE_SCHEMA,
            LayerId::TlsServerKeyExchange => &tls::key_exchange::SERVER_KEY_EXCHANGE_SCHEMA,
            LayerId::TlsDhServerParams => &tls::key_exchange::DH_SERVER_PARAMS_SCHEMA,
            LayerId::TlsServerHelloDone => &tls::key_exchange::SERVER_HELLO_DONE_SCHEMA,
            LayerId::DtlsRecord => &tls::dtls::RECORD_SCHEMA,
            LayerId::DtlsHandshake => &tls::dtls::HANDSHAKE_SCHEMA,
            LayerId::DtlsClientHello => &tls::dtls::CLIENT_HELLO_SCHEMA,
            LayerId::DtlsHelloVerify => &tls::dtls::HELLO_VERIFY_SCHEMA,
        }
    }
}
