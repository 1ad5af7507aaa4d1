//! The layer binder: a process-wide, read-only-after-init registry mapping
//! `(parent layer, {field: value})` to the child layer that should be
//! dissected next.
//!
//! Rules are registered once, in a fixed order, the same way the original
//! Python layer this crate reimplements built its `bind_layers` table at
//! import time. Lookup is first-match-wins in registration order, so more
//! specific rules must be registered before more general fallbacks (none of
//! the current table needs that, but the registry preserves order rather
//! than e.g. sorting by specificity, so a future rule can rely on it).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::field::Value;
use crate::schema::LayerId;

struct Rule {
    parent: LayerId,
    field: &'static str,
    value: u64,
    child: LayerId,
}

fn register() -> Vec<Rule> {
    use LayerId::*;
    let mut rules = Vec::new();
    let mut bind = |parent, field, value, child| {
        rules.push(Rule {
            parent,
            field,
            value,
            child,
        })
    };

    // TLSRecord.content_type -> handshake / alert / change_cipher_spec / heartbeat
    bind(TlsRecord, "content_type", 20, TlsChangeCipherSpec);
    bind(TlsRecord, "content_type", 21, TlsAlert);
    bind(TlsRecord, "content_type", 22, TlsHandshake);
    bind(TlsRecord, "content_type", 24, TlsHeartBeat);

    // DTLSRecord.content_type -> DTLSHandshake. Only this one binding: the
    // source this table mirrors never binds DTLSRecord to ChangeCipherSpec,
    // Alert, or HeartBeat either.
    bind(DtlsRecord, "content_type", 22, DtlsHandshake);

    // TLSHandshake.msg_type -> concrete handshake message bodies
    bind(TlsHandshake, "msg_type", 1, TlsClientHello);
    bind(TlsHandshake, "msg_type", 2, TlsServerHello);
    bind(TlsHandshake, "msg_type", 11, TlsCertificateList);
    bind(TlsHandshake, "msg_type", 14, TlsServerHelloDone);

    // DTLSHandshake.msg_type -> DTLS-specific bodies. Only ClientHello: the
    // source binds nothing else under DTLSHandshake, and TLSServerKeyExchange/
    // DTLSHelloVerify/TLSCertificateList are reachable by explicit caller
    // dissection of the extracted data, same as TLSDHServerParams below.
    bind(DtlsHandshake, "msg_type", 1, DtlsClientHello);

    // TLSExtension.extension_type -> extension bodies.
    bind(TlsExtension, "extension_type", 0x0000, TlsServerNameIndication);
    bind(TlsExtension, "extension_type", 0x0001, TlsExtMaxFragmentLength);
    // Kept exactly as the original bound it, despite the semantic mismatch
    // between extension 0x0002 (client_certificate_url) and the server
    // certificate-URL-chain structure it is bound to here.
    bind(TlsExtension, "extension_type", 0x0002, TlsExtCertificateUrl);

    rules
}

static REGISTRY: Lazy<Vec<Rule>> = Lazy::new(register);

/// Looks up the child layer for `parent` given its already-parsed fields.
/// Returns `None` on no match — which is not an error, just "keep the rest
/// as a trailer".
pub fn resolve(parent: LayerId, fields: &HashMap<&'static str, Value>) -> Option<LayerId> {
    REGISTRY.iter().find_map(|rule| {
        if rule.parent != parent {
            return None;
        }
        let actual = fields.get(rule.field)?.as_uint()?;
        (actual == rule.value).then_some(rule.child)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins_and_unknown_discriminator_is_none() {
        let mut fields = HashMap::new();
        fields.insert("content_type", Value::UInt(22));
        assert_eq!(resolve(LayerId::TlsRecord, &fields), Some(LayerId::TlsHandshake));

        fields.insert("content_type", Value::UInt(0xff));
        assert_eq!(resolve(LayerId::TlsRecord, &fields), None);
    }

    #[test]
    fn server_key_exchange_is_never_binder_dissected() {
        // TLSServerKeyExchange.data carries no discriminator for which
        // key-exchange shape it holds, so it is never auto-dissected; a
        // caller who knows the cipher suite is Diffie-Hellman must layer
        // TLSDHServerParams on the extracted `data` bytes explicitly.
        let fields = HashMap::new();
        assert_eq!(resolve(LayerId::TlsServerKeyExchange, &fields), None);
    }

    #[test]
    fn dtls_record_only_binds_handshake() {
        let mut fields = HashMap::new();
        fields.insert("content_type", Value::UInt(22));
        assert_eq!(resolve(LayerId::DtlsRecord, &fields), Some(LayerId::DtlsHandshake));

        fields.insert("content_type", Value::UInt(20));
        assert_eq!(resolve(LayerId::DtlsRecord, &fields), None);
    }
}
