//! The generic packet engine: dissection and building over a [`Schema`],
//! independent of what that schema describes.

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use log::{trace, warn};

use crate::binder;
use crate::clock::{Clock, EntropySource};
use crate::error::{CodecError, Result};
use crate::field::{self, FieldDefault, FieldKind, Value};
use crate::schema::LayerId;

/// A dissected or under-construction packet: a class identity, its own
/// field values, and an optional trailing payload.
#[derive(Debug, Clone)]
pub struct Packet {
    pub layer: LayerId,
    fields: HashMap<&'static str, Value>,
    pub payload: Option<Box<Payload>>,
}

/// What follows a packet's own fields.
#[derive(Debug, Clone)]
pub enum Payload {
    /// The binder recognized a child class and it dissected cleanly.
    Layer(Packet),
    /// Either the binder found nothing, or dissection of this layer's own
    /// fields stopped early. Either way the remaining octets are kept
    /// verbatim rather than discarded.
    Trailer(Bytes),
}

impl Packet {
    /// Constructs an empty instance of `layer`, resolving `gmt_unix_time`/
    /// `random_bytes`-style defaults from the default system clock/entropy
    /// source. See [`Packet::new_with`].
    pub fn new(layer: LayerId) -> Self {
        Self::new_with(layer, &SystemDefaults)
    }

    /// Constructs an empty instance of `layer`, resolving any
    /// `FieldDefault::ClockUnixTime`/`FieldDefault::EntropyBytes` fields in
    /// its schema from `env` immediately and storing them as ordinary field
    /// values. These defaults are read exactly once, here, never again on
    /// a later `build()` call — `gmt_unix_time`/`random_bytes` stay fixed
    /// for the lifetime of this instance.
    pub fn new_with(layer: LayerId, env: &dyn BuildEnv) -> Self {
        let mut fields: HashMap<&'static str, Value> = HashMap::new();
        for desc in layer.schema().fields {
            match desc.default {
                FieldDefault::ClockUnixTime => {
                    fields.insert(desc.name, Value::UInt(env.clock().unix_time() as u64));
                }
                FieldDefault::EntropyBytes(n) => {
                    let mut buf = vec![0u8; n];
                    env.entropy().fill(&mut buf);
                    fields.insert(desc.name, Value::Bytes(Bytes::from(buf)));
                }
                _ => {}
            }
        }
        Packet {
            layer,
            fields,
            payload: None,
        }
    }

    pub fn with_field(mut self, name: &'static str, value: Value) -> Self {
        self.fields.insert(name, value);
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set_field(&mut self, name: &'static str, value: Value) {
        self.fields.insert(name, value);
    }

    /// The nested packet one level down, if the binder recognized one.
    pub fn next_layer(&self) -> Option<&Packet> {
        match self.payload.as_deref() {
            Some(Payload::Layer(p)) => Some(p),
            _ => None,
        }
    }

    /// Any octets that dissection could not attribute to a recognized
    /// layer: either this layer's own fields ran short, or the binder
    /// returned nothing for what followed them.
    pub fn trailer(&self) -> Option<&Bytes> {
        match self.payload.as_deref() {
            Some(Payload::Trailer(b)) => Some(b),
            _ => None,
        }
    }

    /// Byte length this packet would serialize to. Used by `PacketList`
    /// fields to size themselves without committing octets to an outer
    /// buffer yet.
    pub fn encoded_len(&self) -> usize {
        self.build().map(|b| b.len()).unwrap_or(0)
    }

    /// Serializes this packet. `gmt_unix_time`/`random_bytes`-style
    /// defaults were already resolved once at construction (see
    /// [`Packet::new_with`]), so repeated calls on the same instance always
    /// produce the same bytes.
    pub fn build(&self) -> Result<Bytes> {
        build_layer(self.layer, &self.fields, self.payload.as_deref())
    }

    /// Dissects `input` as an instance of `layer`. Infallible: malformed or
    /// truncated input never produces an error, only a shorter field list
    /// and/or a trailer. The only real errors (`SchemaError`,
    /// `MissingDependency`) are build-time faults.
    pub fn dissect(layer: LayerId, input: &[u8]) -> Packet {
        dissect_layer(layer, input)
    }
}

/// The clock/entropy source `Packet::new_with` resolves construction-time
/// defaults against.
pub trait BuildEnv {
    fn clock(&self) -> &dyn Clock;
    fn entropy(&self) -> &dyn EntropySource;
}

struct SystemDefaults;

impl BuildEnv for SystemDefaults {
    fn clock(&self) -> &dyn Clock {
        &crate::clock::SystemClock
    }
    fn entropy(&self) -> &dyn EntropySource {
        &crate::clock::OsEntropy
    }
}

/// Pairs an explicit clock/entropy with `BuildEnv`, for tests and callers
/// who want deterministic `gmt_unix_time`/`random_bytes`.
pub struct InjectedEnv<'a> {
    pub clock: &'a dyn Clock,
    pub entropy: &'a dyn EntropySource,
}

impl<'a> BuildEnv for InjectedEnv<'a> {
    fn clock(&self) -> &dyn Clock {
        self.clock
    }
    fn entropy(&self) -> &dyn EntropySource {
        self.entropy
    }
}

// ---------------------------------------------------------------------
// Dissection
// ---------------------------------------------------------------------

fn dissect_layer(layer: LayerId, input: &[u8]) -> Packet {
    let schema = layer.schema();
    let mut fields: HashMap<&'static str, Value> = HashMap::new();
    let mut pos = 0usize;
    let mut ran_short = false;

    for desc in schema.fields {
        match parse_field(desc, &input[pos..], &fields) {
            Some((value, used)) => {
                fields.insert(desc.name, value);
                pos += used;
            }
            None => {
                trace!("{}: short input parsing field '{}'", schema.name, desc.name);
                ran_short = true;
                break;
            }
        }
    }

    if ran_short {
        let trailer = Bytes::copy_from_slice(&input[pos..]);
        let payload = (!trailer.is_empty()).then(|| Box::new(Payload::Trailer(trailer)));
        return Packet {
            layer,
            fields,
            payload,
        };
    }

    let bound_desc = schema.fields.iter().find(|d| d.bounds_payload);
    let payload = match bound_desc {
        None => None,
        Some(desc) => {
            let declared = fields.get(desc.name).and_then(Value::as_uint).unwrap_or(0) as usize;
            let available = input.len().saturating_sub(pos);
            let take = declared.min(available);
            if declared > available {
                trace!(
                    "{}: declared payload length {} exceeds {} available byte(s)",
                    schema.name,
                    declared,
                    available
                );
            }
            let sub = &input[pos..pos + take];
            if sub.is_empty() {
                None
            } else {
                match binder::resolve(layer, &fields) {
                    Some(child) => Some(Box::new(Payload::Layer(dissect_layer(child, sub)))),
                    None => Some(Box::new(Payload::Trailer(Bytes::copy_from_slice(sub)))),
                }
            }
        }
    };

    Packet {
        layer,
        fields,
        payload,
    }
}

fn parse_field(
    desc: &field::FieldDescriptor,
    input: &[u8],
    parsed: &HashMap<&'static str, Value>,
) -> Option<(Value, usize)> {
    match &desc.kind {
        FieldKind::UInt { width, .. } => {
            if input.len() < *width {
                return None;
            }
            Some((Value::UInt(field::read_uint_be(&input[..*width])), *width))
        }
        FieldKind::FixedBytes { len } => {
            if input.len() < *len {
                return None;
            }
            Some((Value::Bytes(Bytes::copy_from_slice(&input[..*len])), *len))
        }
        FieldKind::Bytes { length_from } => {
            let n = sibling_uint(parsed, desc.name, length_from)? as usize;
            if input.len() < n {
                return None;
            }
            Some((Value::Bytes(Bytes::copy_from_slice(&input[..n])), n))
        }
        FieldKind::UIntList {
            item_width,
            length_from,
            ..
        } => {
            let byte_len = sibling_uint(parsed, desc.name, length_from)? as usize;
            if input.len() < byte_len {
                return None;
            }
            let count = byte_len / item_width;
            let mut list = Vec::with_capacity(count);
            for i in 0..count {
                let start = i * item_width;
                list.push(field::read_uint_be(&input[start..start + item_width]));
            }
            Some((Value::UIntList(list), byte_len))
        }
        FieldKind::PacketList { item, length_from } => {
            let byte_len = sibling_uint(parsed, desc.name, length_from)? as usize;
            if input.len() < byte_len {
                return None;
            }
            let budget = &input[..byte_len];
            let items = parse_packet_list(*item, budget);
            Some((Value::Packets(items), byte_len))
        }
        FieldKind::Remainder => Some((
            Value::Bytes(Bytes::copy_from_slice(input)),
            input.len(),
        )),
        FieldKind::GatedBytes { gate, len } => {
            let open = sibling_uint(parsed, desc.name, gate)? != 0;
            if !open {
                return Some((Value::Bytes(Bytes::new()), 0));
            }
            if input.len() < *len {
                return None;
            }
            Some((Value::Bytes(Bytes::copy_from_slice(&input[..*len])), *len))
        }
    }
}

fn sibling_uint(
    parsed: &HashMap<&'static str, Value>,
    field_name: &'static str,
    reference: &'static str,
) -> Option<u64> {
    match parsed.get(reference).and_then(Value::as_uint) {
        Some(v) => Some(v),
        None => {
            // A length field that references a sibling which hasn't been
            // parsed yet (or doesn't exist) is a bug in this crate's own
            // static schema tables, never something malformed input can
            // trigger: schema authors declare `length_from` fields to
            // always precede the field they measure.
            panic!(
                "schema error: field '{}' references undefined/unparsed sibling '{}'",
                field_name, reference
            )
        }
    }
}

/// Parses back-to-back instances of `item` out of `budget`, stopping at the
/// first one that doesn't fit or fails to make progress. Whatever bytes are
/// left over are logged and dropped rather than surfaced, matching the
/// "stop cleanly with what we have" contract every bounded list in this
/// schema shares (certificate lists, SNI host-name lists, extension lists,
/// certificate-URL lists).
pub(crate) fn parse_packet_list(item: LayerId, budget: &[u8]) -> Vec<Packet> {
    let schema = item.schema();
    let peek = schema
        .peek_len
        .unwrap_or_else(|| panic!("{} has no peek_len but appears in a PacketList", schema.name));

    let mut items = Vec::new();
    let mut pos = 0usize;

    while pos < budget.len() {
        let remaining = &budget[pos..];
        let total = match peek(remaining) {
            Some(n) if n > 0 && n <= remaining.len() => n,
            _ => break,
        };
        let packet = dissect_layer(item, &remaining[..total]);
        items.push(packet);
        pos += total;
    }

    if pos < budget.len() {
        warn!(
            "{}: {} trailing byte(s) in list could not form another item",
            schema.name,
            budget.len() - pos
        );
    }

    items
}

// ---------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------

fn build_layer(
    layer: LayerId,
    fields: &HashMap<&'static str, Value>,
    payload: Option<&Payload>,
) -> Result<Bytes> {
    let schema = layer.schema();

    let payload_bytes: Bytes = match payload {
        Some(Payload::Layer(p)) => build_layer(p.layer, p.fields_ref(), p.payload.as_deref())?,
        Some(Payload::Trailer(b)) => b.clone(),
        None => Bytes::new(),
    };

    let mut resolved: HashMap<&'static str, Value> = HashMap::with_capacity(schema.fields.len());
    for desc in schema.fields {
        if desc.is_length_field() || desc.pad_to.is_some() {
            continue;
        }
        let value = content_value(desc, fields)?;
        resolved.insert(desc.name, value);
    }
    for desc in schema.fields {
        if !desc.is_length_field() {
            continue;
        }
        let value = if let Some(v) = fields.get(desc.name) {
            v.clone()
        } else {
            resolve_length_field(desc, schema, &resolved, payload_bytes.len())?
        };
        resolved.insert(desc.name, value);
    }
    for desc in schema.fields {
        let Some(rule) = desc.pad_to else { continue };
        let value = if let Some(v) = fields.get(desc.name) {
            v.clone()
        } else {
            let of_desc = schema
                .fields
                .iter()
                .find(|d| d.name == rule.of)
                .ok_or(CodecError::SchemaError {
                    field: desc.name,
                    reference: rule.of,
                })?;
            let of_value = resolved.get(rule.of).ok_or(CodecError::MissingDependency {
                field: desc.name,
                reference: rule.of,
            })?;
            let measured = field::value_size(&of_desc.kind, of_value);
            let pad_len = rule.minimum.saturating_sub(measured);
            Value::Bytes(Bytes::from(vec![rule.fill; pad_len]))
        };
        resolved.insert(desc.name, value);
    }

    let mut buf = BytesMut::new();
    for desc in schema.fields {
        serialize_field(desc, &resolved[desc.name], &mut buf)?;
    }
    buf.extend_from_slice(&payload_bytes);
    Ok(buf.freeze())
}

fn content_value(desc: &field::FieldDescriptor, fields: &HashMap<&'static str, Value>) -> Result<Value> {
    if let Some(v) = fields.get(desc.name) {
        return Ok(v.clone());
    }
    Ok(match desc.default {
        FieldDefault::UInt(v) => Value::UInt(v),
        FieldDefault::Bytes(b) => Value::Bytes(Bytes::from_static(b)),
        FieldDefault::EmptyList => match desc.kind {
            FieldKind::UIntList { .. } => Value::UIntList(Vec::new()),
            FieldKind::PacketList { .. } => Value::Packets(Vec::new()),
            _ => Value::Bytes(Bytes::new()),
        },
        FieldDefault::ClockUnixTime | FieldDefault::EntropyBytes(_) => {
            unreachable!("resolved once in Packet::new_with, never during build")
        }
        FieldDefault::Unresolved => {
            unreachable!("content_value called on a length/count field")
        }
    })
}

fn resolve_length_field(
    desc: &field::FieldDescriptor,
    schema: &crate::schema::Schema,
    resolved: &HashMap<&'static str, Value>,
    payload_len: usize,
) -> Result<Value> {
    let measured = if let Some(target) = desc.length_of {
        let target_desc = schema
            .fields
            .iter()
            .find(|d| d.name == target)
            .ok_or(CodecError::SchemaError {
                field: desc.name,
                reference: target,
            })?;
        let value = resolved.get(target).ok_or(CodecError::MissingDependency {
            field: desc.name,
            reference: target,
        })?;
        field::value_size(&target_desc.kind, value) as u64
    } else if let Some(target) = desc.count_of {
        let value = resolved.get(target).ok_or(CodecError::MissingDependency {
            field: desc.name,
            reference: target,
        })?;
        match value {
            Value::UIntList(v) => v.len() as u64,
            Value::Packets(v) => v.len() as u64,
            _ => {
                return Err(CodecError::SchemaError {
                    field: desc.name,
                    reference: target,
                })
            }
        }
    } else if desc.bounds_payload {
        payload_len as u64
    } else {
        return Err(CodecError::SchemaError {
            field: desc.name,
            reference: desc.name,
        });
    };
    Ok(Value::UInt((desc.adjust)(measured)))
}

fn serialize_field(desc: &field::FieldDescriptor, value: &Value, buf: &mut BytesMut) -> Result<()> {
    match (&desc.kind, value) {
        (FieldKind::UInt { width, .. }, Value::UInt(v)) => {
            field::write_uint_be(buf, *v, *width);
        }
        (FieldKind::FixedBytes { .. }, Value::Bytes(b)) => {
            buf.extend_from_slice(b);
        }
        (FieldKind::Bytes { .. }, Value::Bytes(b)) => {
            buf.extend_from_slice(b);
        }
        (FieldKind::Remainder, Value::Bytes(b)) => {
            buf.extend_from_slice(b);
        }
        (FieldKind::GatedBytes { .. }, Value::Bytes(b)) => {
            buf.extend_from_slice(b);
        }
        (FieldKind::UIntList { item_width, .. }, Value::UIntList(list)) => {
            for v in list {
                field::write_uint_be(buf, *v, *item_width);
            }
        }
        (FieldKind::PacketList { .. }, Value::Packets(items)) => {
            for item in items {
                buf.extend_from_slice(&item.build()?);
            }
        }
        _ => {
            return Err(CodecError::SchemaError {
                field: desc.name,
                reference: desc.name,
            })
        }
    }
    Ok(())
}

impl Packet {
    fn fields_ref(&self) -> &HashMap<&'static str, Value> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_support::{FixedClock, FixedEntropy};

    #[test]
    fn unknown_content_type_becomes_trailer_not_error() {
        // content_type=0xff, version=0x0301, length=0x0002, body=[0xAA,0xBB]
        let bytes = [0xff, 0x03, 0x01, 0x00, 0x02, 0xAA, 0xBB];
        let packet = Packet::dissect(LayerId::TlsRecord, &bytes);
        assert_eq!(packet.field("content_type").and_then(Value::as_uint), Some(0xff));
        assert!(packet.next_layer().is_none());
        assert_eq!(packet.trailer().map(|b| b.as_ref()), Some(&[0xAA, 0xBB][..]));
    }

    #[test]
    fn build_is_non_destructive_and_idempotent() {
        let packet = Packet::new(LayerId::TlsAlert)
            .with_field("level", Value::UInt(2))
            .with_field("description", Value::UInt(0));
        let first = packet.build().unwrap();
        let second = packet.build().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn deterministic_env_is_honored() {
        let env = InjectedEnv {
            clock: &FixedClock(1_700_000_000),
            entropy: &FixedEntropy(0x42),
        };
        let hello = Packet::new_with(LayerId::TlsClientHello, &env);
        assert_eq!(hello.field("gmt_unix_time").and_then(Value::as_uint), Some(1_700_000_000));
        assert_eq!(
            hello.field("random_bytes").and_then(Value::as_bytes).map(|b| b.as_ref()),
            Some(&[0x42u8; 28][..])
        );
    }

    #[test]
    fn clock_and_entropy_are_resolved_once_at_construction_not_per_build() {
        use crate::clock::test_support::CountingClock;
        use std::sync::atomic::Ordering;

        let clock = CountingClock::default();
        let env = InjectedEnv {
            clock: &clock,
            entropy: &FixedEntropy(0x07),
        };
        let hello = Packet::new_with(LayerId::TlsClientHello, &env);
        assert_eq!(clock.0.load(Ordering::SeqCst), 1);

        let first = hello.build().unwrap();
        let second = hello.build().unwrap();
        let _ = hello.encoded_len();

        assert_eq!(first, second);
        assert_eq!(clock.0.load(Ordering::SeqCst), 1);
    }
}
