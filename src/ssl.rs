//! The `Ssl` compound entry layer: picks the outermost record class from the
//! underlay (UDP -> `DTLSRecord`, everything else -> `TLSRecord`) and greedily
//! dissects a sequence of records out of a raw octet stream, the way a
//! higher-level TCP/UDP dissector would hand a reassembled payload to this
//! crate.
//!
//! TCP/UDP reassembly itself is out of scope for this crate (see the crate
//! docs); [`Underlay`] carries only the two facts a caller's transport layer
//! needs to supply: which transport it is, and its source/destination ports.

use bytes::Bytes;
use log::{debug, warn};

use crate::packet::Packet;
use crate::schema::LayerId;

/// The two facts this crate needs about the layer beneath it: transport kind
/// and ports, used only to pick the record class and to answer [`applies`].
/// This crate never reassembles TCP/UDP itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underlay {
    Tcp { src_port: u16, dst_port: u16 },
    Udp { src_port: u16, dst_port: u16 },
}

impl Underlay {
    fn record_class(self) -> LayerId {
        match self {
            Underlay::Udp { .. } => LayerId::DtlsRecord,
            Underlay::Tcp { .. } => LayerId::TlsRecord,
        }
    }
}

/// Whether a host dissector should attach `Ssl` beneath this underlay at
/// all: TCP with either port 443, or UDP with either port 4433, mirroring
/// the registered (D)TLS transport bindings.
pub fn applies(underlay: Underlay) -> bool {
    match underlay {
        Underlay::Tcp { src_port, dst_port } => src_port == 443 || dst_port == 443,
        Underlay::Udp { src_port, dst_port } => src_port == 4433 || dst_port == 4433,
    }
}

/// The result of greedily dissecting a stream of (D)TLS records: every
/// complete record found, in order, plus whatever octets were left over
/// (empty when the stream ended exactly on a record boundary).
#[derive(Debug, Clone)]
pub struct Ssl {
    pub records: Vec<Packet>,
    pub trailer: Option<Bytes>,
}

impl Ssl {
    /// Dissects `input` as a sequence of back-to-back records appropriate to
    /// `underlay`. Never fails: a short read at record N keeps records
    /// `0..N-1` and returns everything from N onward as `trailer`.
    pub fn dissect(underlay: Underlay, input: &[u8]) -> Ssl {
        let record_class = underlay.record_class();
        let schema = record_class.schema();
        let peek = schema
            .peek_len
            .unwrap_or_else(|| panic!("{} has no peek_len, cannot appear in an Ssl record list", schema.name));

        let mut records = Vec::new();
        let mut pos = 0usize;

        while pos < input.len() {
            let remaining = &input[pos..];
            let total = match peek(remaining) {
                Some(n) if n > 0 && n <= remaining.len() => n,
                _ => break,
            };
            debug!("Ssl: dissecting {} byte {} record at offset {}", total, schema.name, pos);
            records.push(Packet::dissect(record_class, &remaining[..total]));
            pos += total;
        }

        let trailer = if pos < input.len() {
            let rest = Bytes::copy_from_slice(&input[pos..]);
            warn!("Ssl: {} trailing byte(s) after {} record(s)", rest.len(), records.len());
            Some(rest)
        } else {
            None
        };

        Ssl { records, trailer }
    }

    /// Serializes every record back-to-back, in order. There is no trailer
    /// to re-emit here: a caller who dissected with a non-empty `trailer`
    /// and wants byte-exact output is expected to append it themselves,
    /// since it was by definition not attributable to any record.
    pub fn build(&self) -> crate::error::Result<Bytes> {
        let mut out = bytes::BytesMut::new();
        for record in &self.records {
            out.extend_from_slice(&record.build()?);
        }
        Ok(out.freeze())
    }
}
