//! Injectable clock and entropy source.
//!
//! `TLSClientHello`/`TLSServerHello` default `gmt_unix_time` to "now" and
//! `random_bytes` to fresh entropy, but both are resolved exactly once at
//! packet construction so builds stay deterministic when a test supplies its
//! own `Clock`/`EntropySource`.

use rand::RngCore;

/// Source of the current time, injected so hello messages can be built
/// deterministically in tests.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch, truncated to 32 bits the way
    /// `gmt_unix_time` is encoded on the wire.
    fn unix_time(&self) -> u32;
}

/// Source of randomness, injected so `random_bytes` can be deterministic in
/// tests.
pub trait EntropySource: Send + Sync {
    fn fill(&self, buf: &mut [u8]);
}

/// Reads the OS wall clock via `chrono`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_time(&self) -> u32 {
        chrono::Utc::now().timestamp() as u32
    }
}

/// Fills buffers from the thread-local CSPRNG via `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) {
        rand::thread_rng().fill_bytes(buf);
    }
}

/// Deterministic `Clock`/`EntropySource` fakes. Kept as a plain public
/// module, not `#[cfg(test)]`-gated, so this crate's own `tests/` binaries
/// (compiled against the library without `cfg(test)`) and downstream
/// integration tests can build fully reproducible hello messages too.
pub mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// A clock that always returns the same fixed timestamp.
    pub struct FixedClock(pub u32);

    impl Clock for FixedClock {
        fn unix_time(&self) -> u32 {
            self.0
        }
    }

    /// An entropy source that fills buffers with a repeating byte, so
    /// round-trip tests get stable, inspectable `random_bytes`.
    pub struct FixedEntropy(pub u8);

    impl EntropySource for FixedEntropy {
        fn fill(&self, buf: &mut [u8]) {
            buf.fill(self.0);
        }
    }

    /// Counts how many times `unix_time` was called, to assert hello
    /// construction resolves the clock exactly once.
    #[derive(Default)]
    pub struct CountingClock(pub AtomicU32);

    impl Clock for CountingClock {
        fn unix_time(&self) -> u32 {
            self.0.fetch_add(1, Ordering::SeqCst);
            1_700_000_000
        }
    }
}
