//! Time-ordered id generation.
//!
//! ```text
//!  63                    20 19            0
//! ┌────────────────────────┬──────────────┐
//! │ ms since 2022-01-01    │ sequence     │
//! └────────────────────────┴──────────────┘
//! ```
//!
//! Ids are strictly increasing per generator. Within one millisecond the
//! sequence counts up; if it overflows, or the clock stalls or steps back,
//! the generator keeps counting from the last id it issued instead of
//! repeating one.

use std::{
    sync::{Mutex, PoisonError},
    time::{SystemTime, UNIX_EPOCH},
};

/// 2022-01-01T00:00:00Z in milliseconds since the Unix epoch
pub const EPOCH_MILLIS: u64 = 1_640_995_200_000;

/// Bits reserved for the per-millisecond sequence
pub const SEQUENCE_BITS: u32 = 20;

const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Operating system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::disallowed_methods)]
    fn now_millis(&self) -> u64 {
        // A clock set before 1970 reads as the epoch; ids stay monotonic
        // regardless.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

/// Mints storage ids.
pub trait IdGenerator: Send + Sync {
    /// Next id. Never returns the same value twice.
    fn next_id(&self) -> u64;
}

/// Snowflake-style [`IdGenerator`].
#[derive(Debug)]
pub struct Snowflake<C = SystemClock> {
    clock: C,
    last_id: Mutex<Option<u64>>,
}

impl Snowflake<SystemClock> {
    /// Generator driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Snowflake<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Snowflake<C> {
    /// Generator driven by `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock, last_id: Mutex::new(None) }
    }
}

impl<C: Clock> IdGenerator for Snowflake<C> {
    fn next_id(&self) -> u64 {
        let elapsed = self.clock.now_millis().saturating_sub(EPOCH_MILLIS);
        let candidate = elapsed << SEQUENCE_BITS;

        // The guarded value is a plain integer, always consistent
        let mut last_id = self.last_id.lock().unwrap_or_else(PoisonError::into_inner);
        let id = match *last_id {
            Some(previous) if candidate <= previous => previous + 1,
            _ => candidate,
        };
        *last_id = Some(id);

        id
    }
}

/// Milliseconds since [`EPOCH_MILLIS`] encoded in `id`.
pub fn timestamp_of(id: u64) -> u64 {
    id >> SEQUENCE_BITS
}

/// Sequence number encoded in `id`.
pub fn sequence_of(id: u64) -> u64 {
    id & SEQUENCE_MASK
}
