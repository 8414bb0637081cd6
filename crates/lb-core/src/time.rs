//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter starting at 0.  A tick
//! is the engine's atomic step: every arrival, scale decision, dispatch, and
//! worker advance happens "at" exactly one tick.  There is no mapping to
//! wall-clock time; a tick is simply one clock cycle of the balancer.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// `true` if this tick falls on an `interval` boundary.  An interval of 0
    /// never matches.
    #[inline]
    pub fn is_on_interval(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The engine's master clock.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The tick currently being (or about to be) processed.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Number of ticks fully processed so far.
    #[inline]
    pub fn ticks_elapsed(&self) -> u64 {
        self.current_tick.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clock {}", self.current_tick)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Default initial pool size.
pub const DEFAULT_POOL_SIZE: usize = 10;
/// Default run length in ticks.
pub const DEFAULT_TOTAL_TICKS: u64 = 10_000;
/// Default snapshot cadence.
pub const DEFAULT_SNAPSHOT_INTERVAL: u64 = 100;
/// Default scale-up threshold: queued requests per worker.
pub const DEFAULT_SCALE_UP_FACTOR: usize = 10;
/// The pool never shrinks below this many workers.
pub const MIN_POOL_SIZE: usize = 1;

/// Top-level simulation configuration.
///
/// Typically built from CLI flags or a JSON file by the application crate and
/// passed to the engine builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Workers in the pool at tick 0.  Also sizes the initial burst.
    /// Zero is coerced to 1 by [`SimConfig::pool_size`].
    pub initial_pool_size: usize,

    /// Total ticks executed by `Engine::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit a status snapshot every N ticks (tick 0 included).  0 disables
    /// snapshots.
    pub snapshot_interval_ticks: u64,

    /// Add a worker when `queue_len > pool_len * scale_up_factor`.
    pub scale_up_factor: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_pool_size:       DEFAULT_POOL_SIZE,
            total_ticks:             DEFAULT_TOTAL_TICKS,
            seed:                    0,
            snapshot_interval_ticks: DEFAULT_SNAPSHOT_INTERVAL,
            scale_up_factor:         DEFAULT_SCALE_UP_FACTOR,
        }
    }
}

impl SimConfig {
    /// The initial pool size with non-positive values coerced to the minimum.
    #[inline]
    pub fn pool_size(&self) -> usize {
        self.initial_pool_size.max(MIN_POOL_SIZE)
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}

/// Coerce a signed pool size from an external source into a valid one.
///
/// Anything `<= 0` becomes [`MIN_POOL_SIZE`].
pub fn coerce_pool_size(requested: i64) -> usize {
    if requested < MIN_POOL_SIZE as i64 {
        MIN_POOL_SIZE
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}
