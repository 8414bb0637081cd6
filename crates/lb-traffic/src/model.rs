//! Tunable constants of the arrival process.

use std::num::NonZeroU32;

use lb_core::{LbError, LbResult, RandomSource};

// ── CostRange ─────────────────────────────────────────────────────────────────

/// Inclusive range of processing costs, in ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostRange {
    pub low:  u32,
    pub high: u32,
}

impl CostRange {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// # Errors
    /// [`LbError::InvalidCostRange`] unless `1 <= low <= high`.
    pub fn validate(&self) -> LbResult<()> {
        if self.low == 0 || self.low > self.high {
            return Err(LbError::InvalidCostRange { low: self.low, high: self.high });
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, cost: u32) -> bool {
        (self.low..=self.high).contains(&cost)
    }

    /// Draw a cost uniformly from the range.
    ///
    /// The lower bound is floored at 1 so an unvalidated range still cannot
    /// produce a zero-cost request.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> NonZeroU32 {
        let drawn = rng.uniform_int(self.low.max(1), self.high);
        NonZeroU32::new(drawn).unwrap_or(NonZeroU32::MIN)
    }
}

// ── ArrivalModel ──────────────────────────────────────────────────────────────

/// Requests seeded per initial worker.
pub const DEFAULT_BURST_PER_WORKER: usize = 100;
/// Cost range of burst requests.
pub const DEFAULT_BURST_COST: CostRange = CostRange::new(1, 50);
/// A per-tick arrival happens on one outcome out of this many.
pub const DEFAULT_ARRIVAL_ONE_IN: u32 = 20;
/// Cost range of per-tick arrivals.
pub const DEFAULT_ARRIVAL_COST: CostRange = CostRange::new(1, 100);

/// Parameters of the two arrival paths.
///
/// `Default` reproduces the reference workload: 100 burst requests per
/// worker costing 1–50 ticks, plus a 1-in-20 chance per tick of one request
/// costing 1–100 ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrivalModel {
    pub burst_per_worker: usize,
    pub burst_cost:       CostRange,
    pub arrival_one_in:   u32,
    pub arrival_cost:     CostRange,
}

impl Default for ArrivalModel {
    fn default() -> Self {
        Self {
            burst_per_worker: DEFAULT_BURST_PER_WORKER,
            burst_cost:       DEFAULT_BURST_COST,
            arrival_one_in:   DEFAULT_ARRIVAL_ONE_IN,
            arrival_cost:     DEFAULT_ARRIVAL_COST,
        }
    }
}

impl ArrivalModel {
    /// A model with no initial burst and no random arrivals.  Requests only
    /// enter the queue when injected by the caller.
    pub fn quiet() -> Self {
        Self {
            burst_per_worker: 0,
            arrival_one_in:   0,
            ..Self::default()
        }
    }

    /// Check both cost ranges.  `arrival_one_in == 0` is valid and means
    /// random arrivals never happen.
    pub fn validate(&self) -> LbResult<()> {
        self.burst_cost.validate()?;
        self.arrival_cost.validate()?;
        Ok(())
    }

    /// Number of requests in the initial burst for `pool_size` workers.
    #[inline]
    pub fn burst_size(&self, pool_size: usize) -> usize {
        pool_size.saturating_mul(self.burst_per_worker)
    }
}
