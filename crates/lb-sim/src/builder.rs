//! Fluent builder for constructing an [`Engine`].

use lb_core::{RandomSource, Request, SimConfig, SimRng};
use lb_pool::{RequestQueue, WorkerPool};
use lb_traffic::{ArrivalModel, RequestGenerator};
use tracing::info;

use crate::{Engine, SimError, SimResult};

/// Fluent builder for [`Engine<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — pool size, total ticks, thresholds, …
/// - `R: RandomSource` — the randomness every draw goes through
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                  |
/// |--------------------------|------------------------------------------|
/// | `.traffic(m)`            | `ArrivalModel::default()`                |
/// | `.initial_requests(v)`   | a generated burst of `pool * 100`        |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config, SimRng::new(seed))
///     .traffic(ArrivalModel::default())
///     .build()?;
/// let report = engine.run(&mut NoopObserver);
/// ```
pub struct EngineBuilder<R: RandomSource> {
    config:           SimConfig,
    rng:              R,
    traffic:          Option<ArrivalModel>,
    initial_requests: Option<Vec<Request>>,
}

impl EngineBuilder<SimRng> {
    /// Builder using a `SimRng` seeded from `config.seed`.
    pub fn seeded(config: SimConfig) -> Self {
        let rng = SimRng::new(config.seed);
        Self::new(config, rng)
    }
}

impl<R: RandomSource> EngineBuilder<R> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            traffic:          None,
            initial_requests: None,
        }
    }

    /// Supply the arrival model for the burst and per-tick arrivals.
    pub fn traffic(mut self, model: ArrivalModel) -> Self {
        self.traffic = Some(model);
        self
    }

    /// Seed the queue with exactly these requests instead of a generated
    /// burst.  An empty vector starts the engine with an empty queue.
    ///
    /// Requests are enqueued in the given order; generated IDs continue
    /// after the largest ID supplied.
    pub fn initial_requests(mut self, requests: Vec<Request>) -> Self {
        self.initial_requests = Some(requests);
        self
    }

    /// Validate inputs, create the pool, fill the queue, and return a
    /// ready-to-run [`Engine`].
    ///
    /// The pool size is coerced to at least 1 rather than rejected.
    pub fn build(self) -> SimResult<Engine<R>> {
        if self.config.scale_up_factor == 0 {
            return Err(SimError::Config(
                "scale_up_factor must be at least 1".to_owned(),
            ));
        }

        let mut generator = RequestGenerator::new(self.traffic.unwrap_or_default())?;
        let mut rng = self.rng;
        let pool = WorkerPool::new(self.config.pool_size());

        // ── Initial queue: supplied requests or a generated burst ─────────
        let initial = match self.initial_requests {
            Some(requests) => {
                for r in &requests {
                    generator.advance_past(r.id());
                }
                requests
            }
            None => generator.burst(pool.len(), &mut rng),
        };
        let queue: RequestQueue = initial.into_iter().collect();

        info!(
            pool_size = pool.len(),
            starting_queue_length = queue.len(),
            seed = self.config.seed,
            "engine built"
        );

        Ok(Engine::from_parts(self.config, queue, pool, generator, rng))
    }
}
