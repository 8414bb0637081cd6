//! `RequestGenerator` — turns random draws into requests.

use lb_core::{Address, LbResult, RandomSource, Request, RequestId};

use crate::{ArrivalModel, CostRange};

/// A random 4-octet address, one uniform draw per octet.
pub fn random_address<R: RandomSource + ?Sized>(rng: &mut R) -> Address {
    Address::from_octets([rng.octet(), rng.octet(), rng.octet(), rng.octet()])
}

/// Produces requests for both arrival paths and hands out request IDs.
///
/// IDs are assigned in generation order starting at 0, including IDs handed
/// out via [`allocate_id`][Self::allocate_id] for injected requests, so the
/// ID sequence doubles as the enqueue sequence.
#[derive(Clone, Debug)]
pub struct RequestGenerator {
    model:   ArrivalModel,
    next_id: RequestId,
}

impl RequestGenerator {
    /// # Errors
    /// Propagates [`ArrivalModel::validate`] failures.
    pub fn new(model: ArrivalModel) -> LbResult<Self> {
        model.validate()?;
        Ok(Self { model, next_id: RequestId(0) })
    }

    pub fn model(&self) -> &ArrivalModel {
        &self.model
    }

    /// The ID the next generated request will receive.
    pub fn peek_id(&self) -> RequestId {
        self.next_id
    }

    /// Reserve the next ID for a request built outside the generator.
    pub fn allocate_id(&mut self) -> RequestId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Make sure future IDs sort after `id`.
    ///
    /// Called when a request built elsewhere enters the queue so that
    /// generated IDs keep increasing in enqueue order.
    pub fn advance_past(&mut self, id: RequestId) {
        if id >= self.next_id {
            self.next_id = id.next();
        }
    }

    /// Generate the initial burst for a pool of `pool_size` workers.
    pub fn burst<R: RandomSource + ?Sized>(&mut self, pool_size: usize, rng: &mut R) -> Vec<Request> {
        let count = self.model.burst_size(pool_size);
        let cost = self.model.burst_cost;
        (0..count).map(|_| self.generate(cost, rng)).collect()
    }

    /// Roll for this tick's random arrival.
    ///
    /// Returns at most one request.  The request's own draws only happen
    /// when the roll succeeds.
    pub fn maybe_arrival<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Request> {
        if !rng.one_in(self.model.arrival_one_in) {
            return None;
        }
        let cost = self.model.arrival_cost;
        Some(self.generate(cost, rng))
    }

    /// Draw origin, destination, then cost, in that order.
    fn generate<R: RandomSource + ?Sized>(&mut self, cost: CostRange, rng: &mut R) -> Request {
        let origin = random_address(rng);
        let destination = random_address(rng);
        let processing_cost = cost.sample(rng);
        Request::with_cost(self.allocate_id(), origin, destination, processing_cost)
    }
}
