//! Requests and their endpoint addresses.

use std::fmt;
use std::net::Ipv4Addr;
use std::num::NonZeroU32;

use crate::{LbError, LbResult, RequestId};

// ── Address ───────────────────────────────────────────────────────────────────

/// A 4-octet endpoint address.
///
/// Only used as a label for reporting; no routing is ever performed on it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(pub Ipv4Addr);

impl Address {
    pub const UNSPECIFIED: Address = Address(Ipv4Addr::UNSPECIFIED);

    #[inline]
    pub const fn from_octets(octets: [u8; 4]) -> Self {
        Address(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
    }

    #[inline]
    pub fn octets(self) -> [u8; 4] {
        self.0.octets()
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address(ip)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// One unit of work: where it came from, where the result goes, and how many
/// ticks a worker needs to finish it.
///
/// Requests are immutable once built.  The processing cost is a `NonZeroU32`
/// so that a zero-cost request cannot be represented at all; see
/// [`Request::new`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    id:              RequestId,
    origin:          Address,
    destination:     Address,
    processing_cost: NonZeroU32,
}

impl Request {
    /// Build a request from a raw cycle count.
    ///
    /// # Errors
    /// [`LbError::ZeroCost`] if `processing_cost == 0`.
    pub fn new(
        id:              RequestId,
        origin:          Address,
        destination:     Address,
        processing_cost: u32,
    ) -> LbResult<Self> {
        let cost = NonZeroU32::new(processing_cost).ok_or(LbError::ZeroCost)?;
        Ok(Self::with_cost(id, origin, destination, cost))
    }

    /// Infallible constructor for callers that already hold a non-zero cost.
    pub fn with_cost(
        id:              RequestId,
        origin:          Address,
        destination:     Address,
        processing_cost: NonZeroU32,
    ) -> Self {
        Self { id, origin, destination, processing_cost }
    }

    #[inline]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[inline]
    pub fn origin(&self) -> Address {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> Address {
        self.destination
    }

    /// Ticks of worker time this request consumes.  Always `>= 1`.
    #[inline]
    pub fn processing_cost(&self) -> u32 {
        self.processing_cost.get()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} ({} cycles)",
            self.id, self.origin, self.destination, self.processing_cost
        )
    }
}
