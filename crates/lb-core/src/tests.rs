//! Unit tests for lb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{RequestId, WorkerId};

    #[test]
    fn next_increments() {
        assert_eq!(RequestId(41).next(), RequestId(42));
        assert_eq!(WorkerId(0).next(), WorkerId(1));
    }

    #[test]
    fn ordering() {
        assert!(RequestId(0) < RequestId(1));
        assert!(WorkerId(100) > WorkerId(99));
    }

    #[test]
    fn display() {
        assert_eq!(RequestId(7).to_string(), "RequestId(7)");
        assert_eq!(WorkerId(3).to_string(), "WorkerId(3)");
    }
}

#[cfg(test)]
mod request {
    use std::net::Ipv4Addr;

    use crate::{Address, LbError, Request, RequestId};

    fn addr(a: u8) -> Address {
        Address::from_octets([10, 0, 0, a])
    }

    #[test]
    fn new_keeps_fields() {
        let r = Request::new(RequestId(5), addr(1), addr(2), 17).unwrap();
        assert_eq!(r.id(), RequestId(5));
        assert_eq!(r.origin(), addr(1));
        assert_eq!(r.destination(), addr(2));
        assert_eq!(r.processing_cost(), 17);
    }

    #[test]
    fn zero_cost_rejected() {
        let err = Request::new(RequestId(0), addr(1), addr(2), 0).unwrap_err();
        assert!(matches!(err, LbError::ZeroCost));
    }

    #[test]
    fn address_display_is_dotted_quad() {
        assert_eq!(Address::from_octets([192, 168, 1, 1]).to_string(), "192.168.1.1");
        assert_eq!(Address::from(Ipv4Addr::LOCALHOST).octets(), [127, 0, 0, 1]);
    }

    #[test]
    fn request_display() {
        let r = Request::new(RequestId(2), addr(1), addr(9), 3).unwrap();
        assert_eq!(r.to_string(), "RequestId(2) 10.0.0.1 -> 10.0.0.9 (3 cycles)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick, coerce_pool_size};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(10) - Tick(4), 6);
        assert_eq!(Tick(3).offset(2), Tick(5));
        assert_eq!(Tick(9).since(Tick(2)), 7);
    }

    #[test]
    fn interval_boundaries() {
        assert!(Tick(0).is_on_interval(100));
        assert!(Tick(200).is_on_interval(100));
        assert!(!Tick(199).is_on_interval(100));
        assert!(!Tick(0).is_on_interval(0), "interval 0 disables");
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new();
        assert_eq!(clock.current_tick, Tick::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.ticks_elapsed(), 2);
        assert_eq!(clock.to_string(), "clock T2");
    }

    #[test]
    fn default_config_matches_reference_run() {
        let c = SimConfig::default();
        assert_eq!(c.initial_pool_size, 10);
        assert_eq!(c.total_ticks, 10_000);
        assert_eq!(c.snapshot_interval_ticks, 100);
        assert_eq!(c.scale_up_factor, 10);
        assert_eq!(c.end_tick(), Tick(10_000));
    }

    #[test]
    fn zero_pool_size_coerced() {
        let c = SimConfig { initial_pool_size: 0, ..SimConfig::default() };
        assert_eq!(c.pool_size(), 1);
    }

    #[test]
    fn signed_pool_size_coerced() {
        assert_eq!(coerce_pool_size(-5), 1);
        assert_eq!(coerce_pool_size(0), 1);
        assert_eq!(coerce_pool_size(1), 1);
        assert_eq!(coerce_pool_size(12), 12);
    }
}

#[cfg(test)]
mod rng {
    use crate::{RandomSource, SimRng};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        let xs: Vec<u32> = (0..32).map(|_| a.uniform_int(1, 100)).collect();
        let ys: Vec<u32> = (0..32).map(|_| b.uniform_int(1, 100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn uniform_int_stays_in_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..10_000 {
            let v = rng.uniform_int(1, 50);
            assert!((1..=50).contains(&v), "got {v}");
        }
    }

    #[test]
    fn degenerate_range_returns_low() {
        let mut rng = SimRng::new(1);
        assert_eq!(rng.uniform_int(5, 5), 5);
        assert_eq!(rng.uniform_int(9, 3), 9);
    }

    #[test]
    fn one_in_edge_cases() {
        let mut rng = SimRng::new(3);
        assert!(!rng.one_in(0));
        assert!((0..100).all(|_| rng.one_in(1)));
    }

    #[test]
    fn one_in_twenty_is_roughly_five_percent() {
        let mut rng = SimRng::new(99);
        let hits = (0..100_000).filter(|_| rng.one_in(20)).count();
        assert!((4_000..6_000).contains(&hits), "hits = {hits}");
    }

    /// Scripted source that always returns the upper bound.
    struct Max;
    impl RandomSource for Max {
        fn uniform_int(&mut self, _low: u32, high: u32) -> u32 {
            high
        }
    }

    #[test]
    fn default_one_in_uses_outcome_zero() {
        // Max never draws 0 unless the range is [0, 0].
        assert!(!Max.one_in(20));
        assert!(Max.one_in(1));
        assert_eq!(Max.octet(), 255);
    }

    fn draw<R: RandomSource>(mut source: R) -> u32 {
        source.uniform_int(0, 1_000)
    }

    #[test]
    fn mut_ref_forwards() {
        let mut inner = SimRng::new(5);
        let mut reference = SimRng::new(5);
        assert_eq!(draw(&mut inner), reference.uniform_int(0, 1_000));
    }
}
