//! Integration tests for lb-sim.

use std::collections::HashSet;

use lb_core::{Address, Request, RequestId, SimConfig, SimRng, Tick, WorkerId};
use lb_traffic::ArrivalModel;

use crate::{Engine, EngineBuilder, EventLog, NoopObserver, SimEvent, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(pool: usize, total_ticks: u64) -> SimConfig {
    SimConfig {
        initial_pool_size:       pool,
        total_ticks,
        seed:                    42,
        snapshot_interval_ticks: 100,
        scale_up_factor:         10,
    }
}

fn req(id: u64, cost: u32) -> Request {
    Request::new(
        RequestId(id),
        Address::from_octets([192, 168, 0, (id % 256) as u8]),
        Address::from_octets([10, 0, 0, 1]),
        cost,
    )
    .unwrap()
}

/// Engine with no random arrivals and exactly `costs.len()` queued requests.
fn quiet_engine(pool: usize, costs: &[u32]) -> Engine {
    let requests = costs.iter().enumerate().map(|(i, &c)| req(i as u64, c)).collect();
    EngineBuilder::new(test_config(pool, 1_000), SimRng::new(42))
        .traffic(ArrivalModel::quiet())
        .initial_requests(requests)
        .build()
        .unwrap()
}

/// Check the per-worker invariant and the pool floor.
fn assert_invariants(engine: &Engine) {
    assert!(engine.pool().len() >= 1, "pool must never be empty");
    for w in engine.pool() {
        assert_eq!(w.is_busy(), w.remaining_cycles() > 0, "busy ⟺ remaining > 0");
        assert_eq!(w.is_busy(), w.current_request().is_some(), "busy ⟺ request set");
    }
}

// ── EngineBuilder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn default_build_generates_burst() {
        let engine = EngineBuilder::seeded(test_config(3, 10)).build().unwrap();
        assert_eq!(engine.pool().len(), 3);
        assert_eq!(engine.queue().len(), 300);
        assert!(engine.queue().iter().all(|r| (1..=50).contains(&r.processing_cost())));
    }

    #[test]
    fn zero_pool_size_coerced_to_one() {
        let engine = EngineBuilder::seeded(test_config(0, 10)).build().unwrap();
        assert_eq!(engine.pool().len(), 1);
        assert_eq!(engine.queue().len(), 100);
    }

    #[test]
    fn zero_scale_factor_rejected() {
        let config = SimConfig { scale_up_factor: 0, ..test_config(1, 10) };
        let result = EngineBuilder::seeded(config).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_traffic_rejected() {
        let model = ArrivalModel {
            arrival_cost: lb_traffic::CostRange::new(0, 100),
            ..ArrivalModel::default()
        };
        let result = EngineBuilder::seeded(test_config(1, 10)).traffic(model).build();
        assert!(matches!(result, Err(SimError::Traffic(_))));
    }

    #[test]
    fn initial_requests_replace_burst() {
        let engine = quiet_engine(2, &[3, 4, 5]);
        assert_eq!(engine.queue().len(), 3);
        let start = engine.start_report();
        assert_eq!(start.pool_size, 2);
        assert_eq!(start.starting_queue_length, 3);
    }

    #[test]
    fn empty_initial_requests_start_empty() {
        let engine = quiet_engine(1, &[]);
        assert!(engine.queue().is_empty());
        assert_eq!(engine.now(), Tick::ZERO);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn zero_ticks_reports_untouched_burst() {
        let mut engine = EngineBuilder::seeded(test_config(1, 0)).build().unwrap();
        let report = engine.run(&mut NoopObserver);
        assert_eq!(report.ending_queue_length, 100);
        assert_eq!(report.pool_size, 1);
        assert_eq!(report.active_count, 0);
        assert_eq!(report.idle_count, 1);
        assert_eq!(report.rejected_count, 0);
        assert_eq!(report.ticks_run, 0);
        assert_eq!(engine.now(), Tick::ZERO);
    }

    #[test]
    fn cost_one_request_completes_in_assignment_tick() {
        let mut engine = quiet_engine(1, &[]);
        engine.inject(Address::from_octets([1, 2, 3, 4]), Address::UNSPECIFIED, 1).unwrap();

        let mut log = EventLog::new();
        engine.run_ticks(1, &mut log);

        let completions: Vec<_> = log.completions().collect();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].tick, Tick(0));
        assert_eq!(completions[0].origin, Address::from_octets([1, 2, 3, 4]));

        let report = engine.final_report();
        assert_eq!(report.ending_queue_length, 0);
        assert_eq!(report.active_count, 0);
        assert_eq!(report.idle_count, 1);
    }

    #[test]
    fn queue_of_21_with_pool_2_scales_to_3() {
        let mut engine = quiet_engine(2, &[5; 21]);
        let mut log = EventLog::new();
        engine.tick(&mut log);

        assert_eq!(engine.pool().len(), 3);
        let ups: Vec<_> = log.scale_ups().collect();
        assert_eq!(ups.len(), 1);
        assert_eq!(ups[0].tick, Tick(0));
        assert_eq!(ups[0].new_pool_size, 3);
        assert_eq!(ups[0].worker_index, 2);
    }

    #[test]
    fn queue_of_20_with_pool_2_does_not_scale() {
        let mut engine = quiet_engine(2, &[5; 20]);
        let mut log = EventLog::new();
        engine.tick(&mut log);
        assert_eq!(engine.pool().len(), 2, "threshold is strictly greater-than");
        assert_eq!(log.scale_ups().count(), 0);
    }

    #[test]
    fn all_busy_pool_does_not_scale_down() {
        let mut engine = quiet_engine(3, &[5, 5, 5]);
        let mut log = EventLog::new();
        engine.tick(&mut log); // dispatches all three; queue now empty
        assert!(engine.queue().is_empty());
        assert_eq!(engine.pool().busy_count(), 3);

        engine.tick(&mut log);
        assert_eq!(engine.pool().len(), 3);
        assert_eq!(log.scale_downs().count(), 0);
    }

    #[test]
    fn scale_down_removes_lowest_idle_one_per_tick() {
        let mut engine = quiet_engine(3, &[5]);
        let mut log = EventLog::new();
        engine.tick(&mut log); // worker 0 takes the only request

        engine.tick(&mut log);
        let ids: Vec<_> = engine.pool().iter().map(|w| w.id()).collect();
        assert_eq!(ids, [WorkerId(0), WorkerId(2)]);

        engine.tick(&mut log);
        let ids: Vec<_> = engine.pool().iter().map(|w| w.id()).collect();
        assert_eq!(ids, [WorkerId(0)]);

        engine.tick(&mut log);
        assert_eq!(engine.pool().len(), 1);

        let downs: Vec<_> = log.scale_downs().collect();
        assert_eq!(downs.len(), 2);
        assert_eq!((downs[0].tick, downs[0].worker_index, downs[0].worker), (Tick(1), 1, WorkerId(1)));
        assert_eq!((downs[1].tick, downs[1].worker_index, downs[1].worker), (Tick(2), 1, WorkerId(2)));
        assert_eq!(downs[1].new_pool_size, 1);
    }

    #[test]
    fn busy_sole_worker_is_never_removed() {
        let mut engine = quiet_engine(1, &[3]);
        let mut log = EventLog::new();
        engine.run_ticks(10, &mut log);
        assert_eq!(engine.pool().len(), 1);
        assert_eq!(log.scale_downs().count(), 0);
    }

    #[test]
    fn request_of_cost_c_completes_at_t_plus_c_minus_1() {
        let mut engine = quiet_engine(1, &[4]);
        let mut log = EventLog::new();
        engine.run_ticks(6, &mut log);

        let dispatch = log.dispatches().next().unwrap();
        let done = log.completions().next().unwrap();
        assert_eq!(dispatch.tick, Tick(0));
        assert_eq!(dispatch.processing_cost, 4);
        assert_eq!(done.tick, Tick(3));
        assert_eq!(done.request, dispatch.request);
    }

    #[test]
    fn dispatch_fills_idle_workers_in_index_order() {
        let mut engine = quiet_engine(3, &[2, 2, 2, 2, 2]);
        let mut log = EventLog::new();
        engine.tick(&mut log);

        let d: Vec<_> = log.dispatches().map(|d| (d.worker_index, d.request)).collect();
        assert_eq!(d, [(0, RequestId(0)), (1, RequestId(1)), (2, RequestId(2))]);
        assert_eq!(engine.queue().len(), 2);
    }

    #[test]
    fn events_within_tick_follow_step_order() {
        // 31 requests > 3 * 10, so tick 0 scales up before dispatching.
        let mut engine = quiet_engine(3, &[1; 31]);
        let mut log = EventLog::new();
        engine.tick(&mut log);

        let kinds: Vec<&str> = log
            .events
            .iter()
            .map(|e| match e {
                SimEvent::ScaleUp(_) => "up",
                SimEvent::Dispatch(_) => "dispatch",
                SimEvent::Completion(_) => "done",
                SimEvent::Snapshot(_) => "snap",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            ["up", "dispatch", "dispatch", "dispatch", "dispatch", "done", "done", "done", "done", "snap"]
        );
    }

    #[test]
    fn scale_up_adds_at_most_one_worker_per_tick() {
        let mut engine = quiet_engine(1, &[50; 1_000]);
        for expected in 2..=6 {
            engine.tick(&mut NoopObserver);
            assert_eq!(engine.pool().len(), expected);
        }
    }

    #[test]
    fn injected_zero_cost_is_rejected() {
        let mut engine = quiet_engine(1, &[]);
        let result = engine.inject(Address::UNSPECIFIED, Address::UNSPECIFIED, 0);
        assert!(result.is_err());
        assert!(engine.queue().is_empty());
    }

    #[test]
    fn enqueue_keeps_generated_ids_increasing() {
        let mut engine = quiet_engine(1, &[]);
        engine.enqueue(req(40, 2));
        let id = engine.inject(Address::UNSPECIFIED, Address::UNSPECIFIED, 2).unwrap();
        assert_eq!(id, RequestId(41));
    }
}

// ── Properties over long random runs ──────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn invariants_hold_every_tick() {
        let mut engine = EngineBuilder::seeded(test_config(2, 3_000)).build().unwrap();
        assert_invariants(&engine);

        for _ in 0..3_000 {
            let before_len = engine.pool().len();
            let idle_before: HashSet<WorkerId> =
                engine.pool().iter().filter(|w| w.is_idle()).map(|w| w.id()).collect();
            let ids_before: Vec<WorkerId> = engine.pool().iter().map(|w| w.id()).collect();

            let mut log = EventLog::new();
            engine.tick(&mut log);
            assert_invariants(&engine);

            let after_len = engine.pool().len();
            assert!(after_len.abs_diff(before_len) <= 1, "pool changed by more than one");
            assert!(log.scale_ups().count() <= 1);
            assert!(log.scale_downs().count() <= 1);

            let ids_after: HashSet<WorkerId> = engine.pool().iter().map(|w| w.id()).collect();
            for id in ids_before.iter().filter(|id| !ids_after.contains(*id)) {
                assert!(idle_before.contains(id), "removed {id} was busy");
            }
        }
        assert_eq!(engine.final_report().rejected_count, 0);
    }

    #[test]
    fn dispatch_order_is_fifo() {
        let mut engine = EngineBuilder::seeded(test_config(4, 5_000)).build().unwrap();
        let mut log = EventLog::new();
        let report = engine.run(&mut log);

        let ids: Vec<RequestId> = log.dispatches().map(|d| d.request).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "dispatch IDs must strictly increase");
        assert_eq!(ids.len() as u64, report.total_dispatched);
    }

    #[test]
    fn conservation_of_requests() {
        let mut engine = EngineBuilder::seeded(test_config(3, 4_000)).build().unwrap();
        let report = engine.run(&mut NoopObserver);

        let enqueued = report.starting_queue_length as u64 + report.total_arrivals;
        assert_eq!(enqueued, report.total_dispatched + report.ending_queue_length as u64);
        assert_eq!(report.total_dispatched, report.total_completed + report.active_count as u64);
        assert_eq!(report.active_count + report.idle_count, report.pool_size);
        assert!(report.peak_pool_size >= report.pool_size);
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed: u64| {
            let config = SimConfig { seed, ..test_config(2, 2_000) };
            let mut engine = EngineBuilder::seeded(config).build().unwrap();
            let mut log = EventLog::new();
            engine.run(&mut log);
            log.events
        };
        assert_eq!(run(9), run(9));
    }
}

// ── Run loop and observers ────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{FinalReport, StartReport};

    #[test]
    fn run_stops_at_end_tick() {
        let mut engine = EngineBuilder::seeded(test_config(1, 25)).build().unwrap();
        let report = engine.run(&mut NoopObserver);
        assert_eq!(engine.now(), Tick(25));
        assert_eq!(report.ticks_run, 25);
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut engine = quiet_engine(1, &[]);
        engine.run_ticks(5, &mut NoopObserver);
        assert_eq!(engine.now(), Tick(5));
        engine.run_ticks(3, &mut NoopObserver);
        assert_eq!(engine.now(), Tick(8));
    }

    #[test]
    fn snapshots_on_interval_including_tick_zero() {
        let mut engine = EngineBuilder::seeded(test_config(1, 250)).build().unwrap();
        let mut log = EventLog::new();
        engine.run(&mut log);
        let ticks: Vec<Tick> = log.snapshots().map(|s| s.tick).collect();
        assert_eq!(ticks, [Tick(0), Tick(100), Tick(200)]);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = SimConfig { snapshot_interval_ticks: 0, ..test_config(1, 250) };
        let mut engine = EngineBuilder::seeded(config).build().unwrap();
        let mut log = EventLog::new();
        engine.run(&mut log);
        assert_eq!(log.snapshots().count(), 0);
    }

    #[test]
    fn start_and_end_hooks_bracket_the_run() {
        let mut engine = EngineBuilder::seeded(test_config(2, 10)).build().unwrap();
        let mut log = EventLog::new();
        let report = engine.run(&mut log);

        assert!(matches!(
            log.events.first(),
            Some(SimEvent::Start(StartReport { pool_size: 2, starting_queue_length: 200 }))
        ));
        assert_eq!(log.events.last(), Some(&SimEvent::End(report)));
    }

    /// Observer that counts tick boundaries.
    #[derive(Default)]
    struct TickCounter {
        starts: usize,
        ends:   usize,
        last:   Option<FinalReport>,
    }
    impl SimObserver for TickCounter {
        fn on_tick_start(&mut self, _t: Tick) { self.starts += 1; }
        fn on_tick_end(&mut self, _t: Tick) { self.ends += 1; }
        fn on_sim_end(&mut self, r: &FinalReport) { self.last = Some(*r); }
    }

    #[test]
    fn observer_called_once_per_tick() {
        let mut engine = EngineBuilder::seeded(test_config(1, 7)).build().unwrap();
        let mut counter = TickCounter::default();
        engine.run(&mut counter);
        assert_eq!(counter.starts, 7);
        assert_eq!(counter.ends, 7);
        assert!(counter.last.is_some());
    }

    #[test]
    fn tuple_observer_fans_out() {
        let mut engine = EngineBuilder::seeded(test_config(1, 120)).build().unwrap();
        let mut pair = (EventLog::new(), TickCounter::default());
        engine.run(&mut pair);
        assert_eq!(pair.1.starts, 120);
        assert_eq!(pair.0.snapshots().count(), 2);
    }

    #[test]
    fn arrivals_are_reported_and_counted() {
        let mut engine = EngineBuilder::seeded(test_config(1, 2_000)).build().unwrap();
        let mut log = EventLog::new();
        let report = engine.run(&mut log);
        let arrivals = log.events.iter().filter(|e| matches!(e, SimEvent::Arrival { .. })).count();
        assert_eq!(arrivals as u64, report.total_arrivals);
        assert!(arrivals > 0, "2 000 ticks at 1-in-20 should see arrivals");
    }

    #[test]
    fn final_report_display_lists_counts() {
        let mut engine = quiet_engine(2, &[1, 1, 1]);
        let report = engine.run(&mut NoopObserver);
        let text = report.to_string();
        assert!(text.contains("starting queue size:    3"));
        assert!(text.contains("ending queue size:      0"));
        assert!(text.contains("3 completed"));
        assert!(text.ends_with("rejected:               0"));
    }
}
