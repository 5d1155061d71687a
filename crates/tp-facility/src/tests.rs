//! Unit tests for tp-facility.

use tp_core::{GridPos, SimRng, Tick, VisitorId};

use crate::{
    DEFAULT_EMOJI, Facility, FacilityError, FacilityFactory, FacilityKind, FacilityRecord,
    FacilityStatus, default_facilities, random_free_position,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn coaster(capacity: u32, run_time: u64) -> Facility {
    Facility::new("Coaster", "roller_coaster", capacity, run_time, GridPos::ORIGIN).unwrap()
}

fn queue(f: &mut Facility, ids: impl IntoIterator<Item = u32>) {
    for i in ids {
        f.add_visitor(VisitorId(i));
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn new_facility_is_idle_and_empty() {
        let f = Facility::new("Coaster", "roller_coaster", 20, 120, GridPos::new(1, 2)).unwrap();
        assert_eq!(f.name(), "Coaster");
        assert_eq!(f.capacity(), 20);
        assert_eq!(f.run_time(), 120);
        assert_eq!(f.pos(), GridPos::new(1, 2));
        assert_eq!(f.status(), FacilityStatus::Idle);
        assert_eq!(f.queue_len(), 0);
        assert!(f.current_batch().is_empty());
        assert_eq!(f.emoji(), "🎢");
        assert_eq!(f.kind(), Some(FacilityKind::RollerCoaster));
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(
            Facility::new("X", "carousel", 0, 10, GridPos::ORIGIN).unwrap_err(),
            FacilityError::InvalidCapacity { name: "X".into(), capacity: 0 }
        );
        assert_eq!(
            Facility::new("X", "carousel", 4, 0, GridPos::ORIGIN).unwrap_err(),
            FacilityError::InvalidRunTime { name: "X".into() }
        );
        assert_eq!(
            Facility::new("  ", "carousel", 4, 10, GridPos::ORIGIN).unwrap_err(),
            FacilityError::EmptyName
        );
    }

    #[test]
    fn unknown_type_gets_default_emoji() {
        let f = Facility::new("Haunted House", "dark_ride", 6, 45, GridPos::ORIGIN).unwrap();
        assert_eq!(f.emoji(), DEFAULT_EMOJI);
        assert_eq!(f.kind(), None);
    }
}

// ── Service cycle ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod service_cycle {
    use super::*;

    #[test]
    fn start_run_admits_up_to_capacity() {
        let mut f = coaster(2, 10);
        queue(&mut f, [1, 2, 3]);
        assert_eq!(f.queue_len(), 3);

        assert!(f.start_run(Tick(0)));
        assert_eq!(f.current_batch(), &[VisitorId(1), VisitorId(2)]);
        assert_eq!(f.queue_len(), 1);
        assert_eq!(f.status(), FacilityStatus::Running);
        assert_eq!(f.run_start_time(), Some(Tick(0)));
    }

    #[test]
    fn finish_counts_batch_and_releases_it() {
        let mut f = coaster(2, 10);
        queue(&mut f, [1, 2, 3]);
        f.update(Tick(0));
        f.start_run(Tick(0));

        assert!(f.update(Tick(9)).is_empty(), "cycle not over yet");
        let released = f.update(Tick(10));
        assert_eq!(released, vec![VisitorId(1), VisitorId(2)]);
        assert_eq!(f.total_visitors_served(), 2);
        assert!(f.current_batch().is_empty());
        assert_eq!(f.status(), FacilityStatus::Idle);
        assert_eq!(f.run_start_time(), None);
        assert_eq!(f.queue_len(), 1);
    }

    #[test]
    fn start_run_on_empty_queue_fails() {
        let mut f = coaster(4, 10);
        assert!(!f.start_run(Tick(5)));
        assert_eq!(f.status(), FacilityStatus::Idle);
        assert_eq!(f.run_start_time(), None);
    }

    #[test]
    fn start_run_while_running_fails() {
        let mut f = coaster(1, 10);
        queue(&mut f, [1, 2]);
        assert!(f.start_run(Tick(0)));
        assert!(!f.start_run(Tick(1)));
        assert_eq!(f.current_batch(), &[VisitorId(1)]);
        assert_eq!(f.queue_len(), 1);
    }

    #[test]
    fn add_visitor_while_running_does_not_start_cycle() {
        let mut f = coaster(4, 10);
        queue(&mut f, [1]);
        f.start_run(Tick(0));
        queue(&mut f, [2]);
        assert_eq!(f.current_batch(), &[VisitorId(1)]);
        assert_eq!(f.queue_len(), 1);
    }

    #[test]
    fn accumulators_use_elapsed_time_not_call_count() {
        let mut f = coaster(4, 100);
        f.update(Tick(0));
        f.update(Tick(30)); // idle 30
        queue(&mut f, [1]);
        f.start_run(Tick(30));
        f.update(Tick(50)); // running 20
        f.update(Tick(90)); // running 40
        assert_eq!(f.total_idle_time(), 30);
        assert_eq!(f.total_run_time(), 60);
    }

    #[test]
    fn first_update_adds_no_time() {
        let mut f = coaster(4, 100);
        f.update(Tick(500));
        assert_eq!(f.total_idle_time(), 0);
        assert_eq!(f.total_run_time(), 0);
    }

    #[test]
    fn evict_all_returns_batch_then_queue() {
        let mut f = coaster(2, 10);
        queue(&mut f, [1, 2, 3, 4]);
        f.start_run(Tick(0));
        let evicted = f.evict_all();
        assert_eq!(evicted, vec![VisitorId(1), VisitorId(2), VisitorId(3), VisitorId(4)]);
        assert_eq!(f.total_visitors_served(), 0);
        assert!(!f.is_running());
        assert_eq!(f.queue_len(), 0);
    }

    #[test]
    fn move_to_keeps_queue() {
        let mut f = coaster(2, 10);
        queue(&mut f, [1]);
        f.move_to(GridPos::new(9, 4));
        assert_eq!(f.pos(), GridPos::new(9, 4));
        assert_eq!(f.queue_len(), 1);
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod statistics {
    use super::*;

    #[test]
    fn utilization_zero_before_any_time() {
        assert_eq!(coaster(20, 120).utilization(), 0.0);
    }

    #[test]
    fn utilization_two_thirds() {
        let mut f = coaster(20, 120);
        f.set_totals(60, 30);
        assert!((f.utilization() - 66.667).abs() < 1e-3);
    }

    #[test]
    fn avg_waiting_time_rounds_up_to_whole_batches() {
        let mut f = coaster(5, 10);
        assert_eq!(f.avg_waiting_time(), 0);
        queue(&mut f, 0..6);
        assert_eq!(f.avg_waiting_time(), 20);
    }

    #[test]
    fn history_is_capped_and_keeps_latest() {
        let mut f = coaster(5, 10).with_history_cap(1_000);
        for t in 0..1_500u64 {
            f.update(Tick(t));
        }
        assert_eq!(f.history().len(), 1_000);
        assert_eq!(f.history().front().unwrap().time, Tick(500));
        assert_eq!(f.history().back().unwrap().time, Tick(1_499));
    }

    #[test]
    fn history_samples_queue_length() {
        let mut f = coaster(5, 10);
        queue(&mut f, [1, 2]);
        f.update(Tick(3));
        let sample = f.history().back().unwrap();
        assert_eq!((sample.time, sample.len), (Tick(3), 2));
    }

    #[test]
    fn stats_snapshot_matches_accessors() {
        let mut f = coaster(5, 10);
        queue(&mut f, 0..7);
        f.update(Tick(0));
        f.start_run(Tick(0));
        let s = f.stats();
        assert_eq!(s.name, "Coaster");
        assert_eq!(s.batch_len, 5);
        assert_eq!(s.queue_len, 2);
        assert_eq!(s.avg_waiting_time, 10);
        assert_eq!(s.status, FacilityStatus::Running);
    }
}

// ── Kinds, factory, records ───────────────────────────────────────────────────

#[cfg(test)]
mod factory {
    use super::*;

    #[test]
    fn five_kinds_with_distinct_defaults() {
        let defaults: Vec<_> = FacilityKind::ALL.iter().map(|k| k.defaults()).collect();
        assert_eq!(defaults.len(), 5);
        for (i, a) in defaults.iter().enumerate() {
            for b in &defaults[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(FacilityKind::FerrisWheel.defaults().capacity, 36);
        assert_eq!(FacilityKind::FerrisWheel.defaults().run_time, 180);
    }

    #[test]
    fn tag_lookup_is_forgiving() {
        assert_eq!(FacilityKind::from_tag("Roller Coaster"), Some(FacilityKind::RollerCoaster));
        assert_eq!(FacilityKind::from_tag("pirate-ship"), Some(FacilityKind::PirateShip));
        assert_eq!(FacilityKind::from_tag("log flume"), None);
        for kind in FacilityKind::ALL {
            assert_eq!(FacilityKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn create_uses_kind_defaults_unless_overridden() {
        let f = FacilityFactory::create("Wheel", "ferris_wheel", None, None, GridPos::ORIGIN).unwrap();
        assert_eq!((f.capacity(), f.run_time(), f.emoji()), (36, 180, "🎡"));

        let f = FacilityFactory::create("Wheel", "ferris_wheel", Some(10), Some(60), GridPos::ORIGIN)
            .unwrap();
        assert_eq!((f.capacity(), f.run_time()), (10, 60));
    }

    #[test]
    fn create_unknown_type_uses_caller_values() {
        let f = FacilityFactory::create("Maze", "maze", Some(3), Some(30), GridPos::ORIGIN).unwrap();
        assert_eq!((f.capacity(), f.run_time(), f.emoji()), (3, 30, DEFAULT_EMOJI));
        assert!(FacilityFactory::type_info("maze").is_none());
        assert_eq!(FacilityFactory::available_types().len(), 5);
    }

    #[test]
    fn default_park_has_one_of_each_kind() {
        let park = default_facilities().unwrap();
        let kinds: Vec<_> = park.iter().filter_map(Facility::kind).collect();
        assert_eq!(kinds.len(), 5);
        for kind in FacilityKind::ALL {
            assert!(kinds.contains(&kind));
        }
    }

    #[test]
    fn random_free_position_avoids_occupied_cells() {
        let mut rng = SimRng::new(3);
        let occupied: Vec<GridPos> = (0..4)
            .flat_map(|x| (0..4).map(move |y| GridPos::new(x, y)))
            .filter(|p| *p != GridPos::new(2, 1))
            .collect();
        assert_eq!(random_free_position(4, &occupied, &mut rng), GridPos::new(2, 1));
    }

    #[test]
    fn random_free_position_on_full_map_is_origin() {
        let mut rng = SimRng::new(3);
        let occupied = vec![GridPos::new(0, 0)];
        assert_eq!(random_free_position(1, &occupied, &mut rng), GridPos::ORIGIN);
    }

    #[test]
    fn record_round_trip_keeps_configuration() {
        let f = FacilityFactory::create("Derby", "bumper_cars", None, None, GridPos::new(10, 10))
            .unwrap()
            .with_emoji("🏎");
        let record = f.to_record();
        let back = Facility::from_record(&record).unwrap();
        assert_eq!(back.to_record(), record);
        assert_eq!(back.emoji(), "🏎");
    }

    #[test]
    fn record_json_uses_type_field_and_defaults() {
        let json = r#"{"name":"Maze","x":1,"y":2,"capacity":3,"run_time":30}"#;
        let record: FacilityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.type_tag, "default");
        assert_eq!(record.emoji, DEFAULT_EMOJI);

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["type"], "default");
    }

    #[test]
    fn record_with_bad_capacity_is_rejected() {
        let record = FacilityRecord {
            name:     "Broken".into(),
            x:        0,
            y:        0,
            capacity: 0,
            run_time: 10,
            type_tag: "carousel".into(),
            emoji:    "🎠".into(),
        };
        assert!(Facility::from_record(&record).is_err());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn utilization_stays_within_percent_bounds(run in 0u64..1_000_000, idle in 0u64..1_000_000) {
            let mut f = coaster(1, 1);
            f.set_totals(run, idle);
            let u = f.utilization();
            prop_assert!((0.0..=100.0).contains(&u));
        }

        #[test]
        fn history_never_exceeds_cap(cap in 1usize..64, updates in 0u64..300) {
            let mut f = coaster(3, 5).with_history_cap(cap);
            for t in 0..updates {
                if t % 3 == 0 {
                    f.add_visitor(VisitorId(t as u32));
                }
                f.update(Tick(t));
                if !f.is_running() && f.queue_len() > 0 {
                    f.start_run(Tick(t));
                }
                prop_assert!(f.history().len() <= cap);
                prop_assert!(f.current_batch().len() <= 3);
            }
            if updates > 0 {
                prop_assert_eq!(f.history().back().map(|s| s.time), Some(Tick(updates - 1)));
            }
        }
    }
}
