//! Unit tests for tp-visitor.

use tp_core::{FacilityId, GridPos, SimRng, Tick, VisitorId};

use crate::{Visitor, VisitorGenerator, VisitorStatus};

const A: FacilityId = FacilityId(0);
const B: FacilityId = FacilityId(1);
const C: FacilityId = FacilityId(2);

fn visitor(plan: &[FacilityId]) -> Visitor {
    Visitor::new(VisitorId(0), GridPos::ORIGIN, plan.iter().copied())
}

/// Walk one full visit: queue, ride, leave.
fn visit(v: &mut Visitor, arrive: u64, board: u64, leave: u64) {
    assert!(v.start_waiting(Tick(arrive)));
    assert!(v.start_ride(Tick(board)));
    assert!(v.end_ride(Tick(leave)));
}

#[cfg(test)]
mod itinerary {
    use super::*;

    #[test]
    fn traversal_a_b_c() {
        let mut v = visitor(&[A, B, C]);
        assert_eq!(v.status(), VisitorStatus::Free);
        assert_eq!(v.target(), Some(A));
        assert_eq!(v.itinerary_len(), 3);

        visit(&mut v, 0, 1, 2);
        assert_eq!(v.target(), Some(B));
        assert_eq!(v.itinerary_len(), 2);
        assert_eq!(v.status(), VisitorStatus::Free);

        visit(&mut v, 3, 4, 5);
        visit(&mut v, 6, 7, 8);
        assert_eq!(v.target(), None);
        assert_eq!(v.status(), VisitorStatus::Done);
        assert!(v.has_visited(A) && v.has_visited(B) && v.has_visited(C));
    }

    #[test]
    fn empty_plan_is_done_immediately() {
        let v = visitor(&[]);
        assert_eq!(v.status(), VisitorStatus::Done);
        assert_eq!(v.next_destination(), None);
        assert!(!v.has_plan());
    }

    #[test]
    fn remaining_plan_is_in_visit_order() {
        let mut v = visitor(&[C, A, B]);
        assert_eq!(v.remaining_plan(), vec![C, A, B]);
        visit(&mut v, 0, 0, 1);
        assert_eq!(v.remaining_plan(), vec![A, B]);
    }

    #[test]
    fn next_destination_does_not_mutate() {
        let v = visitor(&[A, B]);
        assert_eq!(v.next_destination(), Some(A));
        assert_eq!(v.next_destination(), Some(A));
        assert_eq!(v.itinerary_len(), 2);
    }
}

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn closes_x_before_y() {
        let mut v = visitor(&[A]);
        let target = GridPos::new(2, 1);
        let mut path = Vec::new();
        while !v.move_towards(target) {
            path.push(v.pos());
        }
        assert_eq!(path, vec![GridPos::new(1, 0), GridPos::new(2, 0), GridPos::new(2, 1)]);
    }

    #[test]
    fn arrival_reported_only_at_zero_distance() {
        let mut v = visitor(&[A]);
        let target = GridPos::new(1, 0);
        assert!(!v.move_towards(target), "the landing step is not arrival");
        assert_eq!(v.pos(), target);
        assert!(v.move_towards(target));
        assert_eq!(v.pos(), target);
    }

    #[test]
    fn moves_in_negative_direction() {
        let mut v = Visitor::new(VisitorId(1), GridPos::new(3, 3), [A]);
        v.move_towards(GridPos::new(0, 5));
        assert_eq!(v.pos(), GridPos::new(2, 3));
    }
}

#[cfg(test)]
mod timers {
    use super::*;

    #[test]
    fn waiting_and_ride_time_accumulate() {
        let mut v = visitor(&[A, B]);
        visit(&mut v, 10, 25, 40);
        assert_eq!(v.total_waiting_time(), 15);
        assert_eq!(v.total_ride_time(), 15);
        visit(&mut v, 50, 50, 70);
        assert_eq!(v.total_waiting_time(), 15);
        assert_eq!(v.total_ride_time(), 35);
        assert_eq!(v.waiting_start_time(), None);
        assert_eq!(v.ride_start_time(), None);
    }

    #[test]
    fn transitions_from_wrong_state_are_rejected() {
        let mut v = visitor(&[A]);
        assert!(!v.start_ride(Tick(0)));
        assert!(!v.end_ride(Tick(0)));
        assert!(!v.abandon(Tick(0)));
        assert!(v.start_waiting(Tick(0)));
        assert!(!v.start_waiting(Tick(1)));
        assert_eq!(v.status(), VisitorStatus::Waiting);
    }

    #[test]
    fn done_visitor_is_inert() {
        let mut v = visitor(&[A]);
        visit(&mut v, 0, 1, 2);
        assert!(v.is_done());
        assert!(!v.start_waiting(Tick(3)));
        assert!(!v.end_ride(Tick(3)));
    }

    #[test]
    fn abandon_keeps_target_and_credits_time() {
        let mut v = visitor(&[A, B]);
        v.start_waiting(Tick(0));
        v.start_ride(Tick(5));
        assert!(v.abandon(Tick(8)));
        assert_eq!(v.status(), VisitorStatus::Free);
        assert_eq!(v.target(), Some(A));
        assert!(!v.has_visited(A));
        assert_eq!((v.total_waiting_time(), v.total_ride_time()), (5, 3));
    }

    #[test]
    fn drop_stop_removes_later_stop() {
        let mut v = visitor(&[A, B, C]);
        assert!(v.drop_stop(B));
        assert_eq!(v.remaining_plan(), vec![A, C]);
        assert!(!v.drop_stop(B));
        assert_eq!(v.status(), VisitorStatus::Free);
    }

    #[test]
    fn dropping_last_stop_finishes_free_visitor() {
        let mut v = visitor(&[A]);
        assert!(v.drop_stop(A));
        assert_eq!(v.status(), VisitorStatus::Done);
        assert_eq!(v.target(), None);
        assert!(!v.has_visited(A));
    }

    #[test]
    fn drop_stop_leaves_current_visit_alone() {
        let mut v = visitor(&[A, B]);
        v.start_waiting(Tick(0));
        assert!(!v.drop_stop(A));
        assert_eq!(v.target(), Some(A));
        assert!(v.drop_stop(B));
        assert_eq!(v.status(), VisitorStatus::Waiting);
        assert_eq!(v.remaining_plan(), vec![A]);
    }

    #[test]
    fn status_line_pairs_status_and_target() {
        let mut v = visitor(&[B]);
        assert_eq!(v.status_line(), (VisitorStatus::Free, Some(B)));
        v.start_waiting(Tick(0));
        assert_eq!(v.status_line(), (VisitorStatus::Waiting, Some(B)));
    }
}

#[cfg(test)]
mod generator {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut g = VisitorGenerator::new();
        let a = g.generate_visitor(GridPos::ORIGIN, [A]);
        let b = g.generate_visitor(GridPos::ORIGIN, [A]);
        assert!(b.id() > a.id());
        assert_eq!(g.peek_next_id(), VisitorId(2));
    }

    #[test]
    fn batch_plans_are_distinct_and_bounded() {
        let mut g = VisitorGenerator::new();
        let mut rng = SimRng::new(9);
        let targets: Vec<FacilityId> = (0..5).map(FacilityId).collect();
        let entry = GridPos::new(0, 7);

        let batch = g.generate_batch(50, entry, &targets, &mut rng);
        assert_eq!(batch.len(), 50);
        let mut lengths = std::collections::BTreeSet::new();
        for v in &batch {
            assert_eq!(v.pos(), entry);
            let plan = v.remaining_plan();
            assert!((2..=4).contains(&plan.len()), "plan length {}", plan.len());
            let mut dedup = plan.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), plan.len());
            lengths.insert(plan.len());
        }
        // Both ends of the range are drawn.
        assert_eq!(lengths.into_iter().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn short_target_list_caps_plan_length() {
        let mut g = VisitorGenerator::new();
        let mut rng = SimRng::new(3);
        let batch = g.generate_batch(30, GridPos::ORIGIN, &[A, B], &mut rng);
        assert!(batch.iter().all(|v| v.itinerary_len() == 2));
    }

    #[test]
    fn single_target_gives_single_stop() {
        let mut g = VisitorGenerator::new();
        let mut rng = SimRng::new(1);
        let batch = g.generate_batch(10, GridPos::ORIGIN, &[C], &mut rng);
        assert!(batch.iter().all(|v| v.remaining_plan() == vec![C]));
    }

    #[test]
    fn no_targets_gives_done_visitors() {
        let mut g = VisitorGenerator::new();
        let mut rng = SimRng::new(1);
        let batch = g.generate_batch(3, GridPos::ORIGIN, &[], &mut rng);
        assert!(batch.iter().all(Visitor::is_done));
        assert_eq!(g.generated(), 3);
    }

    #[test]
    fn same_seed_same_plans() {
        let targets: Vec<FacilityId> = (0..6).map(FacilityId).collect();
        let plans = |seed| {
            let mut rng = SimRng::new(seed);
            VisitorGenerator::new()
                .generate_batch(20, GridPos::ORIGIN, &targets, &mut rng)
                .iter()
                .map(Visitor::remaining_plan)
                .collect::<Vec<_>>()
        };
        assert_eq!(plans(77), plans(77));
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn walk_reaches_any_target(
            sx in -20i32..20, sy in -20i32..20,
            tx in -20i32..20, ty in -20i32..20,
        ) {
            let start = GridPos::new(sx, sy);
            let target = GridPos::new(tx, ty);
            let mut v = Visitor::new(VisitorId(0), start, [A]);
            let mut steps = 0;
            while !v.move_towards(target) {
                steps += 1;
                prop_assert!(steps <= start.manhattan(target));
            }
            prop_assert_eq!(steps, start.manhattan(target));
            prop_assert_eq!(v.pos(), target);
        }

        #[test]
        fn done_iff_itinerary_empty(len in 0usize..6) {
            let plan: Vec<FacilityId> = (0..len as u32).map(FacilityId).collect();
            let mut v = Visitor::new(VisitorId(0), GridPos::ORIGIN, plan);
            let mut t = 0;
            loop {
                prop_assert_eq!(v.is_done(), !v.has_plan());
                prop_assert_eq!(v.target().is_none(), v.is_done());
                if v.is_done() {
                    break;
                }
                visit(&mut v, t, t + 1, t + 2);
                t += 3;
            }
            prop_assert_eq!(v.visited().len(), len);
        }
    }
}
