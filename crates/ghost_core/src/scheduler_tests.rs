use super::*;

fn scheduler_with(teams: &[&'static str]) -> TeamRotationScheduler<&'static str> {
    let mut scheduler = TeamRotationScheduler::default();
    for &team in teams {
        scheduler.register(team, TeamHandle::new(team, 1200.0));
    }
    scheduler
}

fn queued(scheduler: &TeamRotationScheduler<&'static str>) -> Vec<&'static str> {
    scheduler.queued().copied().collect()
}

#[test]
fn test_fresh_scheduler_is_empty() {
    let mut scheduler: TeamRotationScheduler<u32> = TeamRotationScheduler::new(4);
    assert_eq!(scheduler.current_active(), None);
    assert_eq!(scheduler.queue_len(), 0);
    assert_eq!(scheduler.capacity(), 4);
    assert!(!scheduler.poll_and_clear_change());
    assert_eq!(scheduler.baseline_rating(), None);
}

#[test]
fn test_default_capacity() {
    let scheduler: TeamRotationScheduler<u32> = TeamRotationScheduler::default();
    assert_eq!(scheduler.capacity(), DEFAULT_QUEUE_CAPACITY);
    assert_eq!(DEFAULT_QUEUE_CAPACITY, 10);
}

#[test]
fn test_first_registration_becomes_active() {
    let mut scheduler = scheduler_with(&["A"]);
    assert_eq!(scheduler.current_active(), Some(&"A"));
    assert_eq!(scheduler.queue_len(), 0);
    // Initial activation is not a swap
    assert!(!scheduler.poll_and_clear_change());
}

#[test]
fn test_later_registrations_queue_in_order() {
    let scheduler = scheduler_with(&["A", "B", "C"]);
    assert_eq!(scheduler.current_active(), Some(&"A"));
    assert_eq!(queued(&scheduler), vec!["B", "C"]);
    assert_eq!(scheduler.registered_count(), 3);
}

#[test]
fn test_duplicate_registration_is_ignored() {
    let mut scheduler = scheduler_with(&["A", "B"]);
    scheduler.register("A", TeamHandle::new("A", 2000.0));
    scheduler.register("B", TeamHandle::new("B", 2000.0));

    assert_eq!(scheduler.current_active(), Some(&"A"));
    assert_eq!(queued(&scheduler), vec!["B"]);
    // First registration wins
    assert_eq!(scheduler.handle(&"A").map(|h| h.initial_rating), Some(1200.0));
    assert_eq!(scheduler.handle(&"B").map(|h| h.initial_rating), Some(1200.0));
}

#[test]
fn test_concrete_two_team_rotation() {
    let mut scheduler = scheduler_with(&["A", "B"]);
    assert_eq!(scheduler.current_active(), Some(&"A"));

    scheduler.rotate(1).unwrap();
    assert_eq!(scheduler.current_active(), Some(&"B"));
    assert_eq!(queued(&scheduler), vec!["A"]);
    assert!(scheduler.poll_and_clear_change());

    let delta = scheduler.compute_rating_delta(1200.0, 1.0).unwrap();
    assert_eq!(delta, 0.5);

    scheduler.rotate(2).unwrap();
    assert_eq!(scheduler.current_active(), Some(&"A"));
    assert_eq!(queued(&scheduler), vec!["B"]);
}

#[test]
fn test_fifo_fairness() {
    for n in 2..=8usize {
        let teams: Vec<usize> = (0..n).collect();
        let mut scheduler: TeamRotationScheduler<usize> = TeamRotationScheduler::new(n);
        for &team in &teams {
            scheduler.register(team, TeamHandle::with_default_rating("t"));
        }

        let mut seen = vec![*scheduler.current_active().unwrap()];
        for step in 1..n {
            scheduler.rotate(step as u64).unwrap();
            seen.push(*scheduler.current_active().unwrap());
        }
        // Each team learns exactly once, in registration order
        assert_eq!(seen, teams);

        // And the cycle repeats in the same order
        scheduler.rotate(n as u64).unwrap();
        assert_eq!(scheduler.current_active(), Some(&0));
    }
}

#[test]
fn test_change_flag_is_one_shot() {
    let mut scheduler = scheduler_with(&["A", "B"]);
    assert_eq!(
        (scheduler.poll_and_clear_change(), scheduler.poll_and_clear_change()),
        (false, false)
    );

    scheduler.rotate(10).unwrap();
    assert_eq!(
        (scheduler.poll_and_clear_change(), scheduler.poll_and_clear_change()),
        (true, false)
    );
}

#[test]
fn test_missed_poll_coalesces_swaps() {
    let mut scheduler = scheduler_with(&["A", "B", "C"]);
    scheduler.rotate(1).unwrap();
    scheduler.rotate(2).unwrap();
    assert!(scheduler.poll_and_clear_change());
    assert!(!scheduler.poll_and_clear_change());
    assert_eq!(scheduler.current_active(), Some(&"C"));
}

#[test]
fn test_bounded_queue_evicts_oldest() {
    let capacity = 3;
    let extra = 2;
    let mut scheduler: TeamRotationScheduler<u32> = TeamRotationScheduler::new(capacity);
    // Team 0 is active, 1..=capacity+extra queue up
    for team in 0..=(capacity + extra) as u32 {
        scheduler.register(team, TeamHandle::with_default_rating("t"));
    }

    assert_eq!(scheduler.current_active(), Some(&0));
    assert_eq!(scheduler.queue_len(), capacity);
    let waiting: Vec<u32> = scheduler.queued().copied().collect();
    assert_eq!(waiting, vec![3, 4, 5]);

    // Evicted teams stay registered, so re-registering them is still a no-op
    assert!(scheduler.is_registered(&1));
    scheduler.register(1, TeamHandle::with_default_rating("t"));
    assert_eq!(scheduler.queue_len(), capacity);
    assert!(!scheduler.queued().any(|&t| t == 1));
}

#[test]
fn test_rotation_never_evicts_at_capacity() {
    let mut scheduler: TeamRotationScheduler<u32> = TeamRotationScheduler::new(2);
    for team in 0..3 {
        scheduler.register(team, TeamHandle::with_default_rating("t"));
    }
    assert_eq!(scheduler.queue_len(), 2);

    let mut seen = Vec::new();
    for step in 0..6 {
        scheduler.rotate(step).unwrap();
        seen.push(*scheduler.current_active().unwrap());
        assert_eq!(scheduler.queue_len(), 2);
    }
    assert_eq!(seen, vec![1, 2, 0, 1, 2, 0]);
}

#[test]
fn test_zero_capacity_never_rotates() {
    let mut scheduler: TeamRotationScheduler<u32> = TeamRotationScheduler::new(0);
    scheduler.register(1, TeamHandle::with_default_rating("a"));
    scheduler.register(2, TeamHandle::with_default_rating("b"));

    assert_eq!(scheduler.current_active(), Some(&1));
    assert_eq!(scheduler.queue_len(), 0);
    assert_eq!(scheduler.registered_count(), 2);
    assert_eq!(
        scheduler.rotate(5),
        Err(SchedulerError::EmptyRotation { step: 5 })
    );
}

#[test]
fn test_active_and_queue_are_disjoint() {
    let mut scheduler = scheduler_with(&["A", "B", "C", "D"]);
    for step in 0..10 {
        scheduler.rotate(step).unwrap();
        let active = *scheduler.current_active().unwrap();
        let waiting = queued(&scheduler);
        assert!(!waiting.contains(&active));
        let mut all = waiting.clone();
        all.push(active);
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 4);
    }
}

#[test]
fn test_fresh_scheduler_errors() {
    let mut scheduler: TeamRotationScheduler<&str> = TeamRotationScheduler::default();
    assert_eq!(
        scheduler.compute_rating_delta(1000.0, 1.0),
        Err(SchedulerError::NoBaselineAvailable)
    );
    assert_eq!(
        scheduler.rotate(0),
        Err(SchedulerError::EmptyRotation { step: 0 })
    );
    assert!(!scheduler.poll_and_clear_change());
}

#[test]
fn test_single_team_cannot_rotate() {
    let mut scheduler = scheduler_with(&["A"]);
    assert!(matches!(
        scheduler.rotate(3),
        Err(SchedulerError::EmptyRotation { step: 3 })
    ));
    assert_eq!(scheduler.current_active(), Some(&"A"));
    assert!(!scheduler.poll_and_clear_change());
}

#[test]
fn test_baseline_is_first_registered() {
    let mut scheduler: TeamRotationScheduler<&str> = TeamRotationScheduler::default();
    scheduler.register("A", TeamHandle::new("A", 1000.0));
    scheduler.register("B", TeamHandle::new("B", 1600.0));
    assert_eq!(scheduler.baseline_rating(), Some(1000.0));

    // Rotation does not move the baseline
    scheduler.rotate(1).unwrap();
    assert_eq!(scheduler.baseline_rating(), Some(1000.0));
    let delta = scheduler.compute_rating_delta(1000.0, 0.5).unwrap();
    assert_eq!(delta, 0.0);
}

#[test]
fn test_rating_delta_properties() {
    let scheduler = scheduler_with(&["A"]);

    // Equal-rating draw is exactly zero
    assert_eq!(scheduler.compute_rating_delta(1200.0, 0.5).unwrap(), 0.0);

    for &rating in &[1000.0, 1200.0, 1450.0] {
        let win = scheduler.compute_rating_delta(rating, 1.0).unwrap();
        let loss = scheduler.compute_rating_delta(rating, 0.0).unwrap();
        assert!((win - loss - 1.0).abs() < 1e-12);
    }

    // A stronger learner gains less from a win
    let weak_win = scheduler.compute_rating_delta(1000.0, 1.0).unwrap();
    let strong_win = scheduler.compute_rating_delta(1400.0, 1.0).unwrap();
    assert!(weak_win > strong_win);
}

#[test]
fn test_outcome_out_of_range() {
    let scheduler = scheduler_with(&["A"]);
    assert_eq!(
        scheduler.compute_rating_delta(1200.0, 1.5),
        Err(SchedulerError::OutcomeOutOfRange(1.5))
    );
    assert!(scheduler.compute_rating_delta(1200.0, -0.1).is_err());
    assert!(scheduler.compute_rating_delta(1200.0, f64::NAN).is_err());
    assert!(scheduler.compute_rating_delta(1200.0, 0.3).is_ok());
}

#[test]
fn test_boxed_handles() {
    let mut scheduler: TeamRotationScheduler<u8, Box<dyn Competitor>> =
        TeamRotationScheduler::new(2);
    scheduler.register(7, Box::new(TeamHandle::new("boxed", 1300.0)));
    assert_eq!(scheduler.baseline_rating(), Some(1300.0));
}

#[test]
fn test_huge_capacity_does_not_preallocate() {
    let mut scheduler: TeamRotationScheduler<u32> = TeamRotationScheduler::new(usize::MAX);
    assert_eq!(scheduler.capacity(), usize::MAX);
    for team in 0..3 {
        scheduler.register(team, TeamHandle::with_default_rating("t"));
    }
    assert_eq!(scheduler.queue_len(), 2);
    scheduler.rotate(1).unwrap();
    assert_eq!(scheduler.current_active(), Some(&1));
}

#[test]
fn test_extreme_rating_delta_is_finite() {
    let scheduler = scheduler_with(&["A"]);
    let delta = scheduler.compute_rating_delta(200_000.0, 1.0).unwrap();
    assert!(delta.is_finite());
    assert_eq!(delta, 0.0);
}
