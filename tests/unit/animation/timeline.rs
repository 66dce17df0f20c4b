use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn cycle_duration_for_three_connections() {
    let timing = CycleTiming::new(3, 2.0);
    assert!(approx(timing.total_animation_time(), 2.9));
    assert!(approx(timing.full_cycle_duration(), 4.9));
}

#[test]
fn cycle_duration_formula_holds_for_many_sizes() {
    for n in 0..20 {
        for dur in [0.5, 1.0, 2.0, 3.25] {
            let timing = CycleTiming::new(n, dur);
            assert!(approx(
                timing.full_cycle_duration(),
                n as f64 * 0.3 + dur + 2.0
            ));
        }
    }
}

#[test]
fn slices_match_closed_form() {
    let timing = CycleTiming::new(3, 2.0);
    let slices = timing.slices();
    assert_eq!(slices.len(), 3);

    let s1 = slices[1];
    assert!(approx(s1.start_time, 0.3 / 4.9));
    assert!(approx(s1.end_time, 2.3 / 4.9));
    assert!(approx(s1.reset_time, 2.9 / 4.9));
}

#[test]
fn reset_time_is_shared_by_every_arc() {
    let timing = CycleTiming::new(7, 1.5);
    let slices = timing.slices();
    assert!(slices.iter().all(|s| s.reset_time == slices[0].reset_time));
    assert!(slices.iter().all(|s| s.start_time <= s.end_time));
    assert!(slices.iter().all(|s| s.end_time <= s.reset_time));
}

#[test]
fn empty_list_has_no_slices_and_finite_cycle() {
    let timing = CycleTiming::new(0, 2.0);
    assert!(approx(timing.full_cycle_duration(), 4.0));
    assert!(timing.slices().is_empty());
    assert_eq!(timing.slice(0), None);
    assert!(timing.cycle_progress(123.0).is_finite());
}

#[test]
fn looping_arc_follows_keyframes_and_repeats() {
    let timing = CycleTiming::new(3, 2.0);
    let arc = ArcTimeline::looping(&timing, 1).unwrap();

    // Before its stagger slot the arc is invisible.
    assert_eq!(arc.sample(0.0).path_length, 0.0);
    assert_eq!(arc.sample(0.29).path_length, 0.0);
    // Fully drawn at the end of its draw window and held until reset.
    assert!(approx(arc.sample(2.3).path_length, 1.0));
    assert!(approx(arc.sample(2.8).path_length, 1.0));
    // Gone again by the end of the cycle.
    assert!(arc.sample(4.89).path_length < 0.01);

    // Next cycle replays the same values.
    for t in [0.1, 0.7, 1.3, 2.5, 3.6] {
        let a = arc.sample(t);
        let b = arc.sample(t + 4.9);
        assert!(approx(a.path_length, b.path_length), "t={t}");
    }
}

#[test]
fn looping_marker_peaks_at_end_time() {
    let timing = CycleTiming::new(2, 2.0);
    let arc = ArcTimeline::looping(&timing, 0).unwrap();

    let start = arc.sample(0.0).marker.unwrap();
    assert_eq!(start.opacity, 0.0);
    assert_eq!(start.offset, 0.0);

    let at_end = arc.sample(2.0).marker.unwrap();
    assert!(approx(at_end.opacity, 1.0));
    assert!(approx(at_end.offset, 1.0));

    let after_reset = arc.sample(3.0).marker.unwrap();
    assert_eq!(after_reset.opacity, 0.0);
    assert_eq!(after_reset.offset, 1.0);
}

#[test]
fn one_shot_starts_at_stagger_offset_and_never_repeats() {
    let timing = CycleTiming::new(4, 2.0);
    let arc = ArcTimeline::one_shot(&timing, 2);

    assert_eq!(arc.sample(0.0).path_length, 0.0);
    assert_eq!(arc.sample(0.59).path_length, 0.0);
    assert!(arc.sample(0.61).path_length > 0.0);
    assert!(approx(arc.sample(2.6).path_length, 1.0));
    assert!(arc.sample(2.6).marker.is_none());

    for t in [3.0, 10.0, 1_000.0] {
        assert!(approx(arc.sample(t).path_length, 1.0));
        assert!(arc.is_settled(t));
    }
    assert!(!arc.is_settled(1.0));
}

#[test]
fn zero_duration_one_shot_jumps_to_full_length() {
    let timing = CycleTiming::new(1, 0.0);
    let arc = ArcTimeline::one_shot(&timing, 0);
    assert_eq!(arc.sample(0.0).path_length, 1.0);
}

#[test]
fn mode_selects_track_kind() {
    let timing = CycleTiming::new(1, 2.0);
    assert!(matches!(
        ArcTimeline::for_mode(AnimationMode::Looping, &timing, 0).unwrap(),
        ArcTimeline::Looping { .. }
    ));
    assert!(matches!(
        ArcTimeline::for_mode(AnimationMode::OneShot, &timing, 0).unwrap(),
        ArcTimeline::OneShot { .. }
    ));
}
