use cinnabar_engine::surface::frame::AnimationState;

#[test]
fn frame_advances_once_per_period() {
    // fps 10, 4 frames: after 0.39s the index must have stepped exactly
    // floor(0.39 / 0.1) = 3 times
    let mut state = AnimationState::new(vec![(10, 4, true)]);
    state.advance(0.39);
    assert_eq!(state.frame(), 3);
    assert!(state.is_animating());
}

#[test]
fn frame_advances_the_same_under_small_steps() {
    let mut state = AnimationState::new(vec![(10, 4, true)]);
    for _ in 0..39 {
        state.advance(0.01);
    }
    assert_eq!(state.frame(), 3);
}

#[test]
fn looping_cycle_wraps_modulo_frame_count() {
    let mut state = AnimationState::new(vec![(10, 4, true)]);
    state.advance(0.55);
    // 5 steps: 0 -> 1 -> 2 -> 3 -> 0 -> 1
    assert_eq!(state.frame(), 1);
    assert!(state.is_animating());
}

#[test]
fn non_looping_cycle_stops_after_wrapping() {
    let mut state = AnimationState::new(vec![(10, 3, false)]);
    state.advance(0.1);
    state.advance(0.1);
    assert_eq!(state.frame(), 2);
    assert!(state.is_animating());

    // the wrap back to frame 0 kills the animation
    state.advance(0.1);
    assert_eq!(state.frame(), 0);
    assert!(!state.is_animating());

    // further updates change nothing
    assert_eq!(state.advance(1.0), None);
    assert_eq!(state.frame(), 0);
    assert!(!state.is_animating());
}

#[test]
fn advance_reports_only_actual_changes() {
    let mut state = AnimationState::new(vec![(10, 4, true)]);
    assert_eq!(state.advance(0.05), None);
    assert_eq!(state.advance(0.05), Some(1));
    assert_eq!(state.advance(0.02), None);
}

#[test]
fn change_cycle_wraps_and_resets() {
    let mut state = AnimationState::new(vec![(10, 4, false), (24, 6, true)]);
    state.advance(0.25);
    assert_eq!(state.frame(), 2);

    // index 5 wraps to cycle 1 of 2
    let selected = state.change_cycle(5);
    assert_eq!(selected, 1);
    assert_eq!(state.cycle(), 1);
    assert_eq!(state.frame(), 0);
    assert!(state.is_animating());
}

#[test]
fn change_cycle_rearms_a_finished_animation() {
    let mut state = AnimationState::new(vec![(10, 2, false)]);
    state.advance(0.2);
    assert!(!state.is_animating());

    state.change_cycle(0);
    assert!(state.is_animating());
    state.advance(0.1);
    assert_eq!(state.frame(), 1);
}

#[test]
fn remainder_carries_across_updates() {
    // 0.15s then 0.05s is two full periods at 10 fps
    let mut state = AnimationState::new(vec![(10, 8, true)]);
    state.advance(0.15);
    assert_eq!(state.frame(), 1);
    state.advance(0.05);
    assert_eq!(state.frame(), 2);
}
