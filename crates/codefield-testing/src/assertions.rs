//! Assertion helpers for code field state.

use codefield_graphics::Rect;
use codefield_ui::{CodeEntryField, SegmentState};

/// Assert that the boxes show `expected`, empty strings for blank boxes.
pub fn assert_slots(field: &CodeEntryField, expected: &[&str]) {
    let actual: Vec<String> = field
        .slots()
        .iter()
        .map(|slot| slot.as_str().to_string())
        .collect();
    assert_eq!(actual, expected, "displayed slots");
}

/// Assert that `expected` is the only highlighted segment, or that none is.
pub fn assert_single_active_segment(field: &CodeEntryField, expected: Option<usize>) {
    let highlighted: Vec<usize> = field
        .segment_states()
        .iter()
        .enumerate()
        .filter(|(_, state)| state.is_highlighted())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(
        highlighted,
        expected.into_iter().collect::<Vec<_>>(),
        "highlighted segments in {:?}",
        field.segment_states()
    );
    assert_eq!(field.active_segment(), expected, "active segment");
}

/// Assert that every segment except `active` is idle.
pub fn assert_idle_except(states: &[SegmentState], active: Option<usize>) {
    for (index, state) in states.iter().enumerate() {
        if Some(index) != active {
            assert_eq!(*state, SegmentState::Idle, "segment {index} should be idle");
        }
    }
}

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}
