//! Properties that hold after every text change, whatever the path.

use codefield_testing::prelude::*;
use codefield_ui::{
    text::grapheme_at, CodeFieldOptions, CompletionPolicy, InputCapture, SegmentState,
};

fn check_invariants(rule: &CodeFieldTestRule, limit: usize) {
    let text = rule.text();
    let len = text.chars().count();
    let slots = rule.field().slots();
    assert_eq!(slots.len(), limit);
    for (index, slot) in slots.iter().enumerate() {
        assert_eq!(slot.character(), grapheme_at(&text, index), "slot {index}");
    }

    let expected = (len < limit).then_some(len);
    assert_single_active_segment(rule.field(), expected);
    assert_eq!(
        rule.field().is_blinking(),
        expected.is_some(),
        "blink timer for {text:?}"
    );
}

#[test]
fn visuals_follow_text_through_mixed_edits() {
    for limit in 1..=7 {
        let rule = CodeFieldTestRule::with_options(
            CodeFieldOptions::default().with_character_limit(limit),
        );
        check_invariants(&rule, limit);

        for step in 0..limit + 2 {
            rule.type_text(&(step % 10).to_string());
            check_invariants(&rule, limit);
        }
        assert_eq!(rule.text().len(), limit);

        for _ in 0..3 {
            rule.press_backspace();
            check_invariants(&rule, limit);
        }

        rule.input().set_text("");
        check_invariants(&rule, limit);
    }
}

#[test]
fn every_full_sync_reports_again() {
    let rule = CodeFieldTestRule::new();
    rule.type_text("12345");
    rule.input().set_text("12345");
    rule.input().set_text("54321");
    assert_eq!(
        rule.completions(),
        vec!["12345".to_string(), "12345".to_string(), "54321".to_string()]
    );
}

#[test]
fn once_per_fill_reports_only_transitions() {
    let rule = CodeFieldTestRule::with_options(
        CodeFieldOptions::default().with_completion_policy(CompletionPolicy::OncePerFill),
    );
    rule.type_text("12345");
    rule.input().set_text("12345");
    assert_eq!(rule.completions().len(), 1);

    rule.press_backspace();
    rule.type_text("9");
    assert_eq!(
        rule.completions(),
        vec!["12345".to_string(), "12349".to_string()]
    );

    rule.configure();
    rule.input().focus();
    rule.type_text("12349");
    assert_eq!(rule.completions().len(), 3);
}

#[test]
fn overlong_text_leaves_visuals_untouched() {
    let rule = CodeFieldTestRule::with_options(CodeFieldOptions::default().with_character_limit(4));
    rule.type_text("12");
    let before = rule.snapshot();

    rule.input().set_text("123456");
    let after = rule.snapshot();
    assert_eq!(after.slots, before.slots);
    assert_eq!(after.segments, before.segments);
    assert_eq!(after.active_segment, Some(2));
    assert!(rule.completions().is_empty());

    // Deletions keep working from an overlong text.
    rule.press_backspace();
    assert_eq!(rule.text(), "12345");
    rule.press_backspace();
    assert_slots(rule.field(), &["1", "2", "3", "4"]);
    assert_eq!(rule.completions(), vec!["1234".to_string()]);
}

#[test]
fn grapheme_clusters_take_one_box() {
    let rule = CodeFieldTestRule::with_options(CodeFieldOptions::default().with_character_limit(3));
    assert!(rule.paste("e\u{301}"));
    assert_slots(rule.field(), &["e\u{301}", "", ""]);
    assert_single_active_segment(rule.field(), Some(1));

    assert!(rule.paste("\u{1F1EB}\u{1F1F7}7"));
    assert_slots(rule.field(), &["e\u{301}", "\u{1F1EB}\u{1F1F7}", "7"]);
    assert_single_active_segment(rule.field(), None);

    rule.press_backspace();
    assert_eq!(rule.text(), "e\u{301}\u{1F1EB}\u{1F1F7}");
    rule.press_backspace();
    assert_eq!(rule.text(), "e\u{301}");
}

#[test]
fn snapshot_reflects_field_state() {
    let rule = CodeFieldTestRule::with_options(CodeFieldOptions::default().with_character_limit(2));
    let snapshot = rule.snapshot();
    assert!(snapshot.focused);
    assert!(!snapshot.is_complete());
    assert_eq!(snapshot.segments[0], SegmentState::Blinking { visible: true });
    assert_eq!(snapshot.segment_colors.len(), 2);

    rule.type_text("42");
    let snapshot = rule.snapshot();
    assert!(snapshot.is_complete());
    assert_eq!(snapshot.text, "42");
    assert_eq!(snapshot.active_segment, None);
    assert!(snapshot
        .segments
        .iter()
        .all(|state| *state == SegmentState::Idle));
}
