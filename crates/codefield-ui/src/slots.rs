//! Character boxes derived from the input text.

use crate::text::grapheme_len;
use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

/// One character box: the grapheme at its index, or blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplaySlot {
    character: Option<String>,
}

impl DisplaySlot {
    pub const fn blank() -> Self {
        Self { character: None }
    }

    pub fn with_character(character: impl Into<String>) -> Self {
        Self {
            character: Some(character.into()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.character.is_none()
    }

    pub fn character(&self) -> Option<&str> {
        self.character.as_deref()
    }

    /// The displayed text, empty when blank.
    pub fn as_str(&self) -> &str {
        self.character.as_deref().unwrap_or("")
    }
}

/// Inline for the usual 4-8 digit codes.
pub(crate) type SlotRow = SmallVec<[DisplaySlot; 8]>;

pub(crate) fn blank_row(count: usize) -> SlotRow {
    (0..count).map(|_| DisplaySlot::blank()).collect()
}

/// Writes `text` into `slots`, one grapheme per slot, blanking the rest.
///
/// Callers guarantee `text` fits; extra graphemes are dropped.
pub(crate) fn render_slots(slots: &mut SlotRow, text: &str) {
    debug_assert!(grapheme_len(text) <= slots.len());
    let mut graphemes = text.graphemes(true);
    for slot in slots.iter_mut() {
        let next = graphemes.next();
        if slot.character() != next {
            slot.character = next.map(str::to_string);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_prefix_and_blanks_rest() {
        let mut slots = blank_row(4);
        render_slots(&mut slots, "12");
        let shown: Vec<&str> = slots.iter().map(DisplaySlot::as_str).collect();
        assert_eq!(shown, vec!["1", "2", "", ""]);
        assert!(slots[2].is_blank());
    }

    #[test]
    fn shorter_text_clears_trailing_slots() {
        let mut slots = blank_row(3);
        render_slots(&mut slots, "abc");
        render_slots(&mut slots, "a");
        assert_eq!(slots[0].character(), Some("a"));
        assert!(slots[1].is_blank());
        assert!(slots[2].is_blank());
    }

    #[test]
    fn graphemes_occupy_one_slot_each() {
        let mut slots = blank_row(2);
        render_slots(&mut slots, "e\u{301}\u{1F600}");
        assert_eq!(slots[0].as_str(), "e\u{301}");
        assert_eq!(slots[1].as_str(), "\u{1F600}");
    }
}
