use super::TextRange;

/// A proposed replacement of `range` with `replacement`.
///
/// Typing proposes an insertion at the cursor, backspace proposes replacing
/// the previous grapheme with the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProposal {
    pub range: TextRange,
    pub replacement: String,
}

impl EditProposal {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert_at(position: usize, text: impl Into<String>) -> Self {
        Self::new(TextRange::cursor(position), text)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::new(range, String::new())
    }

    /// An empty replacement only ever removes text.
    pub fn is_deletion(&self) -> bool {
        self.replacement.is_empty()
    }

    /// Returns `text` with the proposal applied, or `None` when the range does
    /// not fall on character boundaries.
    pub fn apply(&self, text: &str) -> Option<String> {
        let range = self.range.coerce_in(text.len());
        let (start, end) = (range.min(), range.max());
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return None;
        }
        let mut result = String::with_capacity(text.len() - (end - start) + self.replacement.len());
        result.push_str(&text[..start]);
        result.push_str(&self.replacement);
        result.push_str(&text[end..]);
        Some(result)
    }
}
