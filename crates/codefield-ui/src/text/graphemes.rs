use super::TextRange;
use unicode_segmentation::UnicodeSegmentation;

/// Number of extended grapheme clusters in `text`.
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// The grapheme cluster at `index`, if the text is that long.
pub fn grapheme_at(text: &str, index: usize) -> Option<&str> {
    text.graphemes(true).nth(index)
}

/// Byte range covering the last grapheme cluster, or a cursor at 0 when the
/// text is empty.
pub fn last_grapheme_range(text: &str) -> TextRange {
    match text.grapheme_indices(true).next_back() {
        Some((start, grapheme)) => TextRange::new(start, start + grapheme.len()),
        None => TextRange::cursor(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combining_sequences_count_once() {
        // "e" + combining acute accent
        let text = "ae\u{301}b";
        assert_eq!(grapheme_len(text), 3);
        assert_eq!(grapheme_at(text, 1), Some("e\u{301}"));
        assert_eq!(grapheme_at(text, 3), None);
    }

    #[test]
    fn last_grapheme_range_spans_whole_cluster() {
        let text = "1e\u{301}";
        assert_eq!(last_grapheme_range(text), TextRange::new(1, text.len()));
        assert_eq!(last_grapheme_range(""), TextRange::cursor(0));
    }
}
