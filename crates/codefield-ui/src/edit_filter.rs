//! Length gate for proposed edits.

use crate::text::{grapheme_len, EditProposal};

/// Decides whether a proposed edit may be applied to the hidden input.
///
/// Deletions always pass, so backspace keeps working even if the text got
/// longer than the limit through some other path. Anything else needs room:
/// the current text must be shorter than the limit and the edited text must
/// still fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditFilter {
    character_limit: usize,
}

impl EditFilter {
    pub fn new(character_limit: usize) -> Self {
        Self { character_limit }
    }

    /// Length-only decision: `current_len < limit || deletion`.
    pub fn allows(&self, current_len: usize, proposal: &EditProposal) -> bool {
        proposal.is_deletion() || current_len < self.character_limit
    }

    /// Full decision against the current text.
    pub fn accept(&self, current: &str, proposal: &EditProposal) -> bool {
        if proposal.is_deletion() {
            return true;
        }
        if !self.allows(grapheme_len(current), proposal) {
            return false;
        }
        // Pasted or autofilled codes arrive as one multi-character insert.
        proposal
            .apply(current)
            .is_some_and(|edited| grapheme_len(&edited) <= self.character_limit)
    }
}
