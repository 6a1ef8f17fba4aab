//! Text primitives for the hidden input.
//!
//! - [`TextRange`] - byte range in the input text, or a cursor
//! - [`EditProposal`] - a replacement the edit filter approves or rejects
//! - grapheme helpers - slots count user-perceived characters, not bytes

mod graphemes;
mod proposal;
mod range;

pub use graphemes::{grapheme_at, grapheme_len, last_grapheme_range};
pub use proposal::EditProposal;
pub use range::TextRange;
