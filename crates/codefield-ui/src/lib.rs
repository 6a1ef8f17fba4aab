//! One-time code entry field.
//!
//! A [`CodeEntryField`] shows a fixed number of character boxes above a row
//! of underline segments. The segment at the next entry position is
//! highlighted and, optionally, blinks like a caret. Text lives in a hidden
//! [`InputCapture`]; the field filters edits to the character limit, mirrors
//! the text into the boxes and tells a [`CodeCompletionObserver`] when the
//! code is full.

mod blink;
mod edit_filter;
mod error;
mod field;
mod input;
mod key_event;
mod layout;
mod observer;
mod options;
mod pointer;
mod slots;
pub mod text;
mod underline;

pub use blink::{BLINK_INTERVAL, BLINK_INTERVAL_MS};
pub use edit_filter::EditFilter;
pub use error::CodeFieldError;
pub use field::{CodeEntryField, FieldSnapshot};
pub use input::{EditProposalHook, HiddenTextInput, InputCapture, TextChangedHook};
pub use key_event::{KeyCode, KeyEvent, KeyEventType, Modifiers};
pub use layout::{FieldLayout, SpacedEvenly};
pub use observer::CodeCompletionObserver;
pub use options::{CodeFieldOptions, CompletionPolicy, DEFAULT_CHARACTER_LIMIT};
pub use pointer::{ContextAction, PointerEvent, PointerEventKind};
pub use slots::DisplaySlot;
pub use text::{EditProposal, TextRange};
pub use underline::SegmentState;

pub use codefield_core::{Duration, TimerId, TimerQueue, TimerScheduler};
pub use codefield_graphics::{Color, Dp, Point, Rect, Size};

pub mod prelude {
    pub use crate::field::{CodeEntryField, FieldSnapshot};
    pub use crate::input::{HiddenTextInput, InputCapture};
    pub use crate::key_event::{KeyCode, KeyEvent, Modifiers};
    pub use crate::observer::CodeCompletionObserver;
    pub use crate::options::{CodeFieldOptions, CompletionPolicy};
    pub use crate::pointer::PointerEvent;
    pub use crate::underline::SegmentState;
}
