//! The one-time code entry field.
//!
//! `CodeEntryField` wraps a hidden [`InputCapture`] and mirrors its text into
//! a row of [`DisplaySlot`]s and a row of underline segments. The input's
//! text is the single source of truth; every visual is re-derived from it on
//! each change:
//!
//! 1. the edit filter approves or rejects the proposal,
//! 2. the input applies it and reports the new text,
//! 3. slots and the active underline segment are recomputed,
//! 4. the completion observer is told when the code is full.

use crate::edit_filter::EditFilter;
use crate::error::CodeFieldError;
use crate::input::{InputCapture, TextChangedHook};
use crate::key_event::{KeyCode, KeyEvent};
use crate::layout::FieldLayout;
use crate::observer::{CodeCompletionObserver, Completion};
use crate::options::{CodeFieldOptions, CompletionPolicy};
use crate::pointer::{ContextAction, PointerEvent, PointerEventKind};
use crate::slots::{blank_row, render_slots, DisplaySlot, SlotRow};
use crate::text::{grapheme_len, last_grapheme_range, EditProposal};
use crate::underline::{SegmentState, UnderlineIndicator};
use codefield_core::{TimerId, TimerScheduler};
use codefield_graphics::{Color, Rect, Size};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Immutable view of a field for renderers and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub text: String,
    pub slots: Vec<DisplaySlot>,
    pub segments: Vec<SegmentState>,
    /// Resolved color per segment, transparent during a hidden blink phase.
    pub segment_colors: Vec<Color>,
    pub active_segment: Option<usize>,
    pub focused: bool,
}

impl FieldSnapshot {
    pub fn is_complete(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(|slot| !slot.is_blank())
    }
}

struct FieldInner {
    options: CodeFieldOptions,
    filter: EditFilter,
    slots: SlotRow,
    underline: UnderlineIndicator,
    observer: Option<Weak<dyn CodeCompletionObserver>>,
    /// Set once a full code was reported, for [`CompletionPolicy::OncePerFill`].
    completion_reported: bool,
    configured: bool,
    layout_size: Option<Size>,
    /// The text-changed hook this field installed, to release only its own.
    text_changed_hook: Option<TextChangedHook>,
}

impl FieldInner {
    /// Re-derives every visual from `text`.
    ///
    /// Returns the completion to deliver once the caller has released the
    /// borrow on this state.
    fn synchronize(&mut self, text: &str) -> Option<Completion> {
        let limit = self.options.character_limit;
        let len = grapheme_len(text);
        if len > limit || len > self.slots.len() || len > self.underline.len() {
            log::debug!(
                "ignoring text change: {len} characters exceed {} slots",
                self.slots.len().min(limit)
            );
            return None;
        }

        render_slots(&mut self.slots, text);

        let completion = if len == limit {
            self.completion_for(text)
        } else {
            self.completion_reported = false;
            None
        };

        let active = (len < limit).then_some(len);
        self.underline.reset_idle_except(active);
        self.underline.set_active_segment(active);

        // Delivered by the caller after the borrow ends, so the observer
        // already sees the updated segments.
        completion
    }

    fn completion_for(&mut self, text: &str) -> Option<Completion> {
        if self.options.completion_policy == CompletionPolicy::OncePerFill
            && self.completion_reported
        {
            return None;
        }
        self.completion_reported = true;
        let observer = self.observer.as_ref()?.upgrade()?;
        Some(Completion {
            observer,
            code: text.to_string(),
        })
    }

    fn teardown(&mut self) {
        self.underline.teardown();
        self.slots.clear();
        self.observer = None;
        self.completion_reported = false;
        self.configured = false;
    }
}

/// One-time code entry control.
///
/// Build it with [`new`](Self::new), then call [`configure`](Self::configure)
/// before use and again whenever the field should start a fresh session.
/// The field is single-threaded: input hooks, blink ticks and host calls
/// must all come from the same event loop.
pub struct CodeEntryField {
    inner: Rc<RefCell<FieldInner>>,
    input: Rc<dyn InputCapture>,
}

impl CodeEntryField {
    /// Creates an unconfigured field over `input`, blinking on `scheduler`.
    pub fn new(
        options: CodeFieldOptions,
        input: Rc<dyn InputCapture>,
        scheduler: Rc<dyn TimerScheduler>,
    ) -> Result<Self, CodeFieldError> {
        options.validate()?;
        let filter = EditFilter::new(options.character_limit);
        Ok(Self {
            inner: Rc::new(RefCell::new(FieldInner {
                options,
                filter,
                slots: SlotRow::new(),
                underline: UnderlineIndicator::new(scheduler),
                observer: None,
                completion_reported: false,
                configured: false,
                layout_size: None,
                text_changed_hook: None,
            })),
            input,
        })
    }

    /// Starts a fresh session.
    ///
    /// Tears down any previous slots, segments, blink timer and hooks,
    /// registers `observer` (held weakly), rebuilds the rows, arms
    /// tap-to-focus, disables the edit menu and clears the text.
    pub fn configure(
        &self,
        observer: Option<&Rc<dyn CodeCompletionObserver>>,
        flicker_enabled: bool,
    ) {
        self.input.clear_hooks();
        {
            let mut inner = self.inner.borrow_mut();
            inner.teardown();
            inner.observer = observer.map(Rc::downgrade);
            inner.options.flicker_enabled = flicker_enabled;

            let count = inner.options.character_limit;
            inner.slots = blank_row(count);
            inner.underline.rebuild(count, flicker_enabled);
            inner.configured = true;
            log::debug!("code field configured: {count} slots, flicker {flicker_enabled}");
        }
        self.install_hooks();
        self.input.set_edit_menu_enabled(false);
        // Re-synchronizes through the text-changed hook.
        self.input.set_text("");
    }

    fn install_hooks(&self) {
        let filter = self.inner.borrow().filter;
        self.input.on_edit_proposal(Rc::new(
            move |current: &str, proposal: &EditProposal| filter.accept(current, proposal),
        ));

        let inner = Rc::downgrade(&self.inner);
        let on_text_changed: TextChangedHook = Rc::new(move |text: &str| {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let completion = inner.borrow_mut().synchronize(text);
            if let Some(completion) = completion {
                completion.deliver();
            }
        });
        self.inner.borrow_mut().text_changed_hook = Some(on_text_changed.clone());
        self.input.on_text_changed(on_text_changed);
    }

    /// Releases the blink timer and hooks. The field stays usable after
    /// another [`configure`](Self::configure).
    ///
    /// Hooks another field has since installed on the same input are left
    /// in place.
    pub fn teardown(&self) {
        let hook = {
            let mut inner = self.inner.borrow_mut();
            inner.teardown();
            inner.text_changed_hook.take()
        };
        if let Some(hook) = hook {
            self.input.release_hooks(&hook);
        }
    }

    /// Routes a key event to the hidden input. Returns whether it was consumed.
    ///
    /// Only key-down events while configured and focused are handled. Edit
    /// shortcuts (Ctrl/Cmd combinations) are never consumed.
    pub fn handle_key_event(&self, event: &KeyEvent) -> bool {
        if !event.is_key_down() || !self.is_configured() || !self.input.is_focused() {
            return false;
        }
        if event.modifiers.command_or_ctrl() {
            return false;
        }

        match event.key_code {
            KeyCode::Backspace => {
                let text = self.input.text();
                self.input
                    .propose_edit(EditProposal::delete(last_grapheme_range(&text)));
                true
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Escape => false,
            _ if event.has_text() => {
                let text = self.input.text();
                self.input
                    .propose_edit(EditProposal::insert_at(text.len(), event.text.clone()));
                true
            }
            _ => false,
        }
    }

    /// Tap-to-focus. A press inside the laid-out bounds focuses the hidden
    /// input; before the first layout pass any press does.
    pub fn handle_pointer_event(&self, event: &PointerEvent) -> bool {
        if event.kind != PointerEventKind::Down {
            return false;
        }
        let hit = {
            let inner = self.inner.borrow();
            inner.configured
                && inner
                    .layout_size
                    .map_or(true, |size| Rect::from_size(size).contains(event.position))
        };
        if hit {
            self.input.focus();
            log::debug!("code field focused by tap");
        }
        hit
    }

    /// The field is input-only: no copy, cut, paste or selection.
    pub fn can_perform_action(&self, _action: ContextAction) -> bool {
        false
    }

    /// Lays the field out in `size` px and remembers the bounds for tap
    /// hit-testing.
    pub fn layout(&self, size: Size, density: f32) -> FieldLayout {
        let mut inner = self.inner.borrow_mut();
        inner.layout_size = Some(size);
        FieldLayout::compute(&inner.options, size, density)
    }

    pub fn focus(&self) {
        self.input.focus();
    }

    pub fn blur(&self) {
        self.input.blur();
    }

    pub fn is_focused(&self) -> bool {
        self.input.is_focused()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.borrow().configured
    }

    pub fn input(&self) -> &Rc<dyn InputCapture> {
        &self.input
    }

    pub fn text(&self) -> String {
        self.input.text()
    }

    pub fn options(&self) -> CodeFieldOptions {
        self.inner.borrow().options.clone()
    }

    pub fn character_limit(&self) -> usize {
        self.inner.borrow().options.character_limit
    }

    pub fn slots(&self) -> Vec<DisplaySlot> {
        self.inner.borrow().slots.to_vec()
    }

    pub fn segment_states(&self) -> Vec<SegmentState> {
        self.inner.borrow().underline.states()
    }

    pub fn segment_color(&self, index: usize) -> Option<Color> {
        let inner = self.inner.borrow();
        let state = *inner.underline.states().get(index)?;
        Some(state.color(inner.options.idle_color, inner.options.active_color))
    }

    /// Index of the next entry position, `None` when full or unconfigured.
    pub fn active_segment(&self) -> Option<usize> {
        self.inner.borrow().underline.active_segment()
    }

    /// Whether the blink timer is armed.
    pub fn is_blinking(&self) -> bool {
        self.inner.borrow().underline.is_blinking()
    }

    pub fn blink_timer_id(&self) -> Option<TimerId> {
        self.inner.borrow().underline.blink_timer_id()
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        let text = self.input.text();
        let focused = self.input.is_focused();
        let inner = self.inner.borrow();
        let segments = inner.underline.states();
        let segment_colors = segments
            .iter()
            .map(|state| state.color(inner.options.idle_color, inner.options.active_color))
            .collect();
        FieldSnapshot {
            text,
            slots: inner.slots.to_vec(),
            segments,
            segment_colors,
            active_segment: inner.underline.active_segment(),
            focused,
        }
    }
}

impl Drop for CodeEntryField {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for CodeEntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("CodeEntryField")
            .field("character_limit", &inner.options.character_limit)
            .field("configured", &inner.configured)
            .field("underline", &inner.underline)
            .finish()
    }
}
