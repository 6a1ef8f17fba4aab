//! Headless harness for driving a code field in tests.
//!
//! `CodeFieldTestRule` wires a [`CodeEntryField`] to a [`HiddenTextInput`]
//! and a virtual-time [`TimerQueue`], registers a [`RecordingObserver`],
//! configures the field and focuses it, so tests can start typing right away.
//!
//! ```
//! use codefield_testing::CodeFieldTestRule;
//!
//! let rule = CodeFieldTestRule::new();
//! rule.type_text("12345");
//! assert_eq!(rule.completions(), vec!["12345".to_string()]);
//! ```

use codefield_core::{Duration, TimerQueue};
use codefield_ui::{
    CodeCompletionObserver, CodeEntryField, CodeFieldOptions, EditProposal, FieldSnapshot,
    HiddenTextInput, InputCapture, KeyCode, KeyEvent, PointerEvent, BLINK_INTERVAL,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Observer that records every code it is told about.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    codes: RefCell<Vec<String>>,
}

impl RecordingObserver {
    pub fn codes(&self) -> Vec<String> {
        self.codes.borrow().clone()
    }
}

impl CodeCompletionObserver for RecordingObserver {
    fn on_complete(&self, code: &str) {
        self.codes.borrow_mut().push(code.to_string());
    }
}

/// Test rule owning a configured, focused field and its collaborators.
pub struct CodeFieldTestRule {
    input: Rc<HiddenTextInput>,
    timers: Rc<TimerQueue>,
    observer: Rc<RecordingObserver>,
    // Keeps the weakly held observer alive for the rule's lifetime.
    observer_handle: Rc<dyn CodeCompletionObserver>,
    field: Rc<CodeEntryField>,
}

impl CodeFieldTestRule {
    /// A field with default options.
    pub fn new() -> Self {
        Self::with_options(CodeFieldOptions::default())
    }

    /// A field built from `options`, configured with its own flicker setting.
    ///
    /// Panics if the options are invalid.
    pub fn with_options(options: CodeFieldOptions) -> Self {
        let rule = Self::unconfigured(options);
        rule.configure();
        rule.input.focus();
        rule
    }

    /// A field that has been built but not configured or focused.
    pub fn unconfigured(options: CodeFieldOptions) -> Self {
        let input = Rc::new(HiddenTextInput::new());
        let timers = Rc::new(TimerQueue::new());
        let field = CodeEntryField::new(options, input.clone(), timers.clone())
            .unwrap_or_else(|err| panic!("invalid test options: {err}"));
        let observer = Rc::new(RecordingObserver::default());
        let observer_handle: Rc<dyn CodeCompletionObserver> = observer.clone();
        Self {
            input,
            timers,
            observer,
            observer_handle,
            field: Rc::new(field),
        }
    }

    /// Configures with the recording observer and the options' flicker flag.
    pub fn configure(&self) {
        let flicker = self.field.options().flicker_enabled;
        self.configure_with_flicker(flicker);
    }

    pub fn configure_with_flicker(&self, flicker_enabled: bool) {
        self.field
            .configure(Some(&self.observer_handle), flicker_enabled);
    }

    pub fn field(&self) -> &Rc<CodeEntryField> {
        &self.field
    }

    pub fn input(&self) -> &Rc<HiddenTextInput> {
        &self.input
    }

    pub fn timers(&self) -> &Rc<TimerQueue> {
        &self.timers
    }

    /// Sends one key-down per character. Returns how many were consumed.
    pub fn type_text(&self, text: &str) -> usize {
        text.chars()
            .filter(|ch| self.field.handle_key_event(&KeyEvent::character(ch.to_string())))
            .count()
    }

    /// Delivers `text` as a single insert at the end, the way paste and
    /// one-time-code autofill arrive.
    pub fn paste(&self, text: &str) -> bool {
        let end = self.input.text().len();
        self.input.propose_edit(EditProposal::insert_at(end, text))
    }

    pub fn press(&self, key_code: KeyCode) -> bool {
        self.field.handle_key_event(&KeyEvent::key_down(key_code, ""))
    }

    pub fn press_backspace(&self) -> bool {
        self.press(KeyCode::Backspace)
    }

    pub fn tap(&self, x: f32, y: f32) -> bool {
        self.field.handle_pointer_event(&PointerEvent::down(x, y))
    }

    /// Advances virtual time, firing due timers. Returns callbacks run.
    pub fn advance_time(&self, delta: Duration) -> usize {
        self.timers.advance_by(delta)
    }

    /// Advances by one blink interval.
    pub fn advance_blink(&self) -> usize {
        self.advance_time(BLINK_INTERVAL)
    }

    pub fn text(&self) -> String {
        self.input.text()
    }

    pub fn completions(&self) -> Vec<String> {
        self.observer.codes()
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        self.field.snapshot()
    }
}

impl Default for CodeFieldTestRule {
    fn default() -> Self {
        Self::new()
    }
}
