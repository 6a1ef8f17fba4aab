//! Completion observer capability.

use std::rc::Rc;

/// Told about a completed code.
///
/// The field holds observers weakly: whoever registers one keeps it alive
/// for as long as it should be notified. Plain closures are observers too.
pub trait CodeCompletionObserver {
    fn on_complete(&self, code: &str);
}

impl<F> CodeCompletionObserver for F
where
    F: Fn(&str),
{
    fn on_complete(&self, code: &str) {
        self(code)
    }
}

/// A pending notification, delivered once the field's state is released.
pub(crate) struct Completion {
    pub(crate) observer: Rc<dyn CodeCompletionObserver>,
    pub(crate) code: String,
}

impl Completion {
    pub(crate) fn deliver(self) {
        log::debug!("code complete ({} characters)", self.code.chars().count());
        self.observer.on_complete(&self.code);
    }
}
