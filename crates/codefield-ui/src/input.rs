//! Hidden text-entry primitive the field wraps.
//!
//! The field never stores text itself. It installs two hooks on an
//! [`InputCapture`]: one that approves or rejects each [`EditProposal`], and
//! one that is told about every text change. Hosts with a native text-entry
//! widget implement the trait over it; everyone else uses
//! [`HiddenTextInput`].

use crate::text::EditProposal;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Approves (`true`) or rejects a proposal, given the text before the edit.
pub type EditProposalHook = Rc<dyn Fn(&str, &EditProposal) -> bool>;

/// Observes the text after every change.
pub type TextChangedHook = Rc<dyn Fn(&str)>;

/// Capability the field needs from a text-entry primitive.
///
/// Hooks are single-slot: installing one replaces the previous hook. Hooks
/// must be called without any internal borrow held, since they re-enter the
/// field and may call back into the input.
pub trait InputCapture {
    fn text(&self) -> String;

    /// Replaces the text without consulting the edit hook.
    ///
    /// Always notifies the text-changed hook, even if the text is unchanged.
    fn set_text(&self, text: &str);

    fn focus(&self);

    fn blur(&self);

    fn is_focused(&self) -> bool;

    /// Runs `proposal` through the edit hook and applies it if approved.
    ///
    /// Returns whether the proposal was accepted. An accepted proposal that
    /// changes the text notifies the text-changed hook.
    fn propose_edit(&self, proposal: EditProposal) -> bool;

    fn on_edit_proposal(&self, hook: EditProposalHook);

    fn on_text_changed(&self, hook: TextChangedHook);

    fn clear_hooks(&self);

    /// Clears both hooks, but only if `owner` is the installed text-changed
    /// hook. Another field that hooked the input since keeps its hooks.
    fn release_hooks(&self, owner: &TextChangedHook);

    /// Shows or suppresses the platform copy/paste/select menu.
    fn set_edit_menu_enabled(&self, enabled: bool);
}

#[derive(Default)]
struct HiddenTextInputInner {
    text: String,
    focused: bool,
    edit_menu_enabled: bool,
    edit_proposal_hook: Option<EditProposalHook>,
    text_changed_hook: Option<TextChangedHook>,
}

/// In-memory [`InputCapture`] with no visuals of its own.
///
/// `HiddenTextInput` uses `RefCell` internally and is not thread-safe.
pub struct HiddenTextInput {
    inner: RefCell<HiddenTextInputInner>,
}

impl HiddenTextInput {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(HiddenTextInputInner {
                edit_menu_enabled: true,
                ..HiddenTextInputInner::default()
            }),
        }
    }

    pub fn edit_menu_enabled(&self) -> bool {
        self.inner.borrow().edit_menu_enabled
    }

    pub fn has_hooks(&self) -> bool {
        let inner = self.inner.borrow();
        inner.edit_proposal_hook.is_some() || inner.text_changed_hook.is_some()
    }

    fn notify_text_changed(&self, text: &str) {
        let hook = self.inner.borrow().text_changed_hook.clone();
        if let Some(hook) = hook {
            hook(text);
        }
    }
}

impl Default for HiddenTextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HiddenTextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("HiddenTextInput")
            .field("text", &inner.text)
            .field("focused", &inner.focused)
            .finish()
    }
}

impl InputCapture for HiddenTextInput {
    fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.inner.borrow_mut().text = text.to_string();
        self.notify_text_changed(text);
    }

    fn focus(&self) {
        self.inner.borrow_mut().focused = true;
    }

    fn blur(&self) {
        self.inner.borrow_mut().focused = false;
    }

    fn is_focused(&self) -> bool {
        self.inner.borrow().focused
    }

    fn propose_edit(&self, proposal: EditProposal) -> bool {
        let (current, hook) = {
            let inner = self.inner.borrow();
            (inner.text.clone(), inner.edit_proposal_hook.clone())
        };

        if let Some(hook) = hook {
            if !hook(&current, &proposal) {
                log::debug!("edit rejected: {proposal:?} on {} bytes", current.len());
                return false;
            }
        }

        let Some(edited) = proposal.apply(&current) else {
            log::debug!("edit range not on a character boundary: {proposal:?}");
            return false;
        };
        if edited == current {
            return true;
        }

        self.inner.borrow_mut().text = edited.clone();
        self.notify_text_changed(&edited);
        true
    }

    fn on_edit_proposal(&self, hook: EditProposalHook) {
        self.inner.borrow_mut().edit_proposal_hook = Some(hook);
    }

    fn on_text_changed(&self, hook: TextChangedHook) {
        self.inner.borrow_mut().text_changed_hook = Some(hook);
    }

    fn clear_hooks(&self) {
        // Hooks may capture state whose drop re-enters this input.
        let hooks = {
            let mut inner = self.inner.borrow_mut();
            (
                inner.edit_proposal_hook.take(),
                inner.text_changed_hook.take(),
            )
        };
        drop(hooks);
    }

    fn release_hooks(&self, owner: &TextChangedHook) {
        let hooks = {
            let mut inner = self.inner.borrow_mut();
            let owned = inner
                .text_changed_hook
                .as_ref()
                .is_some_and(|hook| Rc::ptr_eq(hook, owner));
            if !owned {
                log::debug!("input re-hooked by another owner, keeping its hooks");
                return;
            }
            (
                inner.edit_proposal_hook.take(),
                inner.text_changed_hook.take(),
            )
        };
        drop(hooks);
    }

    fn set_edit_menu_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().edit_menu_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextRange;
    use std::cell::Cell;

    #[test]
    fn accepted_proposal_updates_text_and_notifies() {
        let input = HiddenTextInput::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        input.on_text_changed(Rc::new({
            let seen = seen.clone();
            move |text: &str| seen.borrow_mut().push(text.to_string())
        }));

        assert!(input.propose_edit(EditProposal::insert_at(0, "4")));
        assert!(input.propose_edit(EditProposal::insert_at(1, "2")));
        assert_eq!(input.text(), "42");
        assert_eq!(*seen.borrow(), vec!["4".to_string(), "42".to_string()]);
    }

    #[test]
    fn rejected_proposal_leaves_text_untouched() {
        let input = HiddenTextInput::new();
        let notified = Rc::new(Cell::new(0));
        input.on_edit_proposal(Rc::new(|_current: &str, proposal: &EditProposal| {
            proposal.is_deletion()
        }));
        input.on_text_changed(Rc::new({
            let notified = notified.clone();
            move |_text: &str| notified.set(notified.get() + 1)
        }));

        assert!(!input.propose_edit(EditProposal::insert_at(0, "1")));
        assert_eq!(input.text(), "");
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn no_op_edit_does_not_notify() {
        let input = HiddenTextInput::new();
        let notified = Rc::new(Cell::new(0));
        input.on_text_changed(Rc::new({
            let notified = notified.clone();
            move |_text: &str| notified.set(notified.get() + 1)
        }));

        assert!(input.propose_edit(EditProposal::delete(TextRange::cursor(0))));
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn set_text_always_notifies() {
        let input = HiddenTextInput::new();
        let notified = Rc::new(Cell::new(0));
        input.on_text_changed(Rc::new({
            let notified = notified.clone();
            move |_text: &str| notified.set(notified.get() + 1)
        }));

        input.set_text("123");
        input.set_text("123");
        assert_eq!(notified.get(), 2);
    }

    #[test]
    fn hook_can_reenter_input() {
        let input = Rc::new(HiddenTextInput::new());
        let weak = Rc::downgrade(&input);
        input.on_text_changed(Rc::new(move |text: &str| {
            if let Some(input) = weak.upgrade() {
                assert_eq!(input.text(), text);
            }
        }));
        input.set_text("7");
    }

    #[test]
    fn clear_hooks_detaches_everything() {
        let input = HiddenTextInput::new();
        input.on_edit_proposal(Rc::new(|_current: &str, _proposal: &EditProposal| false));
        input.on_text_changed(Rc::new(|_text: &str| {}));
        assert!(input.has_hooks());

        input.clear_hooks();
        assert!(!input.has_hooks());
        assert!(input.propose_edit(EditProposal::insert_at(0, "x")));
    }

    #[test]
    fn release_hooks_only_detaches_owner() {
        let input = HiddenTextInput::new();
        let first: TextChangedHook = Rc::new(|_text: &str| {});
        let second: TextChangedHook = Rc::new(|_text: &str| {});
        input.on_text_changed(first.clone());
        input.on_text_changed(second.clone());

        input.release_hooks(&first);
        assert!(input.has_hooks());

        input.release_hooks(&second);
        assert!(!input.has_hooks());
    }

    #[test]
    fn focus_and_edit_menu_flags() {
        let input = HiddenTextInput::new();
        assert!(!input.is_focused());
        assert!(input.edit_menu_enabled());

        input.focus();
        input.set_edit_menu_enabled(false);
        assert!(input.is_focused());
        assert!(!input.edit_menu_enabled());

        input.blur();
        assert!(!input.is_focused());
    }
}
