//! Configuration for a code entry field.

use crate::error::CodeFieldError;
use codefield_graphics::{Color, Dp};

/// Default number of boxes.
pub const DEFAULT_CHARACTER_LIMIT: usize = 5;

/// When the completion observer is told about a full code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Every synchronization that sees a full-length text notifies, even if
    /// the code was already reported.
    #[default]
    EveryFullSync,
    /// Only the transition into full notifies. Dropping below the limit or
    /// reconfiguring re-arms the notification.
    OncePerFill,
}

/// Options for a [`CodeEntryField`](crate::CodeEntryField).
///
/// Fixed once the field is built; `flicker_enabled` can also be chosen per
/// [`configure`](crate::CodeEntryField::configure) call.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeFieldOptions {
    /// Number of boxes, and the maximum code length.
    pub character_limit: usize,
    /// Horizontal gap between boxes and between underline segments.
    pub spacing: Dp,
    /// Height of the underline row.
    pub underline_height: Dp,
    /// Vertical gap between the box row and the underline row.
    pub underline_margin: Dp,
    /// Color of segments that are not the entry position.
    pub idle_color: Color,
    /// Color of the segment at the entry position.
    pub active_color: Color,
    /// Blink the active segment like a caret.
    pub flicker_enabled: bool,
    pub completion_policy: CompletionPolicy,
}

impl Default for CodeFieldOptions {
    fn default() -> Self {
        Self {
            character_limit: DEFAULT_CHARACTER_LIMIT,
            spacing: Dp(10.0),
            underline_height: Dp(3.0),
            underline_margin: Dp(4.0),
            idle_color: Color::DARK_GRAY,
            active_color: Color::BLUE,
            flicker_enabled: true,
            completion_policy: CompletionPolicy::default(),
        }
    }
}

impl CodeFieldOptions {
    pub fn with_character_limit(mut self, character_limit: usize) -> Self {
        self.character_limit = character_limit;
        self
    }

    pub fn with_spacing(mut self, spacing: impl Into<Dp>) -> Self {
        self.spacing = spacing.into();
        self
    }

    pub fn with_underline_height(mut self, height: impl Into<Dp>) -> Self {
        self.underline_height = height.into();
        self
    }

    pub fn with_underline_margin(mut self, margin: impl Into<Dp>) -> Self {
        self.underline_margin = margin.into();
        self
    }

    pub fn with_idle_color(mut self, color: Color) -> Self {
        self.idle_color = color;
        self
    }

    pub fn with_active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    pub fn with_flicker(mut self, enabled: bool) -> Self {
        self.flicker_enabled = enabled;
        self
    }

    pub fn with_completion_policy(mut self, policy: CompletionPolicy) -> Self {
        self.completion_policy = policy;
        self
    }

    /// Checks the invariants a field relies on.
    pub fn validate(&self) -> Result<(), CodeFieldError> {
        if self.character_limit == 0 {
            return Err(CodeFieldError::ZeroCharacterLimit);
        }
        for (name, distance) in [
            ("spacing", self.spacing),
            ("underline height", self.underline_height),
            ("underline margin", self.underline_margin),
        ] {
            if !distance.is_valid_distance() {
                return Err(CodeFieldError::InvalidDistance {
                    name,
                    value: distance.0,
                });
            }
        }
        Ok(())
    }
}
