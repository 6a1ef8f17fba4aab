use thiserror::Error;

/// Reasons a set of [`CodeFieldOptions`](crate::CodeFieldOptions) cannot
/// build a field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodeFieldError {
    #[error("character limit must be at least 1")]
    ZeroCharacterLimit,

    #[error("{name} must be a finite, non-negative distance (got {value})")]
    InvalidDistance { name: &'static str, value: f32 },
}
