use serde::{Deserialize, Serialize};

/// A constraint a question definition violates.
///
/// Produced by [`Question::violations`](crate::Question::violations), which
/// collects every violated constraint instead of failing on the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ConstraintViolation {
    /// The prompt text is empty (or whitespace only).
    #[error("question prompt must not be empty")]
    EmptyPrompt,

    /// A choice question has no options left to choose from.
    #[error("choice question must have at least one option")]
    NoOptions,

    /// An option label is empty (or whitespace only).
    #[error("option {index} has an empty label")]
    BlankOption { index: usize },
}

/// Error rejecting an answer value for a question.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    /// The value's type tag does not match the question kind.
    #[error("expected a {expected} answer, got {actual}")]
    ShapeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A rating outside the question's declared scale.
    #[error("rating {value} is outside the scale {min}..={max}")]
    RatingOutOfScale { value: u8, min: u8, max: u8 },

    /// A choice or checkbox value not present in the question's options.
    #[error("'{0}' is not one of the question's options")]
    UnknownOption(String),
}
