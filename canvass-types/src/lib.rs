//! Core types for the canvass survey engine.
//!
//! This crate provides the foundational types for defining surveys:
//! - `SurveyDefinition` - The top-level survey structure
//! - `Question` and `QuestionKind` - Individual questions and their types
//! - `AnswerValue` and `Answers` - Collected data, keyed by question id
//! - `Response` - One respondent's completed, append-only record

mod ids;
pub use ids::{QuestionId, ResponseId, SurveyId, SurveyVersion};

mod answer;
pub use answer::{Answers, AnswerValue};

mod question;
pub use question::{Question, QuestionKind, RatingScale};

mod survey;
pub use survey::SurveyDefinition;

mod response;
pub use response::Response;

mod error;
pub use error::{AnswerError, ConstraintViolation};
