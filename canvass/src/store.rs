//! The persistence contract the engine writes through.
//!
//! Storage representation is a collaborator concern: Firestore, SQL, a
//! flat file — the engine only ever speaks this trait. Tests use the
//! in-memory implementation in [`crate::memory`].

use canvass_types::{Response, ResponseId, SurveyDefinition, SurveyId};

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No survey with the given id exists.
    ///
    /// Terminal for a respondent session: there is nothing to take and no
    /// partial state to clean up.
    #[error("survey {0} not found")]
    SurveyNotFound(SurveyId),

    /// The backing store failed or is unreachable.
    ///
    /// Transient: recoverable by an explicit caller-triggered retry. The
    /// engine itself never retries, to avoid duplicate response writes.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),
}

impl StoreError {
    /// Create an `Unavailable` error from any error type.
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        Self::Unavailable(err.into())
    }

    /// Check if this error is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Trait for persistence backends.
///
/// Semantics the engine relies on:
/// - `save_survey` is create-or-full-replace; concurrent author edits
///   resolve by last write wins, the store never merges.
/// - `append_response` is append-only; a stored response is never updated
///   in place, so no per-response locking is needed.
/// - `responses` returns a consistent read snapshot: responses arriving
///   concurrently may or may not be included, but a partially written
///   record never is.
pub trait SurveyStore {
    /// Fetch a survey definition by id.
    fn survey(&self, id: &SurveyId) -> Result<SurveyDefinition, StoreError>;

    /// Create or fully replace a survey definition, returning its id.
    fn save_survey(&mut self, survey: SurveyDefinition) -> Result<SurveyId, StoreError>;

    /// Append one completed response, returning its id.
    fn append_response(&mut self, response: Response) -> Result<ResponseId, StoreError>;

    /// List every stored response for a survey.
    fn responses(&self, survey_id: &SurveyId) -> Result<Vec<Response>, StoreError>;
}
