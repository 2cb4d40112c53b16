use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Answers, ResponseId, SurveyId, SurveyVersion};

/// One respondent's completed pass through a survey.
///
/// Responses are append-only: written exactly once when a session submits,
/// never mutated afterwards. The version stamp records which shape of the
/// question set the answers were given against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    id: ResponseId,
    survey_id: SurveyId,
    survey_version: SurveyVersion,
    answers: Answers,
    submitted_at: DateTime<Utc>,

    /// Free-form client context (user agent, referrer, ...). Carried
    /// through verbatim; the engine never interprets it.
    #[serde(default)]
    metadata: serde_json::Value,
}

impl Response {
    /// Create a new response record stamped with the current time.
    pub fn new(
        survey_id: SurveyId,
        survey_version: SurveyVersion,
        answers: Answers,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: ResponseId::generate(),
            survey_id,
            survey_version,
            answers,
            submitted_at: Utc::now(),
            metadata,
        }
    }

    /// Get the response id.
    pub fn id(&self) -> ResponseId {
        self.id
    }

    /// Get the id of the survey this answers.
    pub fn survey_id(&self) -> SurveyId {
        self.survey_id
    }

    /// Get the survey version the answers were given against.
    pub fn survey_version(&self) -> SurveyVersion {
        self.survey_version
    }

    /// Get the collected answers.
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Get the submission timestamp.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Get the client-supplied metadata.
    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }
}
