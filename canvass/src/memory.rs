//! In-memory store for tests and embedded use.

use std::collections::HashMap;

use canvass_types::{Response, ResponseId, SurveyDefinition, SurveyId};

use crate::store::{StoreError, SurveyStore};

/// A map-backed [`SurveyStore`].
///
/// Also keeps the session-start tally the completion-rate metric needs:
/// the collector itself never talks to a store before submission, so the
/// embedding code calls [`record_session_start`](Self::record_session_start)
/// when it hands a survey to a respondent.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    surveys: HashMap<SurveyId, SurveyDefinition>,
    responses: HashMap<SurveyId, Vec<Response>>,
    sessions_started: HashMap<SurveyId, usize>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that a respondent session was started for a survey.
    pub fn record_session_start(&mut self, survey_id: SurveyId) {
        *self.sessions_started.entry(survey_id).or_default() += 1;
    }

    /// How many sessions were started for a survey, if any were recorded.
    pub fn sessions_started(&self, survey_id: &SurveyId) -> Option<usize> {
        self.sessions_started.get(survey_id).copied()
    }
}

impl SurveyStore for MemoryStore {
    fn survey(&self, id: &SurveyId) -> Result<SurveyDefinition, StoreError> {
        self.surveys
            .get(id)
            .cloned()
            .ok_or(StoreError::SurveyNotFound(*id))
    }

    fn save_survey(&mut self, survey: SurveyDefinition) -> Result<SurveyId, StoreError> {
        let id = survey.id();
        self.surveys.insert(id, survey);
        Ok(id)
    }

    fn append_response(&mut self, response: Response) -> Result<ResponseId, StoreError> {
        let id = response.id();
        self.responses
            .entry(response.survey_id())
            .or_default()
            .push(response);
        Ok(id)
    }

    fn responses(&self, survey_id: &SurveyId) -> Result<Vec<Response>, StoreError> {
        Ok(self.responses.get(survey_id).cloned().unwrap_or_default())
    }
}
