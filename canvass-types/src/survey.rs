use serde::{Deserialize, Serialize};

use crate::{Question, QuestionId, SurveyId, SurveyVersion};

/// The top-level structure containing all questions and metadata for a survey.
///
/// Presentation-agnostic: the same definition drives the sequential
/// response collector and the analytics summaries. Question order is
/// significant (it is the presentation order) and question ids are unique.
///
/// A survey with zero questions is a valid value to store and edit; only
/// starting a session against it is rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    id: SurveyId,

    /// Title shown to respondents before the questions.
    pub title: String,

    /// Longer description shown alongside the title.
    pub description: String,

    /// Where to send the respondent after completion, if anywhere.
    pub redirect_url: Option<String>,

    /// Version tag stamped onto responses, bumped on live edits.
    version: SurveyVersion,

    questions: Vec<Question>,
}

impl SurveyDefinition {
    /// Create a new empty survey with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SurveyId::generate(),
            title: title.into(),
            description: String::new(),
            redirect_url: None,
            version: SurveyVersion::initial(),
            questions: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the post-completion redirect URL.
    #[must_use]
    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    /// Get the survey id.
    pub fn id(&self) -> SurveyId {
        self.id
    }

    /// Get the current version tag.
    pub fn version(&self) -> SurveyVersion {
        self.version
    }

    /// Bump the version tag.
    ///
    /// Call when editing a survey that already has stored responses, so
    /// analytics can tell old answers from new ones.
    pub fn bump_version(&mut self) {
        self.version = self.version.bumped();
    }

    /// Get the questions, in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get a question by id.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == *id)
    }

    /// Get the position of a question by id.
    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == *id)
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check if the survey has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Mutable access to the question list.
    ///
    /// The caller is responsible for keeping ids unique; the builder layer
    /// in the engine crate preserves this for every edit it performs.
    pub fn questions_mut(&mut self) -> &mut Vec<Question> {
        &mut self.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionKind;

    #[test]
    fn lookup_by_id() {
        let mut survey = SurveyDefinition::new("Feedback");
        let id = QuestionId::generate();
        survey
            .questions_mut()
            .push(Question::new(id, "Any comments?", QuestionKind::Text));

        assert_eq!(survey.len(), 1);
        assert_eq!(survey.position(&id), Some(0));
        assert_eq!(survey.question(&id).map(Question::prompt), Some("Any comments?"));
        assert_eq!(survey.question(&QuestionId::generate()), None);
    }

    #[test]
    fn empty_survey_is_a_valid_value() {
        let survey = SurveyDefinition::new("Untitled survey");
        assert!(survey.is_empty());
        assert_eq!(survey.version(), SurveyVersion::initial());
    }
}
