//! The response collector: one respondent, one survey, one pass.
//!
//! A session is an explicit state machine,
//! `Intro → Asking(i) → Submitting → Complete`, with `Aborted` reachable
//! from any non-terminal state. Its entire state is the survey, the
//! current index, the draft answers, and the status — no hidden globals —
//! so a transition sequence can be replayed and asserted in tests without
//! any rendering harness.
//!
//! The machine suspends at input boundaries (it simply returns to the
//! caller) and performs I/O exactly once, inside [`Session::submit`].

use canvass_types::{
    AnswerValue, Answers, Question, QuestionId, Response, ResponseId, SurveyDefinition,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::store::{StoreError, SurveyStore};

/// Where a session currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum SessionState {
    /// Before the first question; the survey title/description screen.
    Intro,

    /// Holding a draft answer for `questions[index]`.
    Asking { index: usize },

    /// All questions passed; ready to write the response.
    Submitting,

    /// The response is stored. Terminal.
    Complete,

    /// The respondent abandoned the session. Terminal, nothing persisted.
    Aborted,
}

impl SessionState {
    /// Check if this is a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Aborted)
    }
}

/// Error type for session transitions.
///
/// Every error leaves the session state unchanged; the caller re-prompts
/// or retries as appropriate.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The survey has no questions; there is nothing to take.
    #[error("survey has no questions")]
    EmptySurvey,

    /// The current question is required and holds no answer.
    #[error("question {0} is required and has no answer")]
    MissingRequiredAnswer(QuestionId),

    /// The answer value was rejected (wrong shape, out of range, unknown option).
    #[error(transparent)]
    Answer(#[from] canvass_types::AnswerError),

    /// The session is not in a state that accepts this transition.
    #[error("session is {state:?}, not accepting input")]
    NotAccepting { state: SessionState },

    /// `submit` was called outside the `Submitting` state.
    #[error("session is {state:?}, not ready to submit")]
    NotSubmitting { state: SessionState },

    /// The store rejected the response write.
    ///
    /// Retriable: the session is back on the last question; advance and
    /// submit again when the caller decides to retry. Never retried
    /// automatically, to avoid duplicate writes.
    #[error("submission failed")]
    SubmissionFailed(#[source] StoreError),
}

/// Progress through a session, for progress bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Zero-based index of the current question (clamped to the last
    /// question once past it).
    pub index: usize,
    /// Total number of questions.
    pub total: usize,
}

/// One respondent's in-progress pass through a survey.
#[derive(Clone, Debug)]
pub struct Session {
    survey: SurveyDefinition,
    index: usize,
    answers: Answers,
    state: SessionState,
    metadata: serde_json::Value,
}

impl Session {
    /// Start a session over a survey.
    ///
    /// The survey must have at least one question; an empty survey is a
    /// valid value to store but cannot be taken.
    pub fn start(survey: SurveyDefinition) -> Result<Self, SessionError> {
        if survey.is_empty() {
            return Err(SessionError::EmptySurvey);
        }
        debug!(survey = %survey.id(), questions = survey.len(), "session started");
        Ok(Self {
            survey,
            index: 0,
            answers: Answers::new(),
            state: SessionState::Intro,
            metadata: serde_json::Value::Null,
        })
    }

    /// Attach free-form client context to the eventual response.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Get the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the survey this session runs over.
    pub fn survey(&self) -> &SurveyDefinition {
        &self.survey
    }

    /// Get the draft answers collected so far.
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// The question currently being asked, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::Asking { index } => self.survey.questions().get(index),
            _ => None,
        }
    }

    /// Progress through the questions.
    pub fn progress(&self) -> Progress {
        Progress {
            index: self.index.min(self.survey.len().saturating_sub(1)),
            total: self.survey.len(),
        }
    }

    /// The survey's redirect URL, exposed once the session is complete.
    pub fn redirect_url(&self) -> Option<&str> {
        match self.state {
            SessionState::Complete => self.survey.redirect_url.as_deref(),
            _ => None,
        }
    }

    /// Store an answer for the current question.
    ///
    /// The value is validated against the question (type tag, rating
    /// bounds, declared options) and rejected synchronously on mismatch,
    /// leaving the state unchanged. Single-shot questions (yes/no, rating,
    /// multiple choice) auto-advance; text and checkbox answers stay put so
    /// the respondent can revise before moving on.
    pub fn answer(&mut self, value: AnswerValue) -> Result<SessionState, SessionError> {
        let SessionState::Asking { index } = self.state else {
            return Err(SessionError::NotAccepting { state: self.state });
        };
        let question = &self.survey.questions()[index];
        question.check_answer(&value)?;
        let auto_advance = question.kind().is_single_shot();
        self.answers.insert(question.id(), value);
        debug!(question = %question.id(), index, "answer stored");
        if auto_advance {
            return self.advance();
        }
        Ok(self.state)
    }

    /// Move forward: `Intro → Asking(0)`, `Asking(i) → Asking(i+1)`, and
    /// from the last question `Asking(N-1) → Submitting`.
    ///
    /// Refused with [`SessionError::MissingRequiredAnswer`] when the
    /// current question is required and holds no filled-in answer; the
    /// index does not change.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        match self.state {
            SessionState::Intro => self.enter(0),
            SessionState::Asking { index } => {
                let question = &self.survey.questions()[index];
                if question.is_required() && !self.answers.has_value(&question.id()) {
                    return Err(SessionError::MissingRequiredAnswer(question.id()));
                }
                if index + 1 == self.survey.len() {
                    self.state = SessionState::Submitting;
                } else {
                    self.enter(index + 1);
                }
            }
            state => return Err(SessionError::NotAccepting { state }),
        }
        debug!(state = ?self.state, "advanced");
        Ok(self.state)
    }

    /// Move onto a question, seeding the draft slot for the kinds that
    /// accumulate input (text, checkbox) if none exists yet.
    fn enter(&mut self, index: usize) {
        self.index = index;
        self.state = SessionState::Asking { index };
        let question = &self.survey.questions()[index];
        if !self.answers.contains(&question.id())
            && let Some(draft) = question.kind().draft_answer()
        {
            self.answers.insert(question.id(), draft);
        }
    }

    /// Move backward one question.
    ///
    /// Clamped, never an error: at the first question (and in `Intro`)
    /// this is a no-op. From `Submitting` it returns to the last question
    /// for revision.
    pub fn retreat(&mut self) -> SessionState {
        match self.state {
            SessionState::Asking { index } if index > 0 => {
                self.index = index - 1;
                self.state = SessionState::Asking { index: index - 1 };
            }
            SessionState::Submitting => {
                self.index = self.survey.len() - 1;
                self.state = SessionState::Asking { index: self.index };
            }
            _ => {}
        }
        self.state
    }

    /// Write the completed response through the store.
    ///
    /// Valid only in `Submitting`. Issues exactly one `append_response`
    /// per call: on success the session is `Complete` and the stored id is
    /// returned; on failure the session drops back to the last question
    /// and the error is retriable by an explicit advance-and-submit. A
    /// `Complete` state only ever follows a confirmed successful write.
    pub fn submit(&mut self, store: &mut dyn SurveyStore) -> Result<ResponseId, SessionError> {
        if self.state != SessionState::Submitting {
            return Err(SessionError::NotSubmitting { state: self.state });
        }
        // Unfilled drafts (empty text, empty checkbox set) are working
        // state, not answers; the stored record carries only what the
        // respondent actually gave.
        let mut answers = Answers::new();
        for (id, value) in &self.answers {
            if value.is_filled() {
                answers.insert(*id, value.clone());
            }
        }
        let response = Response::new(
            self.survey.id(),
            self.survey.version(),
            answers,
            self.metadata.clone(),
        );
        match store.append_response(response) {
            Ok(id) => {
                self.state = SessionState::Complete;
                debug!(response = %id, survey = %self.survey.id(), "response stored");
                Ok(id)
            }
            Err(err) => {
                self.index = self.survey.len() - 1;
                self.state = SessionState::Asking { index: self.index };
                warn!(survey = %self.survey.id(), error = %err, "submission failed");
                Err(SessionError::SubmissionFailed(err))
            }
        }
    }

    /// Abandon the session. Nothing is persisted.
    ///
    /// A no-op in terminal states: a completed session stays completed.
    pub fn abort(&mut self) -> SessionState {
        if !self.state.is_terminal() {
            debug!(survey = %self.survey.id(), state = ?self.state, "session aborted");
            self.state = SessionState::Aborted;
        }
        self.state
    }
}
