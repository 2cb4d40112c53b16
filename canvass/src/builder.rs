//! Pure edits over a survey definition.
//!
//! Every operation takes the survey by reference and returns a fresh,
//! edited value; on error the input is untouched. Value semantics keep
//! undo/redo trivial (a stack of survey values) and make concurrent author
//! edits safe to resolve by last write wins at the store.

use canvass_types::{
    ConstraintViolation, Question, QuestionId, QuestionKind, RatingScale, SurveyDefinition,
};

/// Error type for survey edits.
///
/// All of these are caller-correctable: the edit is rejected, the survey
/// is unchanged, and the message carries enough context to fix the input.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EditError {
    /// The referenced question does not exist in this survey.
    #[error("question {0} not found in survey")]
    QuestionNotFound(QuestionId),

    /// The requested order is not a permutation of the current id set.
    #[error("new order must be a permutation of the current {expected} question ids, got {got} ids")]
    InvalidReorder { expected: usize, got: usize },

    /// A choice question must always retain at least one option.
    #[error("cannot remove the last option of question {0}")]
    MinimumOptionViolation(QuestionId),

    /// Option operations only apply to multiple-choice and checkbox questions.
    #[error("question {0} has no options to edit")]
    NotAChoiceQuestion(QuestionId),

    /// Scale changes only apply to rating questions.
    #[error("question {0} is not a rating question")]
    NotARatingQuestion(QuestionId),

    /// The option index is out of range.
    #[error("option index {index} out of range (question has {len} options)")]
    OptionIndexOutOfRange { index: usize, len: usize },

    /// The edit would leave the question violating its constraints.
    #[error("edit rejected: {}", format_violations(.0))]
    InvalidQuestion(Vec<ConstraintViolation>),
}

fn format_violations(violations: &[ConstraintViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The kind of question to add, without its configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionType {
    Text,
    MultipleChoice,
    YesNo,
    Rating,
    Checkbox,
}

impl QuestionType {
    fn default_kind(self) -> QuestionKind {
        match self {
            Self::Text => QuestionKind::Text,
            Self::YesNo => QuestionKind::YesNo,
            Self::Rating => QuestionKind::Rating {
                scale: RatingScale::OneToFive,
            },
            Self::MultipleChoice => QuestionKind::MultipleChoice {
                options: vec!["Option 1".to_string()],
            },
            Self::Checkbox => QuestionKind::Checkbox {
                options: vec!["Option 1".to_string()],
            },
        }
    }
}

/// Append a new question of the given type.
///
/// The question gets a fresh unique id, a placeholder prompt, is required,
/// and (for choice types) one seeded option, ready for the author to edit.
/// Ratings start on the 1-5 scale; see [`set_rating_scale`] for NPS-style
/// 0-10 questions.
#[must_use]
pub fn add_question(survey: &SurveyDefinition, question_type: QuestionType) -> SurveyDefinition {
    let mut edited = survey.clone();
    let question = Question::new(
        QuestionId::generate(),
        "New question",
        question_type.default_kind(),
    );
    edited.questions_mut().push(question);
    edited
}

/// Remove a question by id.
pub fn remove_question(
    survey: &SurveyDefinition,
    id: QuestionId,
) -> Result<SurveyDefinition, EditError> {
    let index = survey
        .position(&id)
        .ok_or(EditError::QuestionNotFound(id))?;
    let mut edited = survey.clone();
    edited.questions_mut().remove(index);
    Ok(edited)
}

/// Reorder the questions to the given id sequence.
///
/// `new_order` must be a permutation of the current id set: same length,
/// every id present exactly once. Anything else is rejected and the survey
/// is left unchanged. Where the permutation came from (drag and drop, up/
/// down buttons) is the caller's business.
pub fn reorder_questions(
    survey: &SurveyDefinition,
    new_order: &[QuestionId],
) -> Result<SurveyDefinition, EditError> {
    let mismatch = || EditError::InvalidReorder {
        expected: survey.len(),
        got: new_order.len(),
    };
    if new_order.len() != survey.len() {
        return Err(mismatch());
    }
    let mut reordered: Vec<Question> = Vec::with_capacity(new_order.len());
    for id in new_order {
        // A duplicated id means some other id is missing.
        if reordered.iter().any(|q| q.id() == *id) {
            return Err(mismatch());
        }
        let question = survey.question(id).cloned().ok_or_else(mismatch)?;
        reordered.push(question);
    }
    let mut edited = survey.clone();
    *edited.questions_mut() = reordered;
    Ok(edited)
}

/// Append a new option to a choice question.
///
/// The option is labeled `Option N` where `N` is the new option count.
pub fn add_option(
    survey: &SurveyDefinition,
    question_id: QuestionId,
) -> Result<SurveyDefinition, EditError> {
    edit_options(survey, question_id, |options, _| {
        options.push(format!("Option {}", options.len() + 1));
        Ok(())
    })
}

/// Remove an option from a choice question by index.
///
/// Removing the last remaining option is rejected: a choice question must
/// always retain at least one option.
pub fn remove_option(
    survey: &SurveyDefinition,
    question_id: QuestionId,
    index: usize,
) -> Result<SurveyDefinition, EditError> {
    edit_options(survey, question_id, |options, id| {
        if index >= options.len() {
            return Err(EditError::OptionIndexOutOfRange {
                index,
                len: options.len(),
            });
        }
        if options.len() == 1 {
            return Err(EditError::MinimumOptionViolation(id));
        }
        options.remove(index);
        Ok(())
    })
}

/// Rename an option of a choice question.
pub fn rename_option(
    survey: &SurveyDefinition,
    question_id: QuestionId,
    index: usize,
    label: impl Into<String>,
) -> Result<SurveyDefinition, EditError> {
    let label = label.into();
    let edited = edit_options(survey, question_id, |options, _| {
        if index >= options.len() {
            return Err(EditError::OptionIndexOutOfRange {
                index,
                len: options.len(),
            });
        }
        options[index] = label.clone();
        Ok(())
    })?;
    committed(edited, question_id)
}

/// Set the prompt text of a question.
pub fn update_prompt(
    survey: &SurveyDefinition,
    question_id: QuestionId,
    prompt: impl Into<String>,
) -> Result<SurveyDefinition, EditError> {
    let prompt = prompt.into();
    let edited = edit_question(survey, question_id, |question| {
        question.set_prompt(prompt.clone());
        Ok(())
    })?;
    committed(edited, question_id)
}

/// Set whether a question must be answered.
pub fn set_required(
    survey: &SurveyDefinition,
    question_id: QuestionId,
    required: bool,
) -> Result<SurveyDefinition, EditError> {
    edit_question(survey, question_id, |question| {
        question.set_required(required);
        Ok(())
    })
}

/// Switch a rating question between the 1-5 and 0-10 (NPS) scales.
pub fn set_rating_scale(
    survey: &SurveyDefinition,
    question_id: QuestionId,
    scale: RatingScale,
) -> Result<SurveyDefinition, EditError> {
    edit_question(survey, question_id, |question| match question.kind_mut() {
        QuestionKind::Rating { scale: current } => {
            *current = scale;
            Ok(())
        }
        _ => Err(EditError::NotARatingQuestion(question_id)),
    })
}

/// Apply an edit to one question, cloning the survey first.
fn edit_question(
    survey: &SurveyDefinition,
    question_id: QuestionId,
    edit: impl FnOnce(&mut Question) -> Result<(), EditError>,
) -> Result<SurveyDefinition, EditError> {
    let index = survey
        .position(&question_id)
        .ok_or(EditError::QuestionNotFound(question_id))?;
    let mut edited = survey.clone();
    edit(&mut edited.questions_mut()[index])?;
    Ok(edited)
}

/// Apply an edit to one question's option list.
fn edit_options(
    survey: &SurveyDefinition,
    question_id: QuestionId,
    edit: impl FnOnce(&mut Vec<String>, QuestionId) -> Result<(), EditError>,
) -> Result<SurveyDefinition, EditError> {
    edit_question(survey, question_id, |question| {
        let options = question
            .kind_mut()
            .options_mut()
            .ok_or(EditError::NotAChoiceQuestion(question_id))?;
        edit(options, question_id)
    })
}

/// Reject the edited survey if the touched question now violates its
/// constraints; the caller keeps the pre-edit value either way.
fn committed(
    edited: SurveyDefinition,
    question_id: QuestionId,
) -> Result<SurveyDefinition, EditError> {
    let violations = edited
        .question(&question_id)
        .map(Question::violations)
        .unwrap_or_default();
    if violations.is_empty() {
        Ok(edited)
    } else {
        Err(EditError::InvalidQuestion(violations))
    }
}
