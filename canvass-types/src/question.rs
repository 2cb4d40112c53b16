use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AnswerError, AnswerValue, ConstraintViolation, QuestionId};

/// A single question in a survey.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the survey.
    id: QuestionId,

    /// The prompt text shown to the respondent.
    prompt: String,

    /// Whether the respondent must answer before advancing.
    required: bool,

    /// The kind of question (determines answer shape).
    kind: QuestionKind,
}

impl Question {
    /// Create a new question.
    pub fn new(id: QuestionId, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            required: true,
            kind,
        }
    }

    /// Mark this question optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Get the question id.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Set the prompt text.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Whether this question must be answered.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Set whether this question must be answered.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get a mutable reference to the question kind.
    pub fn kind_mut(&mut self) -> &mut QuestionKind {
        &mut self.kind
    }

    /// Collect every constraint this question violates.
    ///
    /// An empty list means the question is valid. Never fails: a broken
    /// question is a reportable value, not an error.
    pub fn violations(&self) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();
        if self.prompt.trim().is_empty() {
            violations.push(ConstraintViolation::EmptyPrompt);
        }
        if let Some(options) = self.kind.options() {
            if options.is_empty() {
                violations.push(ConstraintViolation::NoOptions);
            }
            for (index, option) in options.iter().enumerate() {
                if option.trim().is_empty() {
                    violations.push(ConstraintViolation::BlankOption { index });
                }
            }
        }
        violations
    }

    /// Check whether `value` is an acceptable answer to this question.
    ///
    /// Verifies the type tag, rating bounds, and (for choice kinds) that
    /// every referenced option is currently declared on the question.
    pub fn check_answer(&self, value: &AnswerValue) -> Result<(), AnswerError> {
        let mismatch = |expected: &'static str| AnswerError::ShapeMismatch {
            expected,
            actual: value.type_name(),
        };
        match (&self.kind, value) {
            (QuestionKind::Text, AnswerValue::Text(_)) => Ok(()),
            (QuestionKind::YesNo, AnswerValue::YesNo(_)) => Ok(()),
            (QuestionKind::Rating { scale }, AnswerValue::Rating(rating)) => {
                if scale.contains(*rating) {
                    Ok(())
                } else {
                    Err(AnswerError::RatingOutOfScale {
                        value: *rating,
                        min: scale.min(),
                        max: scale.max(),
                    })
                }
            }
            (QuestionKind::MultipleChoice { options }, AnswerValue::Choice(chosen)) => {
                if options.contains(chosen) {
                    Ok(())
                } else {
                    Err(AnswerError::UnknownOption(chosen.clone()))
                }
            }
            (QuestionKind::Checkbox { options }, AnswerValue::Checked(checked)) => {
                match checked.iter().find(|c| !options.contains(c)) {
                    Some(unknown) => Err(AnswerError::UnknownOption(unknown.clone())),
                    None => Ok(()),
                }
            }
            (kind, _) => Err(mismatch(kind.answer_type_name())),
        }
    }
}

/// The kind of question, determining the answer shape.
///
/// A closed union: options exist only on the choice kinds, and a rating's
/// scale is part of its type, so ill-formed combinations (a text question
/// with options, a rating with a stray scale) cannot be represented.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Free text input.
    Text,

    /// Yes/no confirmation.
    YesNo,

    /// A rating on a fixed scale.
    Rating { scale: RatingScale },

    /// Select exactly one of the options.
    MultipleChoice { options: Vec<String> },

    /// Select any subset of the options.
    Checkbox { options: Vec<String> },
}

impl QuestionKind {
    /// The declared options, for the kinds that have them.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::MultipleChoice { options } | Self::Checkbox { options } => Some(options),
            Self::Text | Self::YesNo | Self::Rating { .. } => None,
        }
    }

    /// Mutable access to the declared options, for the kinds that have them.
    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::MultipleChoice { options } | Self::Checkbox { options } => Some(options),
            Self::Text | Self::YesNo | Self::Rating { .. } => None,
        }
    }

    /// Check if this kind carries an option list.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::MultipleChoice { .. } | Self::Checkbox { .. })
    }

    /// Whether selecting a value completes the question in one action.
    ///
    /// Single-shot kinds auto-advance on answer; text and checkbox answers
    /// stay editable until the respondent explicitly moves on.
    pub fn is_single_shot(&self) -> bool {
        matches!(self, Self::YesNo | Self::Rating { .. } | Self::MultipleChoice { .. })
    }

    /// The initial draft value for an answer slot, if the kind has one.
    ///
    /// Kinds that accumulate input start from an empty draft; single-shot
    /// kinds start with no value at all.
    pub fn draft_answer(&self) -> Option<AnswerValue> {
        match self {
            Self::Text => Some(AnswerValue::Text(String::new())),
            Self::Checkbox { .. } => Some(AnswerValue::Checked(BTreeSet::new())),
            Self::YesNo | Self::Rating { .. } | Self::MultipleChoice { .. } => None,
        }
    }

    /// The answer type name this kind expects, for error messages.
    pub fn answer_type_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::YesNo => "YesNo",
            Self::Rating { .. } => "Rating",
            Self::MultipleChoice { .. } => "Choice",
            Self::Checkbox { .. } => "Checked",
        }
    }
}

/// The scale a rating question is answered on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingScale {
    /// The standard satisfaction scale, 1 to 5.
    #[default]
    OneToFive,

    /// The recommendation-likelihood scale, 0 to 10, used for NPS.
    ZeroToTen,
}

impl RatingScale {
    /// Lowest acceptable rating.
    pub fn min(self) -> u8 {
        match self {
            Self::OneToFive => 1,
            Self::ZeroToTen => 0,
        }
    }

    /// Highest acceptable rating.
    pub fn max(self) -> u8 {
        match self {
            Self::OneToFive => 5,
            Self::ZeroToTen => 10,
        }
    }

    /// Check whether a rating lies on this scale.
    pub fn contains(self, value: u8) -> bool {
        (self.min()..=self.max()).contains(&value)
    }

    /// All values on this scale, in ascending order.
    pub fn values(self) -> impl Iterator<Item = u8> {
        self.min()..=self.max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(options: &[&str]) -> Question {
        Question::new(
            QuestionId::generate(),
            "Pick one",
            QuestionKind::MultipleChoice {
                options: options.iter().map(ToString::to_string).collect(),
            },
        )
    }

    #[test]
    fn valid_question_has_no_violations() {
        let question = choice(&["A", "B"]);
        assert!(question.violations().is_empty());
    }

    #[test]
    fn empty_prompt_and_empty_options_are_both_reported() {
        let mut question = choice(&[]);
        question.set_prompt("  ");
        assert_eq!(
            question.violations(),
            vec![
                ConstraintViolation::EmptyPrompt,
                ConstraintViolation::NoOptions,
            ]
        );
    }

    #[test]
    fn blank_option_labels_are_reported_with_their_index() {
        let question = choice(&["A", " ", "C"]);
        assert_eq!(
            question.violations(),
            vec![ConstraintViolation::BlankOption { index: 1 }]
        );
    }

    #[test]
    fn answer_shape_mismatch_is_rejected() {
        let question = Question::new(
            QuestionId::generate(),
            "Rate us",
            QuestionKind::Rating {
                scale: RatingScale::OneToFive,
            },
        );
        let err = question.check_answer(&AnswerValue::Text("great".into()));
        assert_eq!(
            err,
            Err(AnswerError::ShapeMismatch {
                expected: "Rating",
                actual: "Text",
            })
        );
    }

    #[test]
    fn rating_bounds_follow_the_scale() {
        let question = Question::new(
            QuestionId::generate(),
            "Rate us",
            QuestionKind::Rating {
                scale: RatingScale::OneToFive,
            },
        );
        assert!(question.check_answer(&AnswerValue::Rating(5)).is_ok());
        assert_eq!(
            question.check_answer(&AnswerValue::Rating(0)),
            Err(AnswerError::RatingOutOfScale {
                value: 0,
                min: 1,
                max: 5,
            })
        );

        let nps = Question::new(
            QuestionId::generate(),
            "Would you recommend us?",
            QuestionKind::Rating {
                scale: RatingScale::ZeroToTen,
            },
        );
        assert!(nps.check_answer(&AnswerValue::Rating(0)).is_ok());
        assert!(nps.check_answer(&AnswerValue::Rating(10)).is_ok());
        assert!(nps.check_answer(&AnswerValue::Rating(11)).is_err());
    }

    #[test]
    fn choice_answers_must_reference_declared_options() {
        let question = choice(&["A", "B"]);
        assert!(question.check_answer(&AnswerValue::Choice("B".into())).is_ok());
        assert_eq!(
            question.check_answer(&AnswerValue::Choice("Z".into())),
            Err(AnswerError::UnknownOption("Z".into()))
        );
    }

    #[test]
    fn checkbox_answers_must_be_a_subset_of_options() {
        let question = Question::new(
            QuestionId::generate(),
            "Pick any",
            QuestionKind::Checkbox {
                options: vec!["A".into(), "B".into()],
            },
        );
        let ok: AnswerValue = ["A".to_string(), "B".to_string()].into_iter().collect();
        assert!(question.check_answer(&ok).is_ok());

        let bad: AnswerValue = ["A".to_string(), "Z".to_string()].into_iter().collect();
        assert_eq!(
            question.check_answer(&bad),
            Err(AnswerError::UnknownOption("Z".into()))
        );
    }
}
