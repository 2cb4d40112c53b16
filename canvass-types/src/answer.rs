use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::QuestionId;

/// A single answer value given by a respondent.
///
/// Type-tagged so that a value's shape always identifies the question kind
/// it answers; mismatched shapes are rejected at the session boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum AnswerValue {
    /// Free text (from text questions).
    Text(String),

    /// A yes/no confirmation.
    YesNo(bool),

    /// A rating on the question's declared scale.
    Rating(u8),

    /// The selected option of a multiple-choice question.
    Choice(String),

    /// The selected options of a checkbox question.
    Checked(BTreeSet<String>),
}

impl AnswerValue {
    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a yes/no bool.
    pub fn as_yes_no(&self) -> Option<bool> {
        match self {
            Self::YesNo(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as a rating.
    pub fn as_rating(&self) -> Option<u8> {
        match self {
            Self::Rating(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to get this value as a chosen option.
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a set of checked options.
    pub fn as_checked(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Checked(set) => Some(set),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::YesNo(_) => "YesNo",
            Self::Rating(_) => "Rating",
            Self::Choice(_) => "Choice",
            Self::Checked(_) => "Checked",
        }
    }

    /// Check whether this value actually carries an answer.
    ///
    /// An empty text or an empty checkbox set is a draft the respondent
    /// never filled in; it does not satisfy a required question.
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            Self::Checked(set) => !set.is_empty(),
            Self::YesNo(_) | Self::Rating(_) | Self::Choice(_) => true,
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::YesNo(b)
    }
}

impl From<u8> for AnswerValue {
    fn from(rating: u8) -> Self {
        Self::Rating(rating)
    }
}

impl From<BTreeSet<String>> for AnswerValue {
    fn from(set: BTreeSet<String>) -> Self {
        Self::Checked(set)
    }
}

impl FromIterator<String> for AnswerValue {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::Checked(iter.into_iter().collect())
    }
}

/// Collected answers of one session, keyed by question id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Answers {
    values: HashMap<QuestionId, AnswerValue>,
}

impl Answers {
    /// Create a new empty answers collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert (or replace) the answer for a question.
    pub fn insert(&mut self, id: QuestionId, value: impl Into<AnswerValue>) {
        self.values.insert(id, value.into());
    }

    /// Get the answer for a question.
    pub fn get(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    /// Check if an answer exists for a question.
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.values.contains_key(id)
    }

    /// Remove the answer for a question.
    pub fn remove(&mut self, id: &QuestionId) -> Option<AnswerValue> {
        self.values.remove(id)
    }

    /// Check if a question has a filled-in answer.
    ///
    /// Returns `false` if the answer is missing OR if it is an empty draft
    /// (empty text, empty checkbox set). This is what "answered" means for
    /// required questions.
    pub fn has_value(&self, id: &QuestionId) -> bool {
        self.values.get(id).is_some_and(AnswerValue::is_filled)
    }

    /// Get an iterator over all id-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl IntoIterator for Answers {
    type Item = (QuestionId, AnswerValue);
    type IntoIter = std::collections::hash_map::IntoIter<QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a QuestionId, &'a AnswerValue);
    type IntoIter = std::collections::hash_map::Iter<'a, QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let id = QuestionId::generate();
        let mut answers = Answers::new();
        answers.insert(id, "blue");

        assert_eq!(answers.get(&id).and_then(AnswerValue::as_text), Some("blue"));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn empty_drafts_do_not_count_as_values() {
        let text_id = QuestionId::generate();
        let boxes_id = QuestionId::generate();
        let mut answers = Answers::new();
        answers.insert(text_id, "   ");
        answers.insert(boxes_id, AnswerValue::Checked(BTreeSet::new()));

        assert!(answers.contains(&text_id));
        assert!(!answers.has_value(&text_id));
        assert!(!answers.has_value(&boxes_id));
    }

    #[test]
    fn single_shot_values_always_count() {
        let id = QuestionId::generate();
        let mut answers = Answers::new();
        answers.insert(id, AnswerValue::Rating(3));

        assert!(answers.has_value(&id));
    }
}
