use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a question within a survey.
///
/// Opaque; generated by the builder when a question is added. Uniqueness
/// is guaranteed per survey (and in practice globally, being a UUID).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(Uuid);

/// Identifier of a survey definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyId(Uuid);

/// Identifier of a stored response record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseId(Uuid);

macro_rules! uuid_id {
    ($name:ident) => {
        impl $name {
            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

uuid_id!(QuestionId);
uuid_id!(SurveyId);
uuid_id!(ResponseId);

/// Version tag of a survey definition.
///
/// Stamped onto every response so that analytics over historical data can
/// tell which shape of the question set an answer was given against.
/// Authors bump it when editing a survey that already has responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurveyVersion(u32);

impl SurveyVersion {
    /// The version a freshly created survey starts at.
    pub fn initial() -> Self {
        Self(0)
    }

    /// The next version after this one.
    #[must_use]
    pub fn bumped(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SurveyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(QuestionId::generate(), QuestionId::generate());
    }

    #[test]
    fn version_bumps_monotonically() {
        let v = SurveyVersion::initial();
        assert!(v.bumped() > v);
        assert_eq!(v.bumped().to_string(), "v1");
    }
}
