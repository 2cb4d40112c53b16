//! # canvass
//!
//! A survey engine. Backend-agnostic: no rendering, no HTTP, no storage
//! format — those live in collaborator crates behind narrow seams.
//!
//! The engine has four parts:
//!
//! - [`builder`] — pure edits over a [`SurveyDefinition`]: add, remove and
//!   reorder questions, manage choice options. Every operation returns a
//!   fresh value and leaves its input untouched, so undo/redo is a stack
//!   of survey values.
//! - [`session`] — the response collector, an explicit state machine
//!   (`Intro → Asking(i) → Submitting → Complete`) driving one respondent
//!   through one survey, validating answers as they arrive.
//! - [`analytics`] — pure aggregation of a response set into per-question
//!   breakdowns, completion rate, and Net Promoter Score.
//! - [`store`] — the persistence contract, with an in-memory
//!   implementation in [`memory`] for tests and embedding.
//!
//! ## Example
//!
//! ```
//! use canvass::builder::{self, QuestionType};
//! use canvass::memory::MemoryStore;
//! use canvass::session::Session;
//! use canvass::store::SurveyStore;
//! use canvass::{AnswerValue, SurveyDefinition};
//!
//! let survey = SurveyDefinition::new("Customer feedback");
//! let survey = builder::add_question(&survey, QuestionType::Rating);
//!
//! let mut store = MemoryStore::new();
//! let mut session = Session::start(survey.clone()).unwrap();
//! session.advance().unwrap();
//! session.answer(AnswerValue::Rating(5)).unwrap();
//! session.submit(&mut store).unwrap();
//!
//! let responses = store.responses(&survey.id()).unwrap();
//! let summary = canvass::analytics::aggregate(&survey, &responses);
//! # let _ = summary;
//! ```

pub use canvass_types::{
    AnswerError, AnswerValue, Answers, ConstraintViolation, Question, QuestionId, QuestionKind,
    RatingScale, Response, ResponseId, SurveyDefinition, SurveyId, SurveyVersion,
};

pub mod analytics;
pub mod builder;
pub mod memory;
pub mod session;
pub mod store;

pub use memory::MemoryStore;
pub use session::{Session, SessionError, SessionState};
pub use store::{StoreError, SurveyStore};
