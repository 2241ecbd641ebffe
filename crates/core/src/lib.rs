#![forbid(unsafe_code)]

//! Domain model for the interview practice store.
//!
//! Everything in this crate is pure data: no I/O, no async. Storage adapters
//! and services build on these types.

pub mod model;

pub use model::{
    Category, CategoryFilter, CategoryStats, ParseIdError, ProgressMap, Question, QuestionDraft,
    QuestionFilter, QuestionId, QuestionPatch, Stats, TrackedQuestion,
};
