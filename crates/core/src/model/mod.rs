mod category;
mod filter;
mod ids;
mod progress;
mod question;
mod stats;

pub use category::{Category, DEFAULT_CATEGORY};
pub use filter::{ALL_CATEGORIES, CategoryFilter, QuestionFilter};
pub use ids::{ParseIdError, QuestionId};
pub use progress::ProgressMap;
pub use question::{Question, QuestionDraft, QuestionPatch, TrackedQuestion, next_question_id};
pub use stats::{CategoryStats, Stats, completion_percentage};
