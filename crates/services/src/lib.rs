#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod practice;
pub mod progress_service;
pub mod query_service;
pub mod question_service;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, PracticeError, ProgressServiceError, QueryServiceError,
    QuestionServiceError,
};
pub use practice::{
    PracticeAction, PracticeLoopService, PracticeOrder, PracticeSelection, PracticeSession,
    PracticeStep, PracticeSummary,
};
pub use progress_service::ProgressService;
pub use query_service::QueryService;
pub use question_service::QuestionService;
