#![forbid(unsafe_code)]

pub mod error;
pub mod identity;
pub mod progress_service;
pub mod quiz;

pub use vocab_core::Clock;

pub use error::SessionError;
pub use identity::{AnonymousIdentity, IdentityProvider, StaticIdentity};
pub use progress_service::{ProgressService, QuizHistoryListItem};
pub use quiz::{
    Advance, AnswerFeedback, PhaseKind, QuestionBuilder, QuizLoopService, QuizPhase,
    QuizProgress, QuizSession,
};
