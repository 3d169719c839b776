mod builder;
mod progress;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use builder::QuestionBuilder;
pub use progress::QuizProgress;
pub use session::{Advance, AnswerFeedback, PhaseKind, QuizPhase, QuizSession};
pub use workflow::QuizLoopService;
