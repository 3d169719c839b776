mod ids;
mod mistake;
mod mode;
mod pool;
mod progress;
mod question;
mod session;
mod settings;
mod word;

pub use ids::{ParseIdError, UserId, WordId};
pub use mistake::MistakeRecord;
pub use mode::{ParseModeError, QuizMode};
pub use pool::{PoolError, WordPool};
pub use progress::UserProgress;
pub use question::Question;
pub use session::{SessionResult, SessionResultError, accuracy_percent};
pub use settings::{QuizSettings, SettingsError};
pub use word::{WordEntry, WordError};
