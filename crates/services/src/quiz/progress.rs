/// Aggregated view of quiz progress, useful for a "question N of M" header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the question on screen, or the last answered one.
    pub question_number: u32,
    pub max_questions: u32,
    pub answered: u32,
    pub correct: u32,
    pub is_finished: bool,
}
