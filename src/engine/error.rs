use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Could not load words from {origin}: {reason}")]
    DataLoad { origin: String, reason: String },

    #[error("Need at least {required} words to build a question, this set has {found}")]
    InsufficientData { found: usize, required: usize },

    #[error("Pick a lesson first")]
    MissingSelection,

    #[error("No lesson named '{0}'")]
    UnknownLesson(String),

    #[error("Every candidate word sits next to an identical entry")]
    NoEligibleTarget,

    #[error("Only {found} of {wanted} wrong answers could be found for this question")]
    PartialOptions { found: usize, wanted: usize },
}

impl QuizError {
    /// Load failures block the quiz; everything else is shown inline.
    pub fn is_blocking(&self) -> bool {
        matches!(self, QuizError::DataLoad { .. })
    }
}
