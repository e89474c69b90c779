pub mod active_set;
pub mod admin;
pub mod error;
pub mod question;
pub mod scoring;

pub use error::QuizError;
