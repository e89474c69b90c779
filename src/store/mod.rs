pub mod schema;
pub mod words;
