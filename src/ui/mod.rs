pub mod components;
pub mod layout;
pub mod password_input;
pub mod theme;
