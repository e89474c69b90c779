pub mod menu;
pub mod question_card;
pub mod score_bar;
pub mod session_sidebar;
pub mod word_list;
