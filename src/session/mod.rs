pub mod quiz;
pub mod timer;
