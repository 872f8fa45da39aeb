pub mod food_log;
pub mod mood_entry;
pub mod user;
