pub mod analyze;
pub mod auth;
pub mod check_ins;
pub mod dashboard;
pub mod food_logs;
pub mod health;
