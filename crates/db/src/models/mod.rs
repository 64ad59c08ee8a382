pub mod admin;
pub mod calendar_token;
pub mod employee;
pub mod equipment;
pub mod leave;
pub mod meeting;
pub mod pay_cycle;
pub mod performance_review;
pub mod session;
pub mod user;
