pub mod admins;
pub mod auth;
pub mod calendar;
pub mod employees;
pub mod equipment;
pub mod gatherings;
pub mod leave;
pub mod meetings;
pub mod pay_cycles;
pub mod performance_reviews;
pub mod users;
