//! One repository per table. Each is a zero-sized struct whose associated
//! functions take a `&PgPool` and return `sqlx::Error` on failure.
//!
//! Lookups return `Option` and deletes return `bool` so handlers decide
//! how "not found" maps to HTTP.

pub mod admin_repo;
pub mod calendar_token_repo;
pub mod employee_repo;
pub mod equipment_category_repo;
pub mod equipment_repo;
pub mod leave_balance_repo;
pub mod leave_request_repo;
pub mod leave_type_repo;
pub mod meeting_repo;
pub mod pay_cycle_repo;
pub mod performance_review_repo;
pub mod session_repo;
pub mod user_repo;

pub use admin_repo::AdminRepo;
pub use calendar_token_repo::CalendarTokenRepo;
pub use employee_repo::EmployeeRepo;
pub use equipment_category_repo::EquipmentCategoryRepo;
pub use equipment_repo::EquipmentRepo;
pub use leave_balance_repo::LeaveBalanceRepo;
pub use leave_request_repo::LeaveRequestRepo;
pub use leave_type_repo::LeaveTypeRepo;
pub use meeting_repo::MeetingRepo;
pub use pay_cycle_repo::PayCycleRepo;
pub use performance_review_repo::PerformanceReviewRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
