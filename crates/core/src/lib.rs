//! Domain layer for the HR backend: identifiers, role and status
//! enumerations, workflow transition tables, and validation rules. No I/O.

pub mod equipment;
pub mod error;
pub mod gathering;
pub mod leave;
pub mod meeting;
pub mod payroll;
pub mod review;
pub mod roles;
pub mod status;
pub mod types;
pub mod workflow;
