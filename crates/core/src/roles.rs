//! User roles.
//!
//! IDs must match the seed data in `20260301000002_create_users.sql`.

use crate::status::define_status_enum;

define_status_enum! {
    /// The role a user holds. Determines which extension row (Employee or
    /// Admin) the user may own.
    UserRole("role") {
        Unassigned = 1 => "unassigned",
        Employee = 2 => "employee",
        Admin = 3 => "admin",
    }
}

impl UserRole {
    /// Whether a user with this role may still complete registration by
    /// creating an extension row, given whether one already exists.
    pub fn registration_available(self, has_extension_row: bool) -> bool {
        self == UserRole::Unassigned && !has_extension_row
    }
}
