//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table. The wire form of every
//! status is its lowercase label.

use crate::error::CoreError;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant in seed-data order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database status ID.
            pub fn id(self) -> $crate::status::StatusId {
                self as $crate::status::StatusId
            }

            /// Lowercase label used on the wire and in the lookup table.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Map a stored lookup ID back to the enum.
            pub fn from_id(id: $crate::status::StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Parse a label (case-insensitive) into the enum.
            pub fn parse(value: &str) -> Result<Self, $crate::error::CoreError> {
                let normalized = value.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $( $label => Ok($name::$variant), )+
                    _ => Err($crate::status::invalid_value($kind, value, Self::labels())),
                }
            }

            fn labels() -> &'static [&'static str] {
                &[$($label),+]
            }
        }

        impl From<$name> for $crate::status::StatusId {
            fn from(value: $name) -> Self {
                value as $crate::status::StatusId
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }
    };
}

pub(crate) use define_status_enum;

/// Build the validation error for an unknown enumerant.
pub(crate) fn invalid_value(kind: &str, value: &str, allowed: &[&str]) -> CoreError {
    CoreError::Validation(format!(
        "Invalid {kind} '{value}'. Must be one of: {}",
        allowed.join(", ")
    ))
}

/// Resolve a stored status ID, treating an unknown ID as corrupt data.
pub fn resolve<T>(id: StatusId, from_id: fn(StatusId) -> Option<T>, kind: &str) -> Result<T, CoreError> {
    from_id(id).ok_or_else(|| CoreError::Internal(format!("Unknown {kind} id {id} in database")))
}

define_status_enum! {
    /// Performance review lifecycle.
    ReviewStatus("performance review status") {
        Pending = 1 => "pending",
        Upcoming = 2 => "upcoming",
        Completed = 3 => "completed",
    }
}

define_status_enum! {
    /// Employee-initiated meeting request lifecycle.
    MeetingStatus("meeting status") {
        Requested = 1 => "requested",
        Confirmed = 2 => "confirmed",
        Rejected = 3 => "rejected",
    }
}

define_status_enum! {
    /// Leave request lifecycle.
    LeaveStatus("leave status") {
        Pending = 1 => "pending",
        Approved = 2 => "approved",
        Rejected = 3 => "rejected",
    }
}
