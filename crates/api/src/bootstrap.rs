//! First-run provisioning of an administrator account.
//!
//! Roles are only assignable by an admin, so a fresh database needs one
//! admin seeded from the environment before anyone can be promoted.

use hrm_core::error::CoreError;
use hrm_core::roles::UserRole;
use hrm_core::types::DbId;
use hrm_db::models::admin::CreateAdmin;
use hrm_db::models::user::CreateUser;
use hrm_db::repositories::{AdminRepo, EmployeeRepo, UserRepo};
use hrm_db::DbPool;

use crate::auth::password::{hash_password, validate_password};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::normalize_email;

/// Position recorded on the seeded admin row.
pub const BOOTSTRAP_POSITION: &str = "Administrator";

/// Credentials for the seeded admin, read from `BOOTSTRAP_ADMIN_*`.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl BootstrapAdmin {
    /// `None` unless both `BOOTSTRAP_ADMIN_EMAIL` and
    /// `BOOTSTRAP_ADMIN_PASSWORD` are set. `BOOTSTRAP_ADMIN_NAME` defaults
    /// to `Administrator`.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?;
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        let full_name =
            std::env::var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|_| BOOTSTRAP_POSITION.into());
        Some(Self {
            email,
            password,
            full_name,
        })
    }
}

/// Create the bootstrap admin when no user holds the admin role yet.
///
/// An existing account with the same email is promoted instead of
/// duplicated, unless it already owns an employee record (409). Returns the
/// user id when something was provisioned.
pub async fn ensure_bootstrap_admin(
    pool: &DbPool,
    admin: &BootstrapAdmin,
) -> AppResult<Option<DbId>> {
    if UserRepo::any_with_role(pool, UserRole::Admin.id()).await? {
        return Ok(None);
    }

    let email = normalize_email(&admin.email);
    let user = match UserRepo::find_by_email(pool, &email).await? {
        Some(existing) => {
            if EmployeeRepo::find_by_user_id(pool, existing.id).await?.is_some() {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Bootstrap account {email} already has an employee record"
                ))));
            }
            existing
        }
        None => {
            validate_password(&admin.password)?;
            let password_hash = hash_password(&admin.password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            UserRepo::create(
                pool,
                &CreateUser {
                    full_name: admin.full_name.clone(),
                    email,
                    password_hash,
                },
            )
            .await?
        }
    };

    UserRepo::set_role(pool, user.id, UserRole::Admin.id()).await?;
    UserRepo::set_verified(pool, user.id).await?;

    if AdminRepo::find_by_user_id(pool, user.id).await?.is_none() {
        AdminRepo::create(
            pool,
            &CreateAdmin {
                user_id: user.id,
                position: BOOTSTRAP_POSITION.to_string(),
                department: None,
                phone: None,
            },
        )
        .await?;
    }

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin provisioned");
    Ok(Some(user.id))
}
