//! Role-based authorization.

use aaharsetu_common::{AppError, AppResult};
use aaharsetu_db::entities::{user, user::Role};

/// Check that a request carries a session whose user holds one of `allowed`.
///
/// A missing session yields `Unauthorized` before the role is considered.
pub fn authorize<'a>(user: Option<&'a user::Model>, allowed: &[Role]) -> AppResult<&'a user::Model> {
    let user = user.ok_or(AppError::Unauthorized)?;

    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(AppError::Forbidden(format!(
            "Role {} may not access this resource",
            user.role
        )))
    }
}
