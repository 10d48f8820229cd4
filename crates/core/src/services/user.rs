//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use aaharsetu_common::{AppError, AppResult, IdGenerator};
use aaharsetu_db::{
    entities::{user, user::Role},
    repositories::UserRepository,
};
use chrono::Utc;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

/// User service for registration, credentials and lookups.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for registering a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 256, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    /// One of donor, ngo, volunteer, admin
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Input for logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Publicly listable donor details. The email stays private.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorSummary {
    pub id: String,
    pub name: String,
}

impl From<user::Model> for DonorSummary {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
        }
    }
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user with a hashed credential.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        let role: Role = input
            .role
            .parse()
            .map_err(|_| AppError::Validation("Invalid role".to_string()))?;

        let email = input.email.trim().to_lowercase();
        if self.user_repo.email_exists(&email).await? {
            return Err(AppError::Validation("User already exists".to_string()));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name.trim().to_string()),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(Utc::now().into()),
        };

        let user = self.user_repo.create(model).await?;
        info!(user_id = %user.id, role = %user.role, "Registered user");

        Ok(user)
    }

    /// Check an email and password pair.
    ///
    /// Unknown emails fail with `NoSuchUser`, wrong passwords with
    /// `BadCredential`.
    pub async fn authenticate(&self, input: &LoginInput) -> AppResult<user::Model> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_email(input.email.trim())
            .await?
            .ok_or_else(|| AppError::NoSuchUser(input.email.trim().to_string()))?;

        if !verify_password(&input.password, &user.password_hash)? {
            debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::BadCredential);
        }

        Ok(user)
    }

    /// Every donor account, reduced to its public fields.
    pub async fn list_donors(&self) -> AppResult<Vec<DonorSummary>> {
        Ok(self
            .user_repo
            .find_by_role(Role::Donor)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn create_test_user(id: &str, email: &str, password: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: "Asha".to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            role: Role::Donor,
            created_at: Utc::now().into(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, sea_orm::Value> {
        BTreeMap::from([("num_items", sea_orm::Value::from(n))])
    }

    fn register_input(email: &str, role: &str) -> RegisterInput {
        RegisterInput {
            name: "Asha".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_hash_password() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("password123", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let hash1 = hash_password("password123").unwrap();
        let hash2 = hash_password("password123").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[tokio::test]
    async fn test_register_invalid_role() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db));

        let result = service.register(register_input("a@example.com", "chef")).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Invalid role"));
    }

    #[tokio::test]
    async fn test_register_missing_name() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db));

        let mut input = register_input("a@example.com", "donor");
        input.name = String::new();

        assert!(matches!(
            service.register(input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[count_row(1)]])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let result = service.register(register_input("A@Example.com", "donor")).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "User already exists"));
    }

    #[tokio::test]
    async fn test_list_donors_hides_email() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", "a@example.com", "password123")]])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let donors = service.list_donors().await.unwrap();
        let json = serde_json::to_value(&donors).unwrap();

        assert_eq!(json[0]["id"], "u1");
        assert_eq!(json[0]["name"], "Asha");
        assert!(json[0].get("email").is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let result = service
            .authenticate(&LoginInput {
                email: "ghost@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::NoSuchUser(_))));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let user = create_test_user("u1", "a@example.com", "password123");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let result = service
            .authenticate(&LoginInput {
                email: "a@example.com".to_string(),
                password: "nope".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadCredential)));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let user = create_test_user("u1", "a@example.com", "password123");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let found = service
            .authenticate(&LoginInput {
                email: "A@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(found.id, "u1");
    }
}
