//! Authentication service.
//!
//! Registration, login, and JWT issuance. Tokens carry the user id in
//! `sub` and expire after the configured TTL.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use reporter_common::{AppError, AppResult, Config};
use reporter_db::{
    entities::{user, Role},
    repositories::{ClassRepository, FacultyRepository, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// JWT claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Public view of a user, safe to return to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub faculty_id: i32,
    pub is_class_rep: bool,
    pub class_id: Option<i32>,
    pub profile_image: Option<String>,
}

impl From<user::Model> for UserView {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            faculty_id: u.faculty_id,
            is_class_rep: u.is_class_rep,
            class_id: u.class_id,
            profile_image: u.profile_image,
        }
    }
}

/// Token plus the user it belongs to.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

/// Input for registering a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub role: Role,

    pub faculty_id: i32,

    #[serde(default)]
    pub is_class_rep: bool,

    pub class_id: Option<i32>,
}

/// Input for logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    faculty_repo: FacultyRepository,
    class_repo: ClassRepository,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(
        user_repo: UserRepository,
        faculty_repo: FacultyRepository,
        class_repo: ClassRepository,
        config: &Config,
    ) -> Self {
        Self {
            user_repo,
            faculty_repo,
            class_repo,
            encoding_key: EncodingKey::from_secret(config.auth.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.auth.jwt_secret.as_bytes()),
            token_ttl: Duration::hours(config.auth.token_ttl_hours),
        }
    }

    /// Register a new user and return a signed token.
    ///
    /// A duplicate email surfaces as a conflict from the unique index
    /// rather than a pre-insert existence check.
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthResponse> {
        input.validate()?;

        if self.faculty_repo.find_by_id(input.faculty_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Faculty {}",
                input.faculty_id
            )));
        }

        if let Some(class_id) = input.class_id {
            if self.class_repo.find_by_id(class_id).await?.is_none() {
                return Err(AppError::NotFound(format!("Class {class_id}")));
            }
        }

        let password_hash = hash_password(&input.password)?;

        let created = self
            .user_repo
            .create(user::ActiveModel {
                email: Set(input.email.to_lowercase()),
                password_hash: Set(password_hash),
                name: Set(input.name),
                role: Set(input.role),
                faculty_id: Set(input.faculty_id),
                is_class_rep: Set(input.is_class_rep),
                class_id: Set(input.class_id),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await?;

        let token = self.issue_token(created.id)?;
        Ok(AuthResponse {
            token,
            user: created.into(),
        })
    }

    /// Verify credentials and return a signed token.
    ///
    /// Unknown email and wrong password produce the same message, so a
    /// caller cannot probe which emails are registered.
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthResponse> {
        input.validate()?;

        let invalid = || AppError::BadRequest("Invalid email or password".to_string());

        let user = self
            .user_repo
            .find_by_email(&input.email.to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(invalid());
        }

        let token = self.issue_token(user.id)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Sign a token for a user id.
    pub fn issue_token(&self, user_id: i32) -> AppResult<String> {
        let claims = Claims {
            sub: user_id,
            exp: (Utc::now() + self.token_ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a token and load the user it names.
    pub async fn authenticate(&self, token: &str) -> AppResult<user::Model> {
        let claims = self.verify_token(token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))
    }

    /// Verify a token's signature and expiry.
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}

/// Hash a password with argon2.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
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
    use crate::services::test_support::{test_config, test_user};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> AuthService {
        AuthService::new(
            UserRepository::new(db.clone()),
            FacultyRepository::new(db.clone()),
            ClassRepository::new(db),
            &test_config(),
        )
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn token_round_trip() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);

        let token = svc.issue_token(42).unwrap();
        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);

        match svc.verify_token("not-a-token") {
            Err(AppError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_hides_which_credential_failed() {
        // Unknown email
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<reporter_db::entities::user::Model>::new()])
                .into_connection(),
        );
        let svc = service(db);
        let err = svc
            .login(LoginInput {
                email: "nobody@campus.edu".to_string(),
                password: "whatever1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Invalid email or password"));

        // Known email, wrong password
        let mut user = test_user(1, Role::Student);
        user.password_hash = hash_password("right-password").unwrap();
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let svc = service(db);
        let err = svc
            .login(LoginInput {
                email: "student1@campus.edu".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Invalid email or password"));
    }

    #[tokio::test]
    async fn register_rejects_missing_faculty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<reporter_db::entities::faculty::Model>::new()])
                .into_connection(),
        );
        let svc = service(db);

        let err = svc
            .register(RegisterInput {
                email: "new@campus.edu".to_string(),
                password: "longenough".to_string(),
                name: "New User".to_string(),
                role: Role::Student,
                faculty_id: 99,
                is_class_rep: false,
                class_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn register_issues_token_for_created_user() {
        let faculty = reporter_db::entities::faculty::Model {
            id: 1,
            name: "Faculty of ICT".to_string(),
        };
        let created = test_user(7, Role::Lecturer);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[faculty]])
                .append_query_results([[created]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 7,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let svc = service(db);

        let response = svc
            .register(RegisterInput {
                email: "lect@campus.edu".to_string(),
                password: "longenough".to_string(),
                name: "Lecturer".to_string(),
                role: Role::Lecturer,
                faculty_id: 1,
                is_class_rep: false,
                class_id: None,
            })
            .await
            .unwrap();

        assert_eq!(response.user.id, 7);
        let claims = svc.verify_token(&response.token).unwrap();
        assert_eq!(claims.sub, 7);
    }
}
