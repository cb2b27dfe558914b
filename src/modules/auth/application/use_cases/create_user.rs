use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::email::{local_part, normalize_email};
use crate::auth::application::domain::entities::{User, UserRole};
use crate::auth::application::ports::outgoing::{
    NewUser, PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;
const MAX_USERNAME_LEN: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    /// Derived from the email's local part when absent.
    pub username: Option<String>,
    pub name: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateUserError {
    #[error("{0}")]
    InvalidEmail(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("{0}")]
    InvalidUsername(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, input: CreateUserInput) -> Result<User, CreateUserError>;
}

/// User factory: validates and normalizes the email, hashes the password,
/// derives username and slug, then persists.
#[derive(Clone)]
pub struct CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<Q, R> CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }

    fn validate_password(password: &str) -> Result<(), CreateUserError> {
        let len = password.chars().count();
        if len < MIN_PASSWORD_LEN {
            return Err(CreateUserError::InvalidPassword(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if len > MAX_PASSWORD_LEN {
            return Err(CreateUserError::InvalidPassword(format!(
                "Password must not exceed {MAX_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }

    fn validate_username(username: &str) -> Result<String, CreateUserError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CreateUserError::InvalidUsername(
                "Username cannot be empty".to_string(),
            ));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(CreateUserError::InvalidUsername(format!(
                "Username must not exceed {MAX_USERNAME_LEN} characters"
            )));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '+'))
        {
            return Err(CreateUserError::InvalidUsername(
                "Username may only contain letters, digits and _ . - +".to_string(),
            ));
        }
        Ok(username.to_string())
    }

    async fn username_taken(&self, username: &str) -> Result<bool, CreateUserError> {
        self.query
            .username_exists(username)
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))
    }

    /// Email local part, disambiguated with a random suffix while taken.
    async fn derive_username(&self, email: &str) -> Result<String, CreateUserError> {
        let base: String = local_part(email)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '+'))
            .take(MAX_USERNAME_LEN - 5)
            .collect();
        let base = if base.is_empty() {
            "user".to_string()
        } else {
            base
        };

        if !self.username_taken(&base).await? {
            return Ok(base);
        }

        for _ in 0..5 {
            let suffix: u16 = rand::thread_rng().gen_range(1000..10000);
            let candidate = format!("{base}{suffix}");
            if !self.username_taken(&candidate).await? {
                return Ok(candidate);
            }
        }

        let token = Uuid::new_v4().simple().to_string();
        let stem: String = base.chars().take(MAX_USERNAME_LEN - 9).collect();
        Ok(format!("{stem}-{}", &token[..8]))
    }
}

#[async_trait]
impl<Q, R> ICreateUserUseCase for CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, input: CreateUserInput) -> Result<User, CreateUserError> {
        // 1️⃣ Validate input
        let email = normalize_email(&input.email)
            .map_err(|e| CreateUserError::InvalidEmail(e.to_string()))?;
        Self::validate_password(&input.password)?;

        // 2️⃣ Email must be free
        let existing = self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(CreateUserError::UserAlreadyExists);
        }

        // 3️⃣ Username: explicit one must be free, otherwise derive
        let username = match input.username.as_deref() {
            Some(requested) if !requested.trim().is_empty() => {
                let username = Self::validate_username(requested)?;
                if self.username_taken(&username).await? {
                    return Err(CreateUserError::UserAlreadyExists);
                }
                username
            }
            _ => self.derive_username(&email).await?,
        };

        // 4️⃣ Hash password
        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        // 5️⃣ Persist
        let new_user = NewUser {
            email,
            username,
            password_hash,
            slug: Uuid::new_v4().to_string(),
            name: input
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            role: input.role,
        };

        self.repository
            .create_user(new_user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => CreateUserError::UserAlreadyExists,
                other => CreateUserError::RepositoryError(other.to_string()),
            })
    }
}
