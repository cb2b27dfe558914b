use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::auth::application::domain::email::normalize_email;
use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, UserQuery, UserRepository,
};

// ========================= Login Request =========================
/// Validated login request
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Result<Self, LoginRequestError> {
        let email = normalize_email(email).map_err(|_| LoginRequestError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ========================= Login Response =========================
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is inactive")]
    InactiveAccount,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase {
    query: Arc<dyn UserQuery>,
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl LoginUserUseCase {
    pub fn new(
        query: Arc<dyn UserQuery>,
        repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl ILoginUserUseCase for LoginUserUseCase {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        let valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;
        if !valid {
            return Err(LoginError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(LoginError::InactiveAccount);
        }

        let access_token = self
            .token_provider
            .generate_access_token(user.id.value(), user.is_staff)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        if let Err(e) = self.repository.record_login(user.id).await {
            warn!(user_id = %user.id, error = %e, "Failed to record last login");
        }

        Ok(LoginUserResponse {
            access_token,
            expires_in: self.token_provider.access_token_expiry(),
            user,
        })
    }
}
