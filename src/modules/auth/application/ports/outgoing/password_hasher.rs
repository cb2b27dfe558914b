use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed")]
    HashFailed,

    #[error("Password verification failed")]
    VerifyFailed,

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Background task failed")]
    TaskFailed,
}

/// Hashing runs off the async executor; implementations must not block.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;

    /// `Ok(false)` for a wrong password, `Err` only for unusable hashes.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
