use std::env;

use crate::shared::config::ConfigError;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // seconds
}

impl JwtConfig {
    fn parse_expiry(key: &'static str, default: i64) -> Result<i64, ConfigError> {
        match env::var(key) {
            Ok(raw) => raw.parse::<i64>().map_err(|_| ConfigError::Invalid {
                key,
                reason: format!("'{raw}' is not a number of seconds"),
            }),
            Err(_) => Ok(default),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        // HS256 wants at least 32 bytes of key material
        if secret_key.len() < 32 {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: "must be at least 32 characters long".to_string(),
            });
        }

        let access_token_expiry = Self::parse_expiry("JWT_ACCESS_EXPIRY", 1800)?;
        if access_token_expiry <= 0 || access_token_expiry > 86400 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                reason: "must be between 1 and 86400 seconds".to_string(),
            });
        }

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "portfolio".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}
