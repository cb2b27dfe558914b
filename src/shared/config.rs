use actix_web::cookie::Key;
use std::env;

use crate::auth::adapter::outgoing::jwt::JwtConfig;
use crate::auth::adapter::outgoing::security::Argon2Settings;
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::shared::crud::SiteMeta;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Public URL prefixes for uploaded and bundled files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    pub media_url: String,
    pub static_url: String,
}

impl Default for MediaUrls {
    fn default() -> Self {
        Self {
            media_url: "/media/".to_string(),
            static_url: "/static/".to_string(),
        }
    }
}

impl MediaUrls {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            media_url: env::var("MEDIA_URL").unwrap_or(defaults.media_url),
            static_url: env::var("STATIC_URL").unwrap_or(defaults.static_url),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub rust_env: String,
    pub jwt: JwtConfig,
    pub session_key: Key,
    pub site: SiteMeta,
    pub media_urls: MediaUrls,
    pub upload_policy: UploadPolicy,
    pub argon2: Argon2Settings,
}

/// Loads `.env.{RUST_ENV}` when present, otherwise `.env`.
pub fn load_dotenv() -> String {
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    let env_file = format!(".env.{rust_env}");
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    rust_env
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        let database_url = required("DATABASE_URL")?;
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                reason: format!("'{raw}' is not a valid port"),
            })?,
            Err(_) => 8080,
        };

        let session_key = session_key(&rust_env)?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt: JwtConfig::from_env()?,
            session_key,
            site: SiteMeta::from_env(),
            media_urls: MediaUrls::from_env(),
            upload_policy: UploadPolicy::from_env(),
            argon2: Argon2Settings::from_env(),
            rust_env,
        })
    }

    pub fn is_production(&self) -> bool {
        self.rust_env == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

/// Production refuses to start without a usable `SESSION_SECRET`; other
/// environments fall back to a random key, which drops flash messages on
/// restart.
fn session_key(rust_env: &str) -> Result<Key, ConfigError> {
    let secret = env::var("SESSION_SECRET").unwrap_or_default();

    match Key::try_from(secret.as_bytes()) {
        Ok(key) => Ok(key),
        Err(_) if rust_env == "production" => Err(ConfigError::Invalid {
            key: "SESSION_SECRET",
            reason: "must be at least 64 bytes".to_string(),
        }),
        Err(_) => {
            tracing::warn!(
                environment = %rust_env,
                "SESSION_SECRET missing or shorter than 64 bytes; using a random session key"
            );
            Ok(Key::generate())
        }
    }
}
