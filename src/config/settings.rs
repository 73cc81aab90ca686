use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::errors::ConfigError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://newshub.db?mode=rwc";
const JWT_SECRET_MIN_LENGTH: usize = 32;
const PASSWORD_PEPPER_MIN_LENGTH: usize = 16;

/// Application settings loaded once at startup
///
/// Secrets are required; every other value has a default.
#[derive(Clone)]
pub struct AppSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    jwt_secret: String,
    password_pepper: String,
    login_delay: Duration,
    max_login_attempts: u32,
    lockout_duration: Duration,
    otp_ttl: Duration,
    session_ttl: Duration,
}

impl AppSettings {
    /// Load settings through the given environment provider
    ///
    /// # Errors
    /// Returns `ConfigError` when a secret is missing or too short, or when a
    /// numeric setting fails to parse.
    pub fn from_env_provider(env: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, ConfigError> {
        let database_url = env
            .get_non_blank("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let server_host = env.get_non_blank("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = parse_or(env.as_ref(), "PORT", 3000u16)?;
        if server_port == 0 {
            return Err(ConfigError::invalid_format("PORT", "port in 1-65535", "0"));
        }

        let jwt_secret = load_secret(env.as_ref(), "JWT_SECRET", JWT_SECRET_MIN_LENGTH)?;
        let password_pepper = load_secret(env.as_ref(), "PASSWORD_PEPPER", PASSWORD_PEPPER_MIN_LENGTH)?;

        let login_delay_ms = parse_or(env.as_ref(), "LOGIN_DELAY_MS", 1000u64)?;
        let max_login_attempts = parse_or(env.as_ref(), "MAX_LOGIN_ATTEMPTS", 3u32)?;
        if max_login_attempts == 0 {
            return Err(ConfigError::invalid_format("MAX_LOGIN_ATTEMPTS", "positive integer", "0"));
        }
        let lockout_minutes = parse_or(env.as_ref(), "LOCKOUT_MINUTES", 15u64)?;
        let otp_ttl_seconds = parse_or(env.as_ref(), "OTP_TTL_SECONDS", 300u64)?;
        let session_ttl_minutes = parse_or(env.as_ref(), "SESSION_TTL_MINUTES", 60u64)?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            jwt_secret,
            password_pepper,
            login_delay: Duration::from_millis(login_delay_ms),
            max_login_attempts,
            lockout_duration: Duration::from_secs(lockout_minutes * 60),
            otp_ttl: Duration::from_secs(otp_ttl_seconds),
            session_ttl: Duration::from_secs(session_ttl_minutes * 60),
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    pub fn login_delay(&self) -> Duration {
        self.login_delay
    }

    pub fn max_login_attempts(&self) -> u32 {
        self.max_login_attempts
    }

    pub fn lockout_duration(&self) -> Duration {
        self.lockout_duration
    }

    pub fn otp_ttl(&self) -> Duration {
        self.otp_ttl
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Override the database URL, used by the CLI `--database-url` flag
    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    /// Override the artificial login delay
    pub fn with_login_delay(mut self, login_delay: Duration) -> Self {
        self.login_delay = login_delay;
        self
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field("login_delay", &self.login_delay)
            .field("max_login_attempts", &self.max_login_attempts)
            .field("lockout_duration", &self.lockout_duration)
            .field("otp_ttl", &self.otp_ttl)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

fn load_secret(env: &(dyn EnvironmentProvider + Send + Sync), name: &str, min_length: usize) -> Result<String, ConfigError> {
    let value = env.get_var(name).ok_or_else(|| ConfigError::missing(name))?;
    if value.len() < min_length {
        return Err(ConfigError::too_short(name, min_length, value.len()));
    }
    Ok(value)
}

fn parse_or<T>(env: &(dyn EnvironmentProvider + Send + Sync), name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env.get_non_blank(name) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::invalid_format(name, "non-negative integer", &raw)),
        None => Ok(default),
    }
}
