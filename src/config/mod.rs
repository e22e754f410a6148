use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip)]
    pub jwt_secret: JwtSecret,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
}

/// HMAC signing secret. Prints as `[redacted]` so config dumps never carry it.
#[derive(Clone, Default)]
pub struct JwtSecret(Option<String>);

impl JwtSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if secret.is_empty() {
            Self(None)
        } else {
            Self(Some(secret))
        }
    }

    pub fn unset() -> Self {
        Self(None)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn expose(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("JwtSecret([redacted])"),
            None => f.write_str("JwtSecret(unset)"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Profile defaults first, then specific env vars win
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("BANK_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|url| !url.is_empty());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = JwtSecret::new(v);
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret: JwtSecret::unset(),
                jwt_expiry_hours: 24 * 7, // 1 week
                enable_cors: true,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                jwt_secret: JwtSecret::unset(),
                jwt_expiry_hours: 24,
                enable_cors: true,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret: JwtSecret::unset(),
                jwt_expiry_hours: 4,
                enable_cors: false,
            },
        }
    }
}

impl SecurityConfig {
    /// Development security settings with the given secret, mostly for tests.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: JwtSecret::new(secret),
            ..AppConfig::development().security
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.security.jwt_expiry_hours, 168);
        assert!(!config.security.jwt_secret.is_set());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.security.jwt_expiry_hours, 4);
        assert!(!config.security.enable_cors);
    }

    #[test]
    fn empty_secret_counts_as_unset() {
        assert!(!JwtSecret::new("").is_set());
        assert_eq!(JwtSecret::new("s3cret").expose(), Some("s3cret"));
    }

    #[test]
    fn secret_never_shows_in_debug_output() {
        let security = SecurityConfig::with_secret("super-secret-value");
        let dump = format!("{:?}", security);
        assert!(!dump.contains("super-secret-value"));
        assert!(dump.contains("[redacted]"));
    }

    #[test]
    fn secret_is_skipped_when_serialized() {
        let security = SecurityConfig::with_secret("super-secret-value");
        let json = serde_json::to_string(&security).unwrap();
        assert!(!json.contains("super-secret-value"));
        assert!(!json.contains("jwt_secret"));
    }
}
