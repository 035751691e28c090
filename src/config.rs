//! Server settings read from the environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration. Every field has a default so the service starts with an empty environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Allowed cross-origin URL (`URL_FRONTEND`). `None` allows any origin.
    pub frontend_url: Option<String>,
    pub request_timeout: Duration,
    /// `Secure` flag on the `user_id` cookie issued by login.
    pub cookie_secure: bool,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// Full URL from `DATABASE_URL`; takes precedence over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Upper bound on waiting for a pooled connection, and on the maintenance connection at startup.
    pub acquire_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".into(),
            port: 3000,
            database: DatabaseConfig::default(),
            frontend_url: None,
            request_timeout: Duration::from_secs(30),
            cookie_secure: true,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: None,
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: String::new(),
            name: "thesecretgarden".into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();
        let db = DatabaseConfig::default();

        Ok(Config {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                host: get("DB_HOST").unwrap_or(db.host),
                port: parse_or("DB_PORT", get("DB_PORT"), db.port)?,
                user: get("DB_USER").unwrap_or(db.user),
                // An empty password is a legitimate value, so read it untrimmed.
                password: lookup("DB_PASSWORD").unwrap_or(db.password),
                name: get("DB_DATABASE").unwrap_or(db.name),
                max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), db.max_connections)?,
                acquire_timeout: Duration::from_secs(parse_or(
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    get("DB_ACQUIRE_TIMEOUT_SECS"),
                    db.acquire_timeout.as_secs(),
                )?),
            },
            frontend_url: get("URL_FRONTEND"),
            request_timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                defaults.request_timeout.as_secs(),
            )?),
            cookie_secure: parse_bool("COOKIE_SECURE", get("COOKIE_SECURE"), defaults.cookie_secure)?,
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }
        let mut opts = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if !self.password.is_empty() {
            opts = opts.password(&self.password);
        }
        Ok(opts)
    }
}

fn parse_or<T: FromStr>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue { var, value: v }),
    }
}

fn parse_bool(var: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::InvalidValue {
            var,
            value: value.unwrap_or_default(),
        }),
    }
}
