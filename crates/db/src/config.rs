//! Store connection configuration.

use std::fmt;

use sqlx::postgres::PgConnectOptions;

/// Default PostgreSQL port when `DB_PORT` is unset.
const DEFAULT_PORT: u16 = 5432;

/// Default pool ceiling when `DB_MAX_CONNECTIONS` is unset.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where to connect.
#[derive(Clone)]
pub enum DbTarget {
    /// A full `postgres://` connection URL.
    Url(String),
    /// Individual connection settings.
    Parts {
        host: String,
        port: u16,
        username: String,
        password: String,
        database: String,
    },
}

/// Connection settings handed to [`crate::create_pool`] and
/// [`crate::repositories::PrintRequestRepo::connect`].
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub target: DbTarget,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `DATABASE_URL`       | (unset) |
    /// | `DB_HOST`            | required without `DATABASE_URL` |
    /// | `DB_PORT`            | `5432`  |
    /// | `DB_USERNAME`        | required without `DATABASE_URL` |
    /// | `DB_PASSWORD`        | empty   |
    /// | `DB_DBNAME`          | required without `DATABASE_URL` |
    /// | `DB_MAX_CONNECTIONS` | `10`    |
    ///
    /// `DATABASE_URL` wins over the individual settings when both are present.
    pub fn from_env() -> Result<Self, DbConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(DbConfigError::Invalid {
                    var: "DB_MAX_CONNECTIONS",
                    value,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            return Ok(Self {
                target: DbTarget::Url(url),
                max_connections,
            });
        }

        let required = |var: &'static str| lookup(var).ok_or(DbConfigError::Missing(var));

        let port = match lookup("DB_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| DbConfigError::Invalid {
                    var: "DB_PORT",
                    value,
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            target: DbTarget::Parts {
                host: required("DB_HOST")?,
                port,
                username: required("DB_USERNAME")?,
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                database: required("DB_DBNAME")?,
            },
            max_connections,
        })
    }

    /// Build sqlx connect options. Fails only for a malformed URL.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.target {
            DbTarget::Url(url) => url.parse(),
            DbTarget::Parts {
                host,
                port,
                username,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(username)
                .password(password)
                .database(database)),
        }
    }
}

// Keeps credentials out of startup logs.
impl fmt::Debug for DbTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbTarget::Url(_) => f.write_str("Url(<redacted>)"),
            DbTarget::Parts {
                host,
                port,
                username,
                database,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("username", username)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<DbConfig, DbConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DbConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn database_url_takes_precedence() {
        let config = load(&[
            ("DATABASE_URL", "postgres://u:p@db:5433/prints"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();

        assert_matches!(config.target, DbTarget::Url(ref url) if url.ends_with("/prints"));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn parts_fill_defaults() {
        let config = load(&[
            ("DB_HOST", "localhost"),
            ("DB_USERNAME", "threedee"),
            ("DB_DBNAME", "threedee"),
        ])
        .unwrap();

        assert_matches!(
            config.target,
            DbTarget::Parts { ref host, port: 5432, ref password, .. }
                if host == "localhost" && password.is_empty()
        );
    }

    #[test]
    fn missing_host_is_reported() {
        let err = load(&[("DB_USERNAME", "u"), ("DB_DBNAME", "d")]).unwrap_err();
        assert_matches!(err, DbConfigError::Missing("DB_HOST"));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = load(&[
            ("DB_HOST", "h"),
            ("DB_PORT", "five"),
            ("DB_USERNAME", "u"),
            ("DB_DBNAME", "d"),
        ])
        .unwrap_err();
        assert_matches!(err, DbConfigError::Invalid { var: "DB_PORT", .. });
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = load(&[("DATABASE_URL", "postgres://x"), ("DB_MAX_CONNECTIONS", "0")])
            .unwrap_err();
        assert_matches!(err, DbConfigError::Invalid { var: "DB_MAX_CONNECTIONS", .. });
    }

    #[test]
    fn debug_output_hides_credentials() {
        let config = load(&[
            ("DB_HOST", "h"),
            ("DB_USERNAME", "u"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_DBNAME", "d"),
        ])
        .unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));

        let config = load(&[("DATABASE_URL", "postgres://u:hunter2@h/d")]).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn parts_build_connect_options() {
        let config = load(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USERNAME", "u"),
            ("DB_DBNAME", "prints"),
        ])
        .unwrap();
        let options = config.connect_options().unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("prints"));
    }
}
