/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `DATABASE_URL`: Optional; `sqlite:` selects the SQLite backend, `mysql:` overrides the fields below
/// - `DATABASE_HOST`, `DATABASE_USERNAME`, `DATABASE_PASSWORD`: MySQL connection (required without `DATABASE_URL`)
/// - `DATABASE_NAME`: Database to select (optional)
/// - `DATABASE_REQUIRE_TLS`: Require TLS (default: true)
/// - `DATABASE_MAX_CONNECTIONS`: Client connection limit (default: 5)
/// - `USER_CONFLICT_POLICY`: `reject` or `upsert` (default: reject)
/// - `RUST_LOG`: Log filter (default: `spendtrack_api=debug,tower_http=debug`)
///
/// # Example
///
/// ```no_run
/// use spendtrack_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use spendtrack_shared::db::pool::DatabaseConfig;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// User endpoint behaviour
    pub users: UserConfig,
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// User endpoint configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserConfig {
    /// What POST /user does when the email is already registered
    pub conflict_policy: ConflictPolicy,
}

/// Handling of POST /user for an email that already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Answer 409 and leave the row untouched
    #[default]
    Reject,

    /// Update the display name and answer 201 with the row
    Upsert,
}

impl FromStr for ConflictPolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "reject" => Ok(ConflictPolicy::Reject),
            "upsert" => Ok(ConflictPolicy::Upsert),
            other => anyhow::bail!("Unknown USER_CONFLICT_POLICY '{}' (expected reject or upsert)", other),
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::Reject => write!(f, "reject"),
            ConflictPolicy::Upsert => write!(f, "upsert"),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let required = |name: &str| -> anyhow::Result<String> {
            match (&url, env::var(name)) {
                (_, Ok(value)) => Ok(value),
                (Some(_), Err(_)) => Ok(String::new()),
                (None, Err(_)) => Err(anyhow::anyhow!(
                    "{} environment variable is required when DATABASE_URL is not set",
                    name
                )),
            }
        };

        let host = required("DATABASE_HOST")?;
        let username = required("DATABASE_USERNAME")?;
        let password = required("DATABASE_PASSWORD")?;

        let database = env::var("DATABASE_NAME").ok().filter(|name| !name.is_empty());

        let require_tls = match env::var("DATABASE_REQUIRE_TLS") {
            Ok(value) => parse_bool("DATABASE_REQUIRE_TLS", &value)?,
            Err(_) => true,
        };

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let conflict_policy = match env::var("USER_CONFLICT_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => ConflictPolicy::default(),
        };

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url,
                host,
                username,
                password,
                database,
                require_tls,
                max_connections,
                ..Default::default()
            },
            users: UserConfig { conflict_policy },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
