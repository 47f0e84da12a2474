/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional configuration file read from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// Optional `KEY=value` file read from the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Environment variables read by the server, with the config key they map to.
/// Keys use `_` as the nesting separator.
const ENV_KEYS: &[(&str, &str)] = &[
    ("HOST", "HOST"),
    ("PORT", "PORT"),
    ("CORS_ORIGINS", "CORS_ORIGINS"),
    ("DB_USER", "DB_USER"),
    ("DB_PASSWORD", "DB_PASSWORD"),
    ("DB_HOST", "DB_HOST"),
    ("DB_PORT", "DB_PORT"),
    ("DB_NAME", "DB_NAME"),
    ("DATABASE_URL", "DB_URL"),
];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors")]
    pub cors: CorsSettings,

    #[serde(default = "default_db")]
    pub db: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsSettings {
    /// Comma-separated origins, `*` for any
    #[serde(default = "default_cors_origins")]
    pub origins: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_user")]
    pub user: String,

    #[serde(default = "default_db_password")]
    pub password: String,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_db_name")]
    pub name: String,

    /// Full connection URL; takes precedence over the individual parts
    #[serde(default)]
    pub url: Option<String>,
}

impl CorsSettings {
    /// Parsed origin list. `["*"]` means any origin.
    pub fn origin_list(&self) -> Vec<String> {
        if self.origins.trim() == "*" {
            return vec!["*".to_string()];
        }

        self.origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn allows_any(&self) -> bool {
        self.origin_list().iter().any(|origin| origin == "*")
    }
}

impl DatabaseSettings {
    /// PostgreSQL connection URL
    pub fn url(&self) -> String {
        if let Some(url) = self.url.as_ref().filter(|url| !url.is_empty()) {
            return url.clone();
        }

        format!(
            "postgresql://{}:{}@{}:{}/{}?sslmode=disable",
            self.user, self.password, self.host, self.port, self.name
        )
    }

    /// Where the server connects, without credentials
    pub fn display_target(&self) -> String {
        if self.url.as_ref().is_some_and(|url| !url.is_empty()) {
            return "DATABASE_URL".to_string();
        }
        format!("{}:{}/{}", self.host, self.port, self.name)
    }
}

impl ServerConfig {
    /// Load configuration from `roster.toml` and `.env` (if present) and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from the given file (if present), `.env` (if
    /// present) and the process environment
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let file = config_path.exists().then_some(config_path);

        // Process variables win over `.env` entries
        let mut vars = env_file_vars(Path::new(DEFAULT_ENV_FILE))?;
        vars.extend(std::env::vars());

        Self::from_sources(file, vars)
    }

    /// Build configuration from an optional file and a set of environment variables
    ///
    /// Only the variables the server knows about are considered, and empty
    /// values count as unset.
    pub fn from_sources<I>(config_file: Option<&Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: config::Map<String, String> = vars
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .filter_map(|(name, value)| {
                ENV_KEYS
                    .iter()
                    .find(|(env_name, _)| *env_name == name)
                    .map(|(_, key)| ((*key).to_string(), value))
            })
            .collect();

        let mut settings = config::Config::builder();

        if let Some(path) = config_file {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::default()
                .source(Some(env))
                .separator("_"),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ServerError::Config("PORT must be non-zero".to_string()));
        }

        if self.cors.origin_list().is_empty() {
            return Err(ServerError::Config(
                "CORS_ORIGINS must name at least one origin".to_string(),
            ));
        }

        if self.db.url.is_none() && self.db.name.trim().is_empty() {
            return Err(ServerError::Config(
                "Database name is required (set DB_NAME or DATABASE_URL)".to_string(),
            ));
        }

        Ok(())
    }
}

/// Entries of a dotenv file, in file order
///
/// A missing file yields no entries; an unreadable or malformed one is a
/// configuration error.
pub fn env_file_vars(path: &Path) -> Result<Vec<(String, String)>> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) if err.not_found() => {
            tracing::debug!("No {} file loaded", path.display());
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(ServerError::Config(format!(
                "Failed to read {}: {err}",
                path.display()
            )))
        }
    };

    let vars = entries
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|err| ServerError::Config(format!("Invalid {}: {err}", path.display())))?;
    tracing::debug!("Loaded {} entries from {}", vars.len(), path.display());

    Ok(vars)
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8185
}

fn default_cors() -> CorsSettings {
    CorsSettings {
        origins: default_cors_origins(),
    }
}

fn default_cors_origins() -> String {
    "*".to_string()
}

fn default_db() -> DatabaseSettings {
    DatabaseSettings {
        user: default_db_user(),
        password: default_db_password(),
        host: default_db_host(),
        port: default_db_port(),
        name: default_db_name(),
        url: None,
    }
}

fn default_db_user() -> String {
    "go_test_user".to_string()
}

fn default_db_password() -> String {
    "go_test_pass".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5435
}

fn default_db_name() -> String {
    "app_test".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_cors(),
            db: default_db(),
        }
    }
}
