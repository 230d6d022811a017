//! Application configuration loaded from environment variables.

use std::env;

const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/exercise-track";
const DEFAULT_DB_NAME: &str = "exercise-track";
const DEFAULT_PORT: u16 = 3000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string
    pub mongo_uri: String,
    /// Database name (taken from the URI path, or the default)
    pub db_name: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            db_name: "exercise-track-test".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `MONGO_URI` and `PORT` are both optional and fall back to a local
    /// MongoDB instance on the standard port.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mongo_uri = env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.to_string());

        let db_name =
            db_name_from_uri(&mongo_uri).unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            mongo_uri,
            db_name,
            port,
        })
    }
}

/// Extract the database name from a MongoDB connection string.
///
/// `mongodb://host:port/dbname?opts` carries the default database as the
/// path segment. Returns `None` when the URI has no path.
fn db_name_from_uri(uri: &str) -> Option<String> {
    let rest = uri
        .strip_prefix("mongodb://")
        .or_else(|| uri.strip_prefix("mongodb+srv://"))?;
    let path = rest.split_once('/')?.1;
    let name = path.split('?').next().unwrap_or("");
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, String),
}
