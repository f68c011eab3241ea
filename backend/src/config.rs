use std::env;
use dotenv::dotenv;
use serde::Deserialize;
use log::{info, warn};
use thiserror::Error;

pub const DEFAULT_COLLECTION: &str = "contests";
const DEFAULT_BACKEND_URL: &str = "http://0.0.0.0:50002";

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
    pub username: String,
    pub password: String,
    /// Collection holding the contest documents
    pub collection: String,
    /// Bound on each collection read (`DB_TIMEOUT`)
    pub timeout_seconds: u64,
}

impl Config {
    fn parse_backend_url(url: &str) -> (String, u16) {
        // Parse BACKEND_URL like "http://localhost:50002" or "http://127.0.0.1:50002"
        if let Ok(parsed_url) = url::Url::parse(url) {
            let host = parsed_url.host_str().unwrap_or("127.0.0.1").to_string();
            let port = parsed_url.port().unwrap_or(50002);
            (host, port)
        } else {
            ("127.0.0.1".to_string(), 50002)
        }
    }

    /// Loads `.env` files and builds the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var("ENV_FILE_PATH") {
            Ok(env_file_path) if !env_file_path.is_empty() => {
                info!("Loading environment from ENV_FILE_PATH: {}", env_file_path);
                dotenv::from_filename(&env_file_path).ok();
            }
            _ => {
                dotenv().ok();
                // .env.<environment> overrides the base file outside development
                let environment_hint = env::var("RUST_ENV")
                    .unwrap_or_else(|_| "development".to_string())
                    .parse()
                    .unwrap_or(Environment::Development);
                let env_file = format!(".env.{:?}", environment_hint).to_lowercase();
                if env_file != ".env.development" {
                    let _ = dotenv::from_filename(&env_file);
                }
            }
        }

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.log_configuration();
        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("RUST_ENV")
            .unwrap_or_else(|| "development".to_string())
            .parse()
            .unwrap_or(Environment::Development);

        info!("Loading configuration for environment: {:?}", environment);

        let config = Config {
            server: Self::load_server_config(&environment, &lookup)?,
            database: Self::load_database_config(&environment, &lookup)?,
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    fn load_server_config<F>(env: &Environment, lookup: &F) -> Result<ServerConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let (host, port) = Self::parse_backend_url(&backend_url);
        let default_workers = match env {
            Environment::Production => 8,
            Environment::Development | Environment::Test => 1,
        };

        Ok(ServerConfig {
            // SERVER_HOST takes precedence over the BACKEND_URL host
            host: lookup("SERVER_HOST").unwrap_or(host),
            port: parse_or("SERVER_PORT", lookup("SERVER_PORT"), port)?,
            workers: parse_or("BACKEND_WORKERS", lookup("BACKEND_WORKERS"), default_workers)?,
        })
    }

    fn load_database_config<F>(env: &Environment, lookup: &F) -> Result<DatabaseConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let collection = lookup("CONTESTS_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        match env {
            Environment::Production => {
                let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
                Ok(DatabaseConfig {
                    url: required("ARANGO_URL")?,
                    name: required("ARANGO_DB")?,
                    username: required("ARANGO_USERNAME")?,
                    password: required("ARANGO_PASSWORD")?,
                    collection,
                    timeout_seconds: parse_or("DB_TIMEOUT", lookup("DB_TIMEOUT"), 120)?,
                })
            }
            Environment::Development => {
                let arango_url = lookup("ARANGO_URL");
                match &arango_url {
                    Some(url) => info!("Found ARANGO_URL in environment: {}", url),
                    None => warn!("ARANGO_URL not found in environment, using default"),
                }

                Ok(DatabaseConfig {
                    url: arango_url.unwrap_or_else(|| "http://localhost:8529".to_string()),
                    name: lookup("ARANGO_DB").unwrap_or_else(|| "contest_calendar_dev".to_string()),
                    username: lookup("ARANGO_USERNAME").unwrap_or_else(|| "root".to_string()),
                    password: lookup("ARANGO_PASSWORD").unwrap_or_else(|| "test".to_string()),
                    collection,
                    timeout_seconds: parse_or("DB_TIMEOUT", lookup("DB_TIMEOUT"), 30)?,
                })
            }
            Environment::Test => Ok(DatabaseConfig {
                url: lookup("ARANGO_URL").unwrap_or_else(|| "http://test-arangodb:8529".to_string()),
                name: lookup("ARANGO_DB").unwrap_or_else(|| "contest_calendar_test".to_string()),
                username: lookup("ARANGO_USERNAME").unwrap_or_else(|| "root".to_string()),
                password: lookup("ARANGO_PASSWORD").unwrap_or_else(|| "test".to_string()),
                collection,
                timeout_seconds: parse_or("DB_TIMEOUT", lookup("DB_TIMEOUT"), 30)?,
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.environment == Environment::Production && self.database.password == "test" {
            return Err(ConfigError::Rejected(
                "Production database password cannot be 'test'".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Rejected("Server port cannot be 0".to_string()));
        }

        if self.server.workers == 0 {
            return Err(ConfigError::Rejected("Worker count cannot be 0".to_string()));
        }

        if self.database.timeout_seconds == 0 {
            return Err(ConfigError::Rejected("Database timeout cannot be 0".to_string()));
        }

        if self.database.collection.trim().is_empty() {
            return Err(ConfigError::Rejected("Contest collection name cannot be empty".to_string()));
        }

        Ok(())
    }

    fn log_configuration(&self) {
        info!("Configuration loaded successfully");
        info!("Environment: {:?}", self.environment);
        info!("Server: {}:{} (workers: {})", self.server.host, self.server.port, self.server.workers);
        info!("Database: {} (collection: {})", self.database.name, self.database.collection);

        if self.environment == Environment::Development {
            warn!("Running in development mode");
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
