/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,

    /// Credentials of the bootstrap administrator
    #[serde(default)]
    pub admin: Option<AdminSettings>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,
}

/// Log sinks besides stdout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Also write logs to `directory/file_name`
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,

    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_log_file_name")]
    pub file_name: String,
}

impl LoggingSettings {
    /// Full path of the log file
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminSettings {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from `config.toml` and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    /// Load configuration from a file (if it exists) and environment
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables, e.g. APPAREL_AUTH__JWT_SECRET
        settings = settings.add_source(
            config::Environment::with_prefix("APPAREL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
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
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set APPAREL_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.logging.to_file && self.logging.file_name.is_empty() {
            return Err(ServerError::Config(
                "logging.file_name is required when logging.to_file is set".to_string(),
            ));
        }

        if self.auth.jwt_expiration_hours == 0 {
            return Err(ServerError::Config(
                "jwt_expiration_hours must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        data_file: default_data_file(),
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data.json")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    1
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        to_file: default_log_to_file(),
        directory: default_log_directory(),
        file_name: default_log_file_name(),
    }
}

fn default_log_to_file() -> bool {
    true
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_file_name() -> String {
    "app.log".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            logging: default_logging(),
            admin: None,
        }
    }
}
