use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "STOREFRONT_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

/// Application configuration
///
/// Every field has a default so the app runs with no config file at all,
/// storing its tables as CSV files in the working directory.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the local CSV mirrors
    pub data_dir: PathBuf,

    pub inventory_file: String,
    pub settings_file: String,
    pub credentials_file: String,

    /// Logo pasted on printed labels; missing file means no logo
    pub logo_path: Option<PathBuf>,

    /// Address the web server binds to
    pub bind_addr: String,

    /// Optional remote spreadsheet mirror
    pub remote: Option<RemoteConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            inventory_file: "inventory.csv".to_string(),
            settings_file: "settings.csv".to_string(),
            credentials_file: "credentials.csv".to_string(),
            logo_path: Some(PathBuf::from("logo.jpg")),
            bind_addr: "127.0.0.1:3000".to_string(),
            remote: None,
        }
    }
}

impl AppConfig {
    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(&self.inventory_file)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings_file)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(&self.credentials_file)
    }

    /// The logo path, only if the file actually exists
    pub fn logo(&self) -> Option<&Path> {
        self.logo_path.as_deref().filter(|p| p.is_file())
    }
}

/// Connection settings for the remote spreadsheet service
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL; tables live at `{base_url}/{table_name}`
    pub base_url: String,
    pub api_key: Option<String>,
    /// Upper bound for a single request
    pub timeout_secs: u64,
    /// Extra attempts after the first failure
    pub retries: u32,
    /// Linear backoff step between attempts
    pub retry_backoff_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout_secs: 10,
            retries: 1,
            retry_backoff_ms: 250,
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms * u64::from(attempt))
    }
}

/// Load configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Read` if the file exists but cannot be read
/// * `ConfigError::Parse` if the contents are not valid TOML for `AppConfig`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path_ref = path.as_ref();
    log::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
        path: path_ref.display().to_string(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path_ref.display().to_string(),
        source,
    })
}

/// Resolve the config file from `STOREFRONT_CONFIG` (or `storefront.toml`)
///
/// A missing file is not an error: defaults are returned instead.
pub fn load_app_configuration() -> Result<AppConfig, ConfigError> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    if !Path::new(&path).exists() {
        log::info!("No config file at {}, using defaults", path);
        return Ok(AppConfig::default());
    }
    let config = load_config(&path)?;
    log::info!("Loaded configuration from {}", path);
    Ok(config)
}
