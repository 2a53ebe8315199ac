use crate::collab::auth::{AuthFlow, DEFAULT_LOGIN_URL};
use crate::collab::extractor::ColumnMap;
use crate::errors::{AppError, AppResult};
use crate::models::location::LocationSet;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_URL: &str = "https://us.prairietest.com/pt/center/1362/staff/log";

/// Top-level keys a complete config file carries.
pub const CONFIG_KEYS: [&str; 7] = [
    "database",
    "locations",
    "label_column",
    "detail_column",
    "default_format",
    "login_url",
    "log_url",
];

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
    #[serde(default = "default_label_column")]
    pub label_column: usize,
    #[serde(default = "default_detail_column")]
    pub detail_column: usize,
    #[serde(default = "default_format")]
    pub default_format: String,
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_log_url")]
    pub log_url: String,
}

fn default_locations() -> Vec<String> {
    vec!["008".to_string(), "014".to_string(), "015".to_string()]
}
fn default_label_column() -> usize {
    1
}
fn default_detail_column() -> usize {
    2
}
fn default_format() -> String {
    "csv".to_string()
}
fn default_login_url() -> String {
    DEFAULT_LOGIN_URL.to_string()
}
fn default_log_url() -> String {
    DEFAULT_LOG_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            locations: default_locations(),
            label_column: default_label_column(),
            detail_column: default_detail_column(),
            default_format: default_format(),
            login_url: default_login_url(),
            log_url: default_log_url(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("ptoccupancy")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".ptoccupancy")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("ptoccupancy.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("ptoccupancy.sqlite")
    }

    /// Load configuration from the standard file, or defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Keys of [`CONFIG_KEYS`] absent from the given YAML text.
    pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        let map = yaml
            .as_mapping()
            .ok_or_else(|| AppError::Config("top level is not a mapping".into()))?;

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .collect())
    }

    pub fn location_set(&self) -> LocationSet {
        LocationSet::new(self.locations.iter().cloned())
    }

    pub fn columns(&self) -> ColumnMap {
        ColumnMap {
            label: self.label_column,
            detail: self.detail_column,
        }
    }

    pub fn auth_flow(&self) -> AuthFlow {
        AuthFlow {
            login_url: self.login_url.clone(),
            ..AuthFlow::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path);

        if !is_test {
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(config)
    }
}
