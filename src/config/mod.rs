// src/config/mod.rs

//! Layered configuration
//!
//! Settings are merged from, lowest to highest priority:
//! - built-in defaults
//! - a configuration file (YAML, JSON or TOML, chosen by extension)
//! - environment variables (`KITCHEN_OPS__API__BASE_URL=...`)
//! - in-memory overrides (command line flags)

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, ErrorKind, Result};

pub const ENV_PREFIX: &str = "KITCHEN_OPS";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error for '{}': {}", self.key, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigSource {
    File { path: PathBuf, format: ConfigFormat },
    Environment { prefix: String },
    Memory { data: Value },
}

#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub name: String,
    pub source: ConfigSource,
    pub priority: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
    pub debug: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "Kitchen Ops".to_string(),
            environment: "development".to_string(),
            debug: cfg!(debug_assertions),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub console: ConsoleLogConfig,
    pub file: Option<FileLogConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            console: ConsoleLogConfig::default(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleLogConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    pub path: PathBuf,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./logs/kitchen-ops.log"),
        }
    }
}

/// REST backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            user_agent: format!("kitchen-ops/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub page_sizes: Vec<usize>,
    pub default_page_size: usize,
    /// Expiry offset applied to stock added from the testing panel.
    pub stock_expiry_days: i64,
    pub low_stock: LowStockConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_sizes: vec![10, 15, 20],
            default_page_size: 10,
            stock_expiry_days: 30,
            low_stock: LowStockConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowStockConfig {
    pub low_threshold: f64,
    pub critical_threshold: f64,
}

impl Default for LowStockConfig {
    fn default() -> Self {
        Self {
            low_threshold: 5.0,
            critical_threshold: 1.0,
        }
    }
}

impl AppConfig {
    /// Every problem in the merged configuration; empty when valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut push = |key: &str, message: &str| {
            errors.push(ValidationError {
                key: key.to_string(),
                message: message.to_string(),
            })
        };

        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            push("api.base_url", "must not be empty");
        } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            push("api.base_url", "must start with http:// or https://");
        }
        if self.api.timeout_secs == 0 {
            push("api.timeout_secs", "must be greater than zero");
        }

        if self.ui.page_sizes.is_empty() {
            push("ui.page_sizes", "must list at least one page size");
        }
        if self.ui.page_sizes.contains(&0) {
            push("ui.page_sizes", "page sizes must be greater than zero");
        }
        if !self.ui.page_sizes.contains(&self.ui.default_page_size) {
            push("ui.default_page_size", "must be one of ui.page_sizes");
        }
        if self.ui.low_stock.critical_threshold > self.ui.low_stock.low_threshold {
            push(
                "ui.low_stock.critical_threshold",
                "must not exceed ui.low_stock.low_threshold",
            );
        }

        errors
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    layers: Vec<ConfigLayer>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Defaults, then `path` (if given), then the environment.
    pub fn with_config_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut manager = Self::new();
        if let Some(path) = path {
            manager.add_file_layer("file", path, 10)?;
        }
        manager.add_env_layer("environment", ENV_PREFIX, 20);
        Ok(manager)
    }

    /// `<config_dir>/kitchen-ops/config.toml`, when the platform has one.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kitchen-ops").join("config.toml"))
    }

    pub fn add_file_layer<P: AsRef<Path>>(
        &mut self,
        name: impl Into<String>,
        path: P,
        priority: u32,
    ) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let format = ConfigFormat::from_extension(&path).ok_or_else(|| {
            Error::config(format!(
                "Unsupported configuration file format: {}",
                path.display()
            ))
        })?;

        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::File { path, format },
            priority,
        });
        Ok(())
    }

    pub fn add_env_layer(&mut self, name: impl Into<String>, prefix: impl Into<String>, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Environment {
                prefix: prefix.into(),
            },
            priority,
        });
    }

    pub fn add_memory_layer(&mut self, name: impl Into<String>, data: Value, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Memory { data },
            priority,
        });
    }

    fn push_layer(&mut self, layer: ConfigLayer) {
        self.layers.push(layer);
        self.layers.sort_by_key(|l| l.priority);
    }

    /// Merges every layer over the defaults and deserializes the result.
    pub fn load(&self) -> Result<AppConfig> {
        let mut merged = serde_json::to_value(AppConfig::default())?;

        for layer in &self.layers {
            let layer_config = self.load_layer_config(layer)?;
            merge_values(&mut merged, layer_config);
        }

        serde_json::from_value(merged).map_err(|e| {
            Error::new(
                ErrorKind::Configuration {
                    key: None,
                    validation_errors: vec![e.to_string()],
                },
                format!("Failed to deserialize configuration: {}", e),
            )
        })
    }

    fn load_layer_config(&self, layer: &ConfigLayer) -> Result<Value> {
        match &layer.source {
            ConfigSource::File { path, format } => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!(
                        "Failed to read config file {}: {}",
                        path.display(),
                        e
                    ))
                })?;

                match format {
                    ConfigFormat::Json => serde_json::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse JSON config: {}", e))),
                    ConfigFormat::Yaml => serde_yaml::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse YAML config: {}", e))),
                    ConfigFormat::Toml => toml::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse TOML config: {}", e))),
                }
            }
            ConfigSource::Environment { prefix } => Ok(env_layer(prefix, std::env::vars())),
            ConfigSource::Memory { data } => Ok(data.clone()),
        }
    }
}

/// Builds a nested object from `PREFIX__SECTION__KEY=value` pairs.
fn env_layer(prefix: &str, vars: impl Iterator<Item = (String, String)>) -> Value {
    let mut env_config = Map::new();
    let marker = format!("{}{}", prefix, ENV_SEPARATOR);

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&marker) else {
            continue;
        };
        let path: Vec<String> = rest
            .split(ENV_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(str::to_lowercase)
            .collect();
        set_nested_env_value(&mut env_config, &path, value);
    }

    Value::Object(env_config)
}

fn set_nested_env_value(config: &mut Map<String, Value>, keys: &[String], value: String) {
    match keys {
        [] => {}
        [last] => {
            config.insert(last.clone(), parse_env_value(value));
        }
        [first, rest @ ..] => {
            let entry = config
                .entry(first.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(map) = entry {
                set_nested_env_value(map, rest, value);
            }
        }
    }
}

fn parse_env_value(value: String) -> Value {
    if let Ok(bool_val) = value.parse::<bool>() {
        return Value::Bool(bool_val);
    }
    if let Ok(int_val) = value.parse::<i64>() {
        return Value::Number(Number::from(int_val));
    }
    if let Some(number) = value.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    if value.contains(',') {
        return Value::Array(
            value
                .split(',')
                .map(|item| parse_env_value(item.trim().to_string()))
                .collect(),
        );
    }
    Value::String(value)
}

fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(target_value) => merge_values(target_value, source_value),
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ConfigManager::new().load().unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.validate().is_empty());
        assert_eq!(config.ui.page_sizes, vec![10, 15, 20]);
    }

    #[test]
    fn test_toml_file_layer_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://ops.example.com\"\n\n[ui]\ndefault_page_size = 15"
        )
        .unwrap();

        let mut manager = ConfigManager::new();
        manager.add_file_layer("file", file.path(), 10).unwrap();
        let config = manager.load().unwrap();

        assert_eq!(config.api.base_url, "https://ops.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.ui.default_page_size, 15);
    }

    #[test]
    fn test_yaml_file_layer() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "logging:\n  level: debug\n  format: Json").unwrap();

        let mut manager = ConfigManager::new();
        manager.add_file_layer("file", file.path(), 10).unwrap();
        let config = manager.load().unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let mut manager = ConfigManager::new();
        let err = manager.add_file_layer("file", "config.ini", 10).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Configuration { .. }));
    }

    #[test]
    fn test_memory_layer_wins_over_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", json!({"api": {"base_url": "http://file"}})).unwrap();

        let mut manager = ConfigManager::new();
        manager.add_file_layer("file", file.path(), 10).unwrap();
        manager.add_memory_layer("cli", json!({"api": {"base_url": "http://cli"}}), 30);
        let config = manager.load().unwrap();

        assert_eq!(config.api.base_url, "http://cli");
    }

    #[test]
    fn test_env_layer_nesting() {
        let vars = vec![
            ("KITCHEN_OPS__API__BASE_URL".to_string(), "http://env:9000".to_string()),
            ("KITCHEN_OPS__API__TIMEOUT_SECS".to_string(), "5".to_string()),
            ("KITCHEN_OPS__UI__PAGE_SIZES".to_string(), "5,25".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ];
        let value = env_layer(ENV_PREFIX, vars.into_iter());

        assert_eq!(
            value,
            json!({
                "api": {"base_url": "http://env:9000", "timeout_secs": 5},
                "ui": {"page_sizes": [5, 25]}
            })
        );
    }

    #[test]
    fn test_validation_reports_every_problem() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://nope".to_string();
        config.api.timeout_secs = 0;
        config.ui.default_page_size = 12;
        config.ui.low_stock.critical_threshold = 10.0;

        let keys: Vec<String> = config.validate().into_iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec![
                "api.base_url",
                "api.timeout_secs",
                "ui.default_page_size",
                "ui.low_stock.critical_threshold"
            ]
        );
    }
}
