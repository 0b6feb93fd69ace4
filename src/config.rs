//! qrsave runtime configuration handling

use crate::error::{Error, Result};
use crate::qr::{DEFAULT_MODULE_SIZE, ErrorCorrection, RenderOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Payload encoded when neither the command line nor configuration provides one.
pub const DEFAULT_PAYLOAD: &str =
    "https://drive.google.com/file/d/1kbZNX10NL_x6IiG2qMLIfIodK_WpTWFU/view?usp=drive_link";

/// Destination used when no output path is configured.
pub const DEFAULT_OUTPUT: &str = "qr_code.png";

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrsaveConfig {
    /// Text to encode
    pub payload: Option<String>,
    /// Artifact rendering and destination
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrsaveConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrsave.toml / qrsave.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrsave.toml", "qrsave.yaml", "qrsave.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrsave");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(payload) = lookup("QRSAVE_PAYLOAD") {
            self.payload = Some(payload);
        }
        self.output.apply_overrides(&lookup);
        self.logging.apply_overrides(&lookup);
    }

    /// Payload to encode, falling back to the built-in default.
    pub fn payload(&self) -> &str {
        self.payload.as_deref().unwrap_or(DEFAULT_PAYLOAD)
    }
}

/// Artifact options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Destination file; the extension selects the image format
    pub path: PathBuf,
    /// Error correction level
    pub ecc: ErrorCorrection,
    /// Edge length of one module in pixels
    pub module_size: u32,
    /// Draw the 4-module quiet zone around the symbol
    pub quiet_zone: bool,
    /// Decode the written file and compare it against the payload
    pub verify: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            ecc: ErrorCorrection::M,
            module_size: DEFAULT_MODULE_SIZE,
            quiet_zone: true,
            verify: false,
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("QRSAVE_OUTPUT") {
            if !path.trim().is_empty() {
                self.path = PathBuf::from(path);
            }
        }
        if let Some(ecc) = lookup("QRSAVE_ECC") {
            if let Some(parsed) = ErrorCorrection::parse(&ecc) {
                self.ecc = parsed;
            }
        }
        if let Some(size) = lookup("QRSAVE_MODULE_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.module_size = parsed.max(1);
            }
        }
        if let Some(flag) = lookup("QRSAVE_QUIET_ZONE").as_deref().and_then(parse_bool) {
            self.quiet_zone = flag;
        }
        if let Some(flag) = lookup("QRSAVE_VERIFY").as_deref().and_then(parse_bool) {
            self.verify = flag;
        }
    }

    /// Render options derived from these settings
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            ecc: self.ecc,
            module_size: self.module_size.max(1),
            quiet_zone: self.quiet_zone,
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRSAVE_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QRSAVE_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("QRSAVE_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup("QRSAVE_LOG_COLOR").as_deref().and_then(parse_bool) {
            self.color = color;
        }
        if let Some(rotation) = lookup("QRSAVE_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
