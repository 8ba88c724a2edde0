// src/config.rs - Host-side link configuration
//
// Only the external collaborators are configurable: which serial port to
// open and how. The device semantics themselves (buffer capacity, cadences,
// initial position) are build-time constants in `device`.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub link: LinkConfig,
}

/// Serial link settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    #[serde(default = "default_port")]
    pub port: String,

    #[serde(default = "default_baud")]
    pub baud: u32,

    /// Talk over stdin/stdout instead of a serial port.
    #[serde(default)]
    pub console: bool,
}

fn default_port() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_baud() -> u32 {
    9600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link: LinkConfig::default(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud: default_baud(),
            console: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Check the loaded values before anything is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link.baud == 0 {
            return Err(ConfigError::Invalid("baud rate must be positive".into()));
        }
        if !self.link.console && self.link.port.is_empty() {
            return Err(ConfigError::Invalid(
                "serial port must be specified unless console mode is enabled".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.link.port, "/dev/ttyUSB0");
        assert_eq!(config.link.baud, 9600);
        assert!(!config.link.console);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_a_full_link_section() {
        let config: Config = toml::from_str(
            r#"
[link]
port = "/dev/ttyACM1"
baud = 115200
console = false
"#,
        )
        .unwrap();
        assert_eq!(config.link.port, "/dev/ttyACM1");
        assert_eq!(config.link.baud, 115200);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("[link]\nport = \"/dev/ttyS0\"\n").unwrap();
        assert_eq!(config.link.port, "/dev/ttyS0");
        assert_eq!(config.link.baud, 9600);

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.link.port, "/dev/ttyUSB0");
    }

    #[test]
    fn zero_baud_fails_validation() {
        let mut config = Config::default();
        config.link.baud = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_port_requires_console_mode() {
        let mut config = Config::default();
        config.link.port = String::new();
        assert!(config.validate().is_err());
        config.link.console = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[link]\nbaud = 19200\n").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.link.baud, 19200);
    }

    #[test]
    fn load_reports_read_and_parse_errors() {
        assert!(matches!(
            Config::load("/nonexistent/tensile.toml"),
            Err(ConfigError::Read { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not toml = = =").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
