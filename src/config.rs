use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use shuowang::chinese::BEIJING_OFFSET_MINUTES;
use shuowang::server::ServerConfig;

use crate::cli::Cli;

/// Top-level configuration file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listening address.
    #[serde(default)]
    pub server: ServerToml,

    /// Calendar settings.
    #[serde(default)]
    pub calendar: CalendarToml,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerToml {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerToml {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CalendarToml {
    /// Civil time offset east of UTC, in minutes.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

impl Default for CalendarToml {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

fn default_utc_offset() -> i32 {
    BEIJING_OFFSET_MINUTES
}

impl Config {
    /// Reads `path`, or takes the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }

    /// Applies command-line overrides.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(offset) = cli.utc_offset {
            self.calendar.utc_offset_minutes = offset;
        }
        self
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn empty_file_takes_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(Config::default(), config);
        assert_eq!(480, config.calendar.utc_offset_minutes);
        assert_eq!("0.0.0.0:8080", config.server_config().bind_addr());
    }

    #[test]
    fn partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [calendar]
            utc_offset_minutes = 540
            "#,
        )
        .unwrap();
        assert_eq!("0.0.0.0", config.server.host);
        assert_eq!(9000, config.server.port);
        assert_eq!(540, config.calendar.utc_offset_minutes);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(toml::from_str::<Config>("[server]\nhots = \"::\"").is_err());
        assert!(toml::from_str::<Config>("[cache]\nsize = 1").is_err());
    }

    #[test]
    fn cli_overrides_file() {
        let config: Config = toml::from_str("[server]\nhost = \"127.0.0.1\"\nport = 9000").unwrap();
        let cli = Cli::parse_from(["shuowang", "--port", "3000", "--utc-offset", "0"]);
        let config = config.merge_cli(&cli);
        assert_eq!("127.0.0.1:3000", config.server_config().bind_addr());
        assert_eq!(0, config.calendar.utc_offset_minutes);
    }

    #[test]
    fn missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/shuowang.toml"))).unwrap_err();
        assert!(format!("{err:#}").starts_with("failed to read config file"));
        assert_eq!(Config::default(), Config::load(None).unwrap());
    }
}
