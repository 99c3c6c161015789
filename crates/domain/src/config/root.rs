use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::zone::ZoneNode;
use crate::dns_name;

/// TTL applied to records whose configuration omits one.
pub const DEFAULT_TTL: u32 = 300;

const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "dnsconfig.json",
    "dnsconfig.toml",
    "/etc/fdns/dnsconfig.json",
];

/// Main configuration structure, parsed once at startup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Root zone nodes, in configuration order
    #[serde(default)]
    pub domains: Vec<ZoneNode>,

    /// Reserved. Listeners always bind the standard DNS port.
    #[serde(default)]
    pub listen: String,

    /// Default record TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Reserved expiry-sweep interval for an answer cache
    #[serde(default, rename = "cachepurge")]
    pub cache_purge: u64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            listen: String::new(),
            ttl: DEFAULT_TTL,
            cache_purge: 0,
            logging: LoggingConfig::default(),
        }
    }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

impl ServerConfig {
    /// Load configuration from file
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnsconfig.json in current directory
    /// 3. dnsconfig.toml in current directory
    /// 4. /etc/fdns/dnsconfig.json
    ///
    /// A missing, unreadable or malformed file is an error.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_string(),
            None => Self::get_config_path()
                .ok_or_else(|| ConfigError::NotFound(DEFAULT_CONFIG_PATHS.join(", ")))?,
        };

        let mut config = Self::from_file(&path)?;
        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file. Files ending in `.toml` are
    /// read as TOML, everything else as JSON.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        let is_toml = Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(&contents)
                .map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))
        } else {
            serde_json::from_str(&contents)
                .map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))
        }
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// Zone names themselves are not checked here: an illegal name only
    /// skips that node during registration. Record targets must be legal
    /// names because they cannot be encoded otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(nodes: &[ZoneNode]) -> Result<(), ConfigError> {
            for node in nodes {
                let targets = node
                    .mail_exchange
                    .as_ref()
                    .map(|mx| ("mx", &mx.content))
                    .into_iter()
                    .chain(node.cname.as_ref().map(|t| ("cname", &t.content)))
                    .chain(node.ns.as_ref().map(|t| ("ns", &t.content)));

                for (kind, target) in targets {
                    if dns_name::is_domain_name(target).is_none() {
                        return Err(ConfigError::Validation(format!(
                            "{} target '{}' of '{}' is not a valid domain name",
                            kind, target, node.name
                        )));
                    }
                }
                check(&node.children)?;
            }
            Ok(())
        }

        check(&self.domains)
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        DEFAULT_CONFIG_PATHS
            .iter()
            .find(|path| Path::new(path).exists())
            .map(|path| path.to_string())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
}
