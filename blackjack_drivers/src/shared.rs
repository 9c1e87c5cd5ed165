use blackjack::Money;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "~/.blackjack.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Cannot find home directory")]
    NoHomeDirectory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rule: ConfigRule,
}

/// The table rule as written in the config file. The deck count is not part
/// of it; it comes from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    pub minimum_bet: u32,
    pub deal_order: String,
    pub dealer_draw_policy: String,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = blackjack::Rule::default();
        ConfigRule {
            minimum_bet: (rule.minimum_bet.cents() / 100) as u32,
            deal_order: rule.deal_order.to_string(),
            dealer_draw_policy: rule.dealer_draw_policy.to_string(),
        }
    }
}

impl TryInto<blackjack::Rule> for ConfigRule {
    type Error = serde::de::value::Error;

    fn try_into(self) -> Result<blackjack::Rule, Self::Error> {
        let blackjack_rule = blackjack::Rule {
            minimum_bet: Money::from_dollars(self.minimum_bet as u64),
            deal_order: self.deal_order.parse()?,
            dealer_draw_policy: self.dealer_draw_policy.parse()?,
            ..Default::default()
        };

        Ok(blackjack_rule)
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &Path) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename).map_err(|source| ConfigError::Io {
        path: filename.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&file_content).map_err(|source| ConfigError::Yaml {
        path: filename.to_path_buf(),
        source,
    })
}

/// Loads the config at `path`. The default path may be missing, in which
/// case the built-in rule is used; any other path must exist.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    if path != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(Path::new(path));
    }

    let home_dir = home::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    let config_file_path = home_dir.join(".blackjack.yml");
    if !config_file_path.is_file() {
        log::debug!("no config at {:?}, using defaults", config_file_path);
        return Ok(Config::default());
    }
    parse_config_from_file(&config_file_path)
}
