use figment::{Figment, providers::Env, providers::Serialized};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Runtime configuration, loaded once from the environment with the
/// `HABITD_` prefix merged over built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:habitd.sqlite".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("HABITD_"))
            .extract()
            .expect("invalid HABITD_ environment configuration")
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);
