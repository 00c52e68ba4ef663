use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RngConfig {
    /// Seeds the shared stream so a server run is reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rng: RngConfig,
}

/// Environment used to pick `config/{env}.toml` when `RUN_ENV` is unset.
pub const DEFAULT_RUN_ENV: &str = "local";

pub fn run_env() -> String {
    env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_RUN_ENV.into())
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = run_env();

        let builder = ::config::Config::builder()
            .add_source(config::File::with_name("config/default.toml"))
            .add_source(
                config::File::with_name(&format!("config/{}", env))
                    .required(false),
            )
            .add_source(config::File::with_name("config/local.toml").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        builder.build()?.try_deserialize()
    }
}
