//! Handles settings for the application.
//!
//! Values come from an optional `settings.toml` (path set with `--config`),
//! overridden by `SPESE__SECTION__KEY` environment variables, on top of the
//! defaults below.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Parser)]
#[command(name = "spese", about = "Expense tracking server")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "SPESE_CONFIG")]
    config: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    /// Tracing level of the workspace crates.
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
    pub cors_origin: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        Self::load(args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH))
    }

    fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.database", "memory")?
            .set_default("server.cors_origin", "http://localhost:3000")?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SPESE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::load("does/not/exist").unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.bind, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.database, Database::Memory);
        assert_eq!(settings.server.cors_origin, "http://localhost:3000");
    }
}
