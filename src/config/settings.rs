use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub roster: RosterSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RosterSettings {
    /// Page size used when the list request does not ask for one.
    pub default_page_size: usize,
    /// Seed the default rank taxonomy into an empty store at startup.
    pub seed_default_ranks: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Built-in defaults so the service runs without any config file
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("roster.default_page_size", 20_i64)?
            .set_default("roster.seed_default_ranks", true)?
            // Base configuration file
            .add_source(File::with_name("config/default").required(false))
            // Environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variable overrides, e.g. TINDO_ROSTER__SERVER__PORT
            .add_source(Environment::with_prefix("TINDO_ROSTER").separator("__"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_load_with_defaults() {
        let settings = Settings::new().expect("settings should load from defaults");
        assert!(!settings.server.host.is_empty());
        assert!(settings.server.port > 0);
        assert!(settings.roster.default_page_size >= 1);
    }
}
