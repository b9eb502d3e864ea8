//! Config command implementation

use crate::config::Config;

/// Effective configuration as TOML, API key masked
pub fn render(config: &Config) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(&config.redacted())?)
}
