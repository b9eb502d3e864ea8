//! CLI interface for quote-relay
//!
//! Provides subcommands for:
//! - `serve`: Run the quote relay (default)
//! - `config`: Show the effective configuration

mod serve;
mod show_config;

pub use serve::execute as serve;
pub use show_config::render as render_config;

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given, if present
pub const DEFAULT_CONFIG_PATH: &str = "quote-relay.toml";

/// Long flags that are also accepted with a single dash (`-domain`)
const LEGACY_LONG_FLAGS: &[&str] = &["domain", "apikey", "testing", "config"];

#[derive(Parser, Debug)]
#[command(name = "quote-relay")]
#[command(about = "HTTP relay serving stock quotes from Finnhub with automatic TLS")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fully qualified domain name to obtain a certificate for
    #[arg(short, long, env = "DOMAIN", global = true)]
    pub domain: Option<String>,

    /// Finnhub API key
    #[arg(
        long = "apikey",
        env = "FINNHUB_API_KEY",
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,

    /// Disable TLS and serve plain HTTP on port 8080
    #[arg(long, global = true)]
    pub testing: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the quote relay
    Serve,
    /// Show the effective configuration
    Config,
}

impl Cli {
    /// Parse process arguments, accepting single-dash long flags
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args()))
    }

    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }

    /// Load the config file and apply flag/env overrides.
    ///
    /// An explicit `--config` must exist; the default path is optional.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| {
                anyhow::anyhow!("Could not load config from {}: {}", path.display(), e)
            })?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH)?,
            None => Config::default(),
        };

        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Flags and environment variables win over file values
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(domain) = &self.domain {
            config.acme.domain = Some(domain.clone());
        }
        if let Some(api_key) = &self.api_key {
            config.upstream.api_key = api_key.clone();
        }
        if self.testing {
            config.server.testing = true;
        }
    }
}

/// Rewrite `-domain`, `-apikey=x`, ... to their `--` forms
pub fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut passthrough = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LEGACY_LONG_FLAGS.contains(&name) {
                        format!("-{}", arg)
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
