//! Listener selection

use crate::config::{Config, ConfigError};
use std::net::SocketAddr;
use std::path::PathBuf;

/// How the service accepts connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenMode {
    /// Plain HTTP, no certificates (test mode)
    Plain { addr: SocketAddr },
    /// HTTPS with certificates from an ACME directory
    Acme(AcmeSettings),
}

/// Everything the ACME listeners need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcmeSettings {
    /// TLS listener
    pub https_addr: SocketAddr,
    /// HTTP-01 challenge listener
    pub http_addr: SocketAddr,
    /// The only domain a certificate is requested for
    pub domain: String,
    pub cache_dir: PathBuf,
    /// `mailto:` contact URIs
    pub contact: Vec<String>,
    /// Let's Encrypt staging directory instead of production
    pub staging: bool,
}

fn any_addr(port: u16) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], port))
}

impl ListenMode {
    /// Pick the listen mode; outside test mode a domain is required
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        if config.server.testing {
            return Ok(ListenMode::Plain {
                addr: any_addr(config.server.plain_port),
            });
        }

        let domain = config
            .acme
            .domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::MissingDomain)?;

        if !config.acme.accept_tos {
            return Err(ConfigError::TermsNotAccepted);
        }

        let contact = config
            .acme
            .contact
            .iter()
            .map(|c| {
                if c.starts_with("mailto:") {
                    c.clone()
                } else {
                    format!("mailto:{}", c)
                }
            })
            .collect();

        Ok(ListenMode::Acme(AcmeSettings {
            https_addr: any_addr(config.server.https_port),
            http_addr: any_addr(config.server.http_port),
            domain: domain.to_string(),
            cache_dir: config.acme.cache_dir.clone(),
            contact,
            staging: config.acme.staging,
        }))
    }
}
