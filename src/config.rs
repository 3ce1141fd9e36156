//! # Service Configuration
//!
//! TOML-backed configuration for the HTTP service. Every field has a
//! default so the server also runs without a config file.
//!
//! # Example TOML
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0:5000"
//! max_image_bytes = 33554432
//!
//! [codec]
//! use_alpha = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::stego::{ChannelSelect, CodecConfig};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub codec: CodecSection,
}

/// Network and request-size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Largest accepted image, measured on the decoded base64 bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

/// Codec layout selection. `use_alpha` opts the alpha channel into the
/// bitstream; leave it off for compatibility with v1 images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecSection {
    #[serde(default)]
    pub use_alpha: bool,
}

fn default_bind_address() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_max_image_bytes() -> usize {
    32 * 1024 * 1024
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Default for CodecSection {
    fn default() -> Self {
        Self { use_alpha: false }
    }
}

impl ServerConfig {
    /// Load and parse a TOML configuration file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading config file {}", path))?;
        let config: ServerConfig =
            toml::from_str(&content).with_context(|| format!("parsing config file {}", path))?;
        Ok(config)
    }

    /// The immutable codec configuration handed to the engine.
    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig {
            channels: if self.codec.use_alpha {
                ChannelSelect::Rgba
            } else {
                ChannelSelect::Rgb
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:5000");
        assert_eq!(config.server.max_image_bytes, 32 * 1024 * 1024);
        assert_eq!(config.codec_config(), CodecConfig::V1);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            bind_address = "127.0.0.1:8080"

            [codec]
            use_alpha = true
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.server.max_image_bytes, 32 * 1024 * 1024);
        assert_eq!(config.codec_config().channels, ChannelSelect::Rgba);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:5000");
        assert!(!config.codec.use_alpha);
    }
}
