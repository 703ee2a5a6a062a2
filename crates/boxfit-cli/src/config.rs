//! Optional YAML settings file.
//!
//! ```yaml
//! letterbox:
//!   filter: area
//! remap:
//!   value_max: 1.0
//!   degenerate: clamp
//!   kmeans:
//!     max_iter: 10
//!     epsilon: 1.0
//!     attempts: 10
//! ```
//!
//! Every key is optional; missing ones take library defaults.

use anyhow::{Context, Result};
use boxfit_ops::{ColorRemapper, LetterboxOptions, RemapConfig};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub letterbox: LetterboxOptions,
    pub remap: RemapConfig,
}

impl CliConfig {
    /// Reads `path`, or returns defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        debug!(?config, path = %path.display(), "loaded config");
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Builds the remapper described by `remap`.
    pub fn remapper(&self) -> Result<ColorRemapper> {
        ColorRemapper::new(self.remap).context("Invalid remap settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxfit_ops::{DegeneratePolicy, Filter};

    #[test]
    fn test_empty_is_default() {
        assert_eq!(CliConfig::parse("").unwrap(), CliConfig::default());
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "letterbox:\n  filter: area\nremap:\n  degenerate: clamp\n";
        let config = CliConfig::parse(yaml).unwrap();
        assert_eq!(config.letterbox.filter, Filter::Area);
        assert_eq!(config.remap.degenerate, DegeneratePolicy::Clamp);
        assert_eq!(config.remap.value_max, 255.0);
        assert_eq!(config.remap.kmeans.attempts, 10);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(CliConfig::parse("colour: red\n").is_err());
    }

    #[test]
    fn test_bad_remap_rejected() {
        let config = CliConfig::parse("remap:\n  value_max: 0.0\n").unwrap();
        assert!(config.remapper().is_err());
    }
}
