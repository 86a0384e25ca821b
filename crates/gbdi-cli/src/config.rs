//! CLI configuration
//!
//! An optional YAML file provides defaults the command line can override:
//!
//! ```yaml
//! output_dir: /data/converted
//! strictness: strict
//! chunk_size: 50
//! ```

use anyhow::Context;
use clap::ValueEnum;
use gbdi_validate::StrictnessLevel;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Validation strictness as exposed on the command line and in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Permissive,
    #[default]
    Standard,
    Strict,
}

impl From<Strictness> for StrictnessLevel {
    fn from(value: Strictness) -> Self {
        match value {
            Strictness::Permissive => StrictnessLevel::Permissive,
            Strictness::Standard => StrictnessLevel::Standard,
            Strictness::Strict => StrictnessLevel::Strict,
        }
    }
}

/// Defaults loaded from the optional config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Directory converted files land in when no explicit output is given
    pub output_dir: Option<PathBuf>,
    /// Default validation strictness
    pub strictness: Option<Strictness>,
    /// Default chunk size for `split`
    pub chunk_size: Option<usize>,
}

impl CliConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse config file '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: CliConfig = serde_yaml::from_str(
            "output_dir: /data/converted\nstrictness: strict\nchunk_size: 25\n",
        )
        .unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("/data/converted")));
        assert_eq!(config.strictness, Some(Strictness::Strict));
        assert_eq!(config.chunk_size, Some(25));
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: CliConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.output_dir.is_none());
        assert!(config.strictness.is_none());
        assert!(config.chunk_size.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<CliConfig, _> = serde_yaml::from_str("outputs: /tmp\n");
        assert!(result.is_err());
    }

    #[test]
    fn strictness_converts_to_validation_level() {
        assert_eq!(
            StrictnessLevel::from(Strictness::Strict),
            StrictnessLevel::Strict
        );
        assert_eq!(
            StrictnessLevel::from(Strictness::Permissive),
            StrictnessLevel::Permissive
        );
    }
}
