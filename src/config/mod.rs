// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Codec configuration.
//!
//! A single immutable [`CodecConfig`] is built at startup and passed by
//! reference to every component that needs the grid width, the extend
//! code, the data directory or the mutation rate.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Process-wide codec settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodecConfig {
    /// Directory that score files are read from and written to
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Cells per grid row (eighth notes per measure)
    #[serde(default = "default_grid_width")]
    pub grid_width: usize,
    /// Integer that marks a continuation cell in numeric grids
    #[serde(default = "default_extend_code")]
    pub extend_code: i32,
    /// Per-cell mutation probability handed to new populations
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_grid_width() -> usize {
    8
}
fn default_extend_code() -> i32 {
    -1
}
fn default_mutation_rate() -> f64 {
    0.1
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            grid_width: default_grid_width(),
            extend_code: default_extend_code(),
            mutation_rate: default_mutation_rate(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string and validate it
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Check that the settings describe a usable codec
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 {
            bail!("grid_width must be at least 1");
        }
        if (0..=127).contains(&self.extend_code) {
            bail!(
                "extend_code {} collides with a MIDI pitch",
                self.extend_code
            );
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            bail!("mutation_rate {} is outside [0, 1]", self.mutation_rate);
        }
        Ok(())
    }

    /// Resolve a file name against the data directory
    pub fn data_path<P: AsRef<Path>>(&self, file: P) -> PathBuf {
        self.data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = CodecConfig::from_toml("").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.grid_width, 8);
        assert_eq!(config.extend_code, -1);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_parse_config() {
        let text = r#"
data_dir = "melodies"
grid_width = 16
extend_code = -2
mutation_rate = 0.25
"#;

        let config = CodecConfig::from_toml(text).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("melodies"));
        assert_eq!(config.grid_width, 16);
        assert_eq!(config.extend_code, -2);
        assert_eq!(config.mutation_rate, 0.25);
    }

    #[test]
    fn test_invalid_values() {
        assert!(CodecConfig::from_toml("grid_width = 0").is_err());
        assert!(CodecConfig::from_toml("extend_code = 60").is_err());
        assert!(CodecConfig::from_toml("mutation_rate = 1.5").is_err());
        assert!(CodecConfig::from_toml("grid_width = \"eight\"").is_err());
    }

    #[test]
    fn test_round_trip() {
        let original = CodecConfig {
            data_dir: PathBuf::from("out"),
            grid_width: 12,
            extend_code: -7,
            mutation_rate: 0.5,
        };

        let text = original.to_toml().unwrap();
        let parsed = CodecConfig::from_toml(&text).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_load_and_data_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.toml");
        fs::write(&path, "data_dir = \"scores\"\n").unwrap();

        let config = CodecConfig::load(&path).unwrap();
        assert_eq!(config.data_path("a.yaml"), PathBuf::from("scores").join("a.yaml"));
        assert!(CodecConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
