use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::{DEFAULT_MAX_ARTIFACT_LINES, Element, MAX_CONSTELLATION};
use crate::scoring::SetActivation;
use crate::search::Strategy;

pub const DEFAULT_CONFIG_PATH: &str = "loadout.json";
const DEFAULT_ARTIFACT_PATH: &str = "../Artifacts_List.txt";
const DEFAULT_WEAPON_PATH: &str = "../Weapons_With_Scaled_Refinement.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_constellation {value} is above {max}")]
    ConstellationOutOfRange { value: u8, max: u8 },
    #[error("max_artifact_lines must be at least 1")]
    NoArtifactLines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    pub artifact_path: PathBuf,
    pub weapon_path: PathBuf,
    pub max_artifact_lines: usize,
    pub max_constellation: u8,
    pub element: Element,
    pub strategy: Strategy,
    pub set_activation: SetActivation,
    pub report_format: ReportFormat,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            weapon_path: PathBuf::from(DEFAULT_WEAPON_PATH),
            max_artifact_lines: DEFAULT_MAX_ARTIFACT_LINES,
            max_constellation: MAX_CONSTELLATION,
            element: Element::default(),
            strategy: Strategy::default(),
            set_activation: SetActivation::default(),
            report_format: ReportFormat::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Defaults when `path` does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Constraints enforced:
    /// - max_constellation <= MAX_CONSTELLATION
    /// - max_artifact_lines >= 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_constellation > MAX_CONSTELLATION {
            return Err(ConfigError::ConstellationOutOfRange {
                value: self.max_constellation,
                max: MAX_CONSTELLATION,
            });
        }
        if self.max_artifact_lines == 0 {
            return Err(ConfigError::NoArtifactLines);
        }
        Ok(())
    }
}
