//! Configuration management for Trailmap.
//!
//! Handles loading configuration from TOML files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::extract::{ClassifyLimits, ExtractOptions, KeywordTables, SegmentOptions, Strategy, TopUp};
use crate::progress::{StoreError, StoreResult, DEFAULT_NAMESPACE};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TRAILMAP_CONFIG";

/// Local config file name.
pub const LOCAL_CONFIG: &str = ".trailmap.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extraction settings
    pub extraction: ExtractionConfig,

    /// Classifier vocabularies
    pub keywords: KeywordTables,

    /// Progress settings
    pub progress: ProgressConfig,
}

/// Extraction pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Segmentation strategy ("header" or "uniform")
    pub strategy: Strategy,

    /// Number of uniform buckets
    pub bucket_count: usize,

    /// Minimum items per uniform bucket
    pub bucket_min: usize,

    /// How short buckets are padded
    pub top_up: TopUpMode,

    /// Seed for random top-up
    pub seed: u64,

    /// Maximum goals per phase
    pub max_goals: usize,

    /// Maximum primary topics per phase
    pub max_topics: usize,

    /// Maximum projects per phase
    pub max_projects: usize,

    /// Maximum tools per phase
    pub max_tools: usize,

    /// Maximum sentences taken by the sentence fallback
    pub max_sentences: usize,

    /// Summary length in characters
    pub summary_chars: usize,

    /// Cap on header-anchored phases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_phases: Option<usize>,
}

/// Top-up mode as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopUpMode {
    #[default]
    Cyclic,
    Random,
}

/// Progress settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Prefix of persistence keys
    pub namespace: String,

    /// Clear later steps when a step is uncompleted
    pub cascade_on_uncomplete: bool,

    /// Progress file location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. the file named by `TRAILMAP_CONFIG`
    /// 2. `.trailmap.toml` in current directory
    /// 3. `~/.config/trailmap/config.toml`
    /// 4. Falls back to defaults
    pub fn load() -> anyhow::Result<Self> {
        match Self::find_config_file() {
            Some(path) => {
                tracing::debug!(path = ?path, "Loading config");
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// The config file [`Config::load`] would read, if any exists.
    pub fn find_config_file() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(explicit);
            if path.exists() {
                return Some(path);
            }
            tracing::warn!(path = ?path, "Config file named by {} does not exist", CONFIG_ENV);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Some(local_config);
        }

        Self::global_config_path().filter(|path| path.exists())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("trailmap"))
    }

    /// Get the data directory path (for progress).
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("trailmap"))
    }

    /// Path of the global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Progress file location, configured or default.
    pub fn store_path(&self) -> StoreResult<PathBuf> {
        match &self.progress.store_path {
            Some(path) => Ok(path.clone()),
            None => Self::data_dir().map(|d| d.join("progress.json")).ok_or(StoreError::NoDataDir),
        }
    }

    /// Extraction options described by this config.
    pub fn to_extract_options(&self) -> ExtractOptions {
        let ex = &self.extraction;
        ExtractOptions {
            segment: SegmentOptions {
                strategy: ex.strategy,
                bucket_count: ex.bucket_count,
                bucket_min: ex.bucket_min,
                top_up: match ex.top_up {
                    TopUpMode::Cyclic => TopUp::Cyclic,
                    TopUpMode::Random => TopUp::Random { seed: ex.seed },
                },
                max_phases: ex.max_phases,
            },
            tables: self.keywords.clone(),
            limits: ClassifyLimits {
                max_goals: ex.max_goals,
                max_topics: ex.max_topics,
                max_projects: ex.max_projects,
                max_tools: ex.max_tools,
                max_sentences: ex.max_sentences,
            },
            summary_chars: ex.summary_chars,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let segment = SegmentOptions::default();
        let limits = ClassifyLimits::default();
        Self {
            strategy: segment.strategy,
            bucket_count: segment.bucket_count,
            bucket_min: segment.bucket_min,
            top_up: TopUpMode::Cyclic,
            seed: 0,
            max_goals: limits.max_goals,
            max_topics: limits.max_topics,
            max_projects: limits.max_projects,
            max_tools: limits.max_tools,
            max_sentences: limits.max_sentences,
            summary_chars: ExtractOptions::default().summary_chars,
            max_phases: None,
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            cascade_on_uncomplete: false,
            store_path: None,
        }
    }
}
