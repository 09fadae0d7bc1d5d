//! Core application plumbing for Trailmap.

mod config;

pub use config::{
    Config, ExtractionConfig, ProgressConfig, TopUpMode, CONFIG_ENV, LOCAL_CONFIG,
};
