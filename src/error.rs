//! Error Module
//! Errors raised at the edges of the crate: fonts, image output, config and snapshot files.
//! The chart widget itself never fails.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Not a usable TrueType font: {0}")]
    FontParse(PathBuf),
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Invalid snapshot on line {line}: {source}")]
    Snapshot {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
    #[error("Failed to serialize samples: {0}")]
    Export(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
