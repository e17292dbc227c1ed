use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Session configuration.
///
/// Loaded from an optional TOML file, with `RECITE_`-prefixed environment
/// variables taking precedence (e.g. `RECITE_RECORDINGS_DIR=/tmp/takes`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one WAV file per recorded prompt
    pub recordings_dir: PathBuf,
    /// Manifest written on export (JSON array of {text, file_name})
    pub manifest_path: PathBuf,
    /// Plain-text list of prompts still missing a recording
    pub unrecorded_path: PathBuf,
    /// File name of the export archive
    pub archive_name: String,
    /// How long one poll of the audio transport may wait for frames
    pub poll_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recordings_dir: PathBuf::from("data"),
            manifest_path: PathBuf::from("data/meta.json"),
            unrecorded_path: PathBuf::from("data/unrecorded.txt"),
            archive_name: "recite_archive.zip".to_string(),
            poll_timeout_ms: 1000,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("RECITE"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
