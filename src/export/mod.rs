//! Session export
//!
//! Snapshots the session store into three artifacts: a JSON manifest of
//! recorded prompts, a plain-text list of prompts still missing a take, and
//! a zip archive of everything in the recordings directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::config::Config;
use crate::session::SessionStore;

/// One manifest entry: a recorded prompt and the WAV file that holds it
#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub text: String,
    pub file_name: String,
}

/// What an export produced, for status display
#[derive(Debug)]
pub struct ExportSummary {
    /// Number of recordings listed in the manifest
    pub recordings: usize,
    /// Number of prompts still unrecorded
    pub unrecorded: usize,
    pub archive_path: PathBuf,
}

/// Builds the downloadable session bundle from the current store contents.
///
/// Export never mutates session data, so a failed export can simply be
/// retried.
pub struct ExportBuilder {
    recordings_dir: PathBuf,
    manifest_path: PathBuf,
    unrecorded_path: PathBuf,
    archive_path: PathBuf,
}

impl ExportBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            recordings_dir: config.recordings_dir.clone(),
            manifest_path: config.manifest_path.clone(),
            unrecorded_path: config.unrecorded_path.clone(),
            archive_path: PathBuf::from(&config.archive_name),
        }
    }

    pub fn build(&self, store: &SessionStore) -> Result<ExportSummary> {
        let recordings = self.write_manifest(store)?;
        let unrecorded = self.write_unrecorded(store)?;
        self.write_archive()?;

        info!(
            "Export complete: {} recordings, {} unrecorded, archive {}",
            recordings,
            unrecorded,
            self.archive_path.display()
        );

        Ok(ExportSummary {
            recordings,
            unrecorded,
            archive_path: self.archive_path.clone(),
        })
    }

    /// JSON array of {text, file_name} for every registered recording
    fn write_manifest(&self, store: &SessionStore) -> Result<usize> {
        let entries: Vec<ManifestEntry> = store
            .recordings()
            .map(|r| ManifestEntry {
                text: r.text.clone(),
                file_name: r.file_name(),
            })
            .collect();

        let json = serde_json::to_string_pretty(&entries).context("Failed to serialize manifest")?;
        fs::write(&self.manifest_path, json)
            .with_context(|| format!("Failed to write manifest: {}", self.manifest_path.display()))?;

        Ok(entries.len())
    }

    /// One line per prompt still missing a recording. Any previous file is
    /// removed first and nothing is written when the list is empty, so the
    /// file's absence means "nothing pending".
    fn write_unrecorded(&self, store: &SessionStore) -> Result<usize> {
        if self.unrecorded_path.exists() {
            fs::remove_file(&self.unrecorded_path).with_context(|| {
                format!(
                    "Failed to remove stale unrecorded list: {}",
                    self.unrecorded_path.display()
                )
            })?;
        }

        let pending = store.unrecorded_prompts();
        if pending.is_empty() {
            return Ok(0);
        }

        let file = File::create(&self.unrecorded_path).with_context(|| {
            format!(
                "Failed to create unrecorded list: {}",
                self.unrecorded_path.display()
            )
        })?;
        let mut writer = BufWriter::new(file);
        for prompt in &pending {
            writeln!(writer, "{}", prompt.text).context("Failed to write unrecorded list")?;
        }
        writer.flush().context("Failed to flush unrecorded list")?;

        Ok(pending.len())
    }

    /// Deflate-compressed zip of every file in the recordings directory,
    /// entry names relative to that directory. An empty directory yields a
    /// valid, empty archive; a prior archive at the same path is replaced.
    fn write_archive(&self) -> Result<()> {
        let file = File::create(&self.archive_path)
            .with_context(|| format!("Failed to create archive: {}", self.archive_path.display()))?;
        let mut archive = zip::ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut paths: Vec<PathBuf> = Vec::new();
        if self.recordings_dir.exists() {
            for entry in fs::read_dir(&self.recordings_dir).with_context(|| {
                format!(
                    "Failed to read recordings directory: {}",
                    self.recordings_dir.display()
                )
            })? {
                let path = entry?.path();
                if path.is_file() {
                    paths.push(path);
                }
            }
        }
        paths.sort();

        for path in paths {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("Archive entry has a non-UTF-8 file name")?
                .to_string();

            archive
                .start_file(name, options)
                .context("Failed to start archive entry")?;
            let mut input =
                File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
            io::copy(&mut input, &mut archive).context("Failed to write archive entry")?;
        }

        archive.finish().context("Failed to finalize archive")?;

        Ok(())
    }
}
