use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::{Competition, Participant, ResultSet};

/// On-disk shape of the normalized result set, as written by the ingestion
/// collaborator. The core never interprets placeholder rank encodings; they
/// are resolved to concrete integers before this file is written.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub participants: Vec<Participant>,
    pub competitions: Vec<Competition>,
}

impl Snapshot {
    pub fn into_result_set(self) -> ResultSet {
        ResultSet::new(self.participants, self.competitions)
    }
}

/// Reads the ingestion layer's JSON snapshot and writes derived output.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<ResultSet> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;

        let snapshot: Snapshot = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse snapshot {}. First 200 chars: {}",
                self.path.display(),
                &json[..json.len().min(200)]
            )
        })?;

        info!(
            "Loaded snapshot: {} participants, {} competitions",
            snapshot.participants.len(),
            snapshot.competitions.len()
        );
        Ok(snapshot.into_result_set())
    }
}

/// Serializes to a temp file next to the target, then renames over it, so
/// readers only ever see a complete document.
pub fn write_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(data).context("Failed to serialize derived data")?;
    fs::write(&tmp_path, json)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to swap {} into place", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}
