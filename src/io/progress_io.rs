use std::collections::HashMap;
use std::fs;
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::model::outline::NodeId;

/// Persisted completion overlay (written to .progress.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudyProgress {
    /// Per-session completed node ids, in the order they were marked
    #[serde(default)]
    pub sessions: HashMap<String, SessionProgress>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionProgress {
    #[serde(default)]
    pub completed: IndexSet<NodeId>,
}

/// Read .progress.json from the study directory. Missing or malformed files
/// read as `None`; the overlay is always reconstructible by re-marking.
pub fn read_progress(study_dir: &Path) -> Option<StudyProgress> {
    let path = study_dir.join(".progress.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .progress.json to the study directory
pub fn write_progress(study_dir: &Path, progress: &StudyProgress) -> Result<(), std::io::Error> {
    let path = study_dir.join(".progress.json");
    let content = serde_json::to_string_pretty(progress)?;
    fs::write(&path, content)
}
