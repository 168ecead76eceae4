use std::path::PathBuf;

use super::config::StudyConfig;
use super::session::Session;

/// A fully loaded study directory
#[derive(Debug)]
pub struct Study {
    /// Root directory of the study (parent of `study/`)
    pub root: PathBuf,
    /// Path to the `study/` directory
    pub study_dir: PathBuf,
    /// Parsed config.toml
    pub config: StudyConfig,
    /// Loaded sessions, indexed by session id, in config order
    pub sessions: Vec<(String, Session)>,
}
