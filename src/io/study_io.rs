use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::io::progress_io;
use crate::model::chat::Transcript;
use crate::model::session::{ExpertiseLevel, Session};
use crate::model::study::Study;
use crate::ops::progress;
use crate::parse::{parse_chat_log, serialize_chat_log};

/// Error type for study I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    #[error("not a study: no study/ directory found")]
    NotAStudy,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("unknown expertise level in config: {0}")]
    UnknownLevel(String),
    #[error("no session with id: {0}")]
    UnknownSession(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the study by walking up from the given directory, looking for a
/// `study/` subdirectory with a config.toml.
pub fn discover_study(start: &Path) -> Result<PathBuf, StudyError> {
    let mut current = start.to_path_buf();
    loop {
        let study_dir = current.join("study");
        if study_dir.is_dir() && study_dir.join("config.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(StudyError::NotAStudy);
        }
    }
}

/// Load a complete study from the given root directory: config, sessions,
/// transcripts, and the completion overlay.
pub fn load_study(root: &Path) -> Result<Study, StudyError> {
    let study_dir = root.join("study");
    if !study_dir.is_dir() {
        return Err(StudyError::NotAStudy);
    }

    let config_path = study_dir.join("config.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| StudyError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: crate::model::config::StudyConfig = toml::from_str(&config_text)?;

    let overlay = progress_io::read_progress(&study_dir).unwrap_or_default();

    let mut sessions = Vec::new();
    for session_config in &config.sessions {
        let curriculum_path = study_dir.join(&session_config.file);
        if !curriculum_path.exists() {
            continue;
        }
        let curriculum =
            fs::read_to_string(&curriculum_path).map_err(|e| StudyError::ReadError {
                path: curriculum_path.clone(),
                source: e,
            })?;
        let level = ExpertiseLevel::parse(&session_config.level)
            .ok_or_else(|| StudyError::UnknownLevel(session_config.level.clone()))?;

        let mut session = Session::from_curriculum(
            &session_config.id,
            &session_config.topic,
            level,
            curriculum,
        );

        // The outline is fresh from the parse; completion comes back from
        // the overlay, stale ids silently dropped
        if let Some(session_progress) = overlay.sessions.get(&session_config.id) {
            progress::apply_completed(&mut session.outline, &session_progress.completed);
        }

        let chat_path = chat_log_path(&study_dir, &session_config.id);
        if chat_path.exists() {
            let chat_text = fs::read_to_string(&chat_path).map_err(|e| StudyError::ReadError {
                path: chat_path.clone(),
                source: e,
            })?;
            session.transcript = parse_chat_log(&chat_text);
        }

        sessions.push((session_config.id.clone(), session));
    }

    debug!(sessions = sessions.len(), "loaded study");
    Ok(Study {
        root: root.to_path_buf(),
        study_dir,
        config,
        sessions,
    })
}

/// Conventional curriculum file path for a session, relative to study/
pub fn session_file(id: &str) -> String {
    format!("sessions/{}.md", id)
}

fn chat_log_path(study_dir: &Path, id: &str) -> PathBuf {
    study_dir.join("sessions").join(format!("{}.chat.md", id))
}

/// Save a session's curriculum text
pub fn save_curriculum(study_dir: &Path, file: &str, text: &str) -> Result<(), StudyError> {
    let path = study_dir.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!(path = %path.display(), "saving curriculum");
    atomic_write(&path, text.as_bytes()).map_err(|e| StudyError::WriteError { path, source: e })
}

/// Save a session's transcript
pub fn save_transcript(
    study_dir: &Path,
    id: &str,
    transcript: &Transcript,
) -> Result<(), StudyError> {
    let path = chat_log_path(study_dir, id);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serialize_chat_log(transcript);
    atomic_write(&path, content.as_bytes())
        .map_err(|e| StudyError::WriteError { path, source: e })
}

/// Write a file atomically: write to a temp file in the same directory, then
/// persist over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_study(root: &Path) {
        let study_dir = root.join("study");
        fs::create_dir_all(study_dir.join("sessions")).unwrap();
        fs::write(
            study_dir.join("config.toml"),
            r#"[study]
name = "test"

[tutor]
mode = "offline"

[[sessions]]
id = "rust"
topic = "Rust"
level = "beginner"
file = "sessions/rust.md"
"#,
        )
        .unwrap();
        fs::write(
            study_dir.join("sessions/rust.md"),
            "# Rust\n- Ownership\n- Borrowing\n",
        )
        .unwrap();
    }

    #[test]
    fn test_discover_walks_up() {
        let tmp = TempDir::new().unwrap();
        write_study(tmp.path());
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let root = discover_study(&nested).unwrap();
        assert_eq!(root.canonicalize().unwrap(), tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_discover_miss_is_not_a_study() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_study(tmp.path()),
            Err(StudyError::NotAStudy)
        ));
    }

    #[test]
    fn test_load_study_parses_sessions() {
        let tmp = TempDir::new().unwrap();
        write_study(tmp.path());

        let study = load_study(tmp.path()).unwrap();
        assert_eq!(study.config.study.name, "test");
        assert_eq!(study.sessions.len(), 1);
        let (id, session) = &study.sessions[0];
        assert_eq!(id, "rust");
        assert_eq!(session.outline.node_count(), 3);
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_load_applies_progress_overlay() {
        let tmp = TempDir::new().unwrap();
        write_study(tmp.path());
        fs::write(
            tmp.path().join("study/.progress.json"),
            r#"{"sessions":{"rust":{"completed":[1]}}}"#,
        )
        .unwrap();

        let study = load_study(tmp.path()).unwrap();
        let (_, session) = &study.sessions[0];
        assert_eq!(progress::completion_stats(&session.outline).completed, 1);
        assert!(session.outline.roots[0].children[0].completed);
    }

    #[test]
    fn test_load_reads_transcript() {
        let tmp = TempDir::new().unwrap();
        write_study(tmp.path());
        fs::write(
            tmp.path().join("study/sessions/rust.chat.md"),
            "## user @ 2025-06-01 10:00\n\nhello\n",
        )
        .unwrap();

        let study = load_study(tmp.path()).unwrap();
        let (_, session) = &study.sessions[0];
        assert_eq!(session.transcript.len(), 1);
    }

    #[test]
    fn test_missing_session_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_study(tmp.path());
        fs::remove_file(tmp.path().join("study/sessions/rust.md")).unwrap();

        let study = load_study(tmp.path()).unwrap();
        assert!(study.sessions.is_empty());
    }

    #[test]
    fn test_unknown_level_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write_study(tmp.path());
        let config_path = tmp.path().join("study/config.toml");
        let config = fs::read_to_string(&config_path)
            .unwrap()
            .replace("beginner", "wizard");
        fs::write(&config_path, config).unwrap();

        assert!(matches!(
            load_study(tmp.path()),
            Err(StudyError::UnknownLevel(level)) if level == "wizard"
        ));
    }

    #[test]
    fn test_save_and_reload_transcript() {
        let tmp = TempDir::new().unwrap();
        write_study(tmp.path());

        let mut transcript = Transcript::default();
        transcript.push_at(
            crate::model::chat::Role::User,
            "hi",
            "2025-06-01 10:00".to_string(),
        );
        save_transcript(&tmp.path().join("study"), "rust", &transcript).unwrap();

        let study = load_study(tmp.path()).unwrap();
        assert_eq!(study.sessions[0].1.transcript, transcript);
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.txt");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
