use std::fs;
use std::path::Path;

use crate::io::study_io::StudyError;
use crate::model::config::{SessionConfig, StudyConfig};

/// Read the study config, returning both the parsed config and the raw
/// toml_edit Document for round-trip-safe editing.
pub fn read_config(study_dir: &Path) -> Result<(StudyConfig, toml_edit::DocumentMut), StudyError> {
    let config_path = study_dir.join("config.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| StudyError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: StudyConfig = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text.parse()?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting
pub fn write_config(study_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), StudyError> {
    let config_path = study_dir.join("config.toml");
    fs::write(&config_path, doc.to_string()).map_err(|e| StudyError::WriteError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

/// Append a session to the config document
pub fn add_session_to_config(doc: &mut toml_edit::DocumentMut, session: &SessionConfig) {
    if !doc.contains_key("sessions") {
        doc["sessions"] = toml_edit::Item::ArrayOfTables(toml_edit::ArrayOfTables::new());
    }

    if let Some(sessions) = doc["sessions"].as_array_of_tables_mut() {
        let mut table = toml_edit::Table::new();
        table["id"] = toml_edit::value(&session.id);
        table["topic"] = toml_edit::value(&session.topic);
        table["level"] = toml_edit::value(&session.level);
        table["file"] = toml_edit::value(&session.file);
        sessions.push(table);
    }
}

/// Update the tutor mode in the config document
pub fn set_tutor_mode(doc: &mut toml_edit::DocumentMut, mode: &str) {
    if !doc.contains_key("tutor") {
        doc["tutor"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["tutor"]["mode"] = toml_edit::value(mode);
}
