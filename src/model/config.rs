use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    pub study: StudyInfo,
    #[serde(default)]
    pub tutor: TutorConfig,
    #[serde(default)]
    pub sessions: Vec<SessionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Which tutor backend answers `syl new` and `syl ask`.
    /// Default: see src/cli/handlers/init.rs template.
    #[serde(default = "default_tutor_mode")]
    pub mode: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        TutorConfig {
            mode: default_tutor_mode(),
        }
    }
}

fn default_tutor_mode() -> String {
    "offline".to_string()
}

/// One registered session: `[[sessions]]` entry in config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub id: String,
    pub topic: String,
    pub level: String,
    /// Curriculum file, relative to study/
    pub file: String,
}
