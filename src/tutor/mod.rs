pub mod offline;
pub mod prompt;

pub use offline::OfflineTutor;

use crate::model::chat::Transcript;
use crate::model::session::ExpertiseLevel;

/// Error type for tutor calls
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    #[error("tutor unavailable: {0}")]
    Unavailable(String),
    #[error("tutor returned an empty response")]
    EmptyResponse,
    #[error("unknown tutor mode: {0} (expected \"offline\")")]
    UnknownMode(String),
}

/// A curriculum and chat backend.
///
/// Implementations produce a completed text blob or fail with a textual
/// error; the outline model treats the result as opaque input text and has
/// no knowledge of where it came from.
pub trait Tutor {
    /// Produce curriculum text for a topic at the given level
    fn curriculum(&self, topic: &str, level: ExpertiseLevel) -> Result<String, TutorError>;

    /// Produce the next tutor reply for a session transcript
    fn reply(&self, transcript: &Transcript, curriculum: &str) -> Result<String, TutorError>;
}

/// Resolve the configured tutor mode to a backend
pub fn tutor_for_mode(mode: &str) -> Result<Box<dyn Tutor>, TutorError> {
    match mode {
        "offline" => Ok(Box::new(OfflineTutor)),
        other => Err(TutorError::UnknownMode(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_mode_resolves() {
        assert!(tutor_for_mode("offline").is_ok());
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let err = match tutor_for_mode("claude") {
            Ok(_) => panic!("expected an error for unknown mode"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("unknown tutor mode"));
    }
}
