use chrono::Local;
use serde::{Deserialize, Serialize};

/// Who authored a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Tutor,
    System,
}

impl Role {
    /// The name used in chat log headers
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Tutor => "tutor",
            Role::System => "system",
        }
    }

    /// Parse a chat log header name into a role
    pub fn from_name(name: &str) -> Option<Role> {
        match name {
            "user" => Some(Role::User),
            "tutor" => Some(Role::Tutor),
            "system" => Some(Role::System),
            _ => None,
        }
    }
}

/// A single tutor conversation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Local wall-clock stamp, `YYYY-MM-DD HH:MM`. Empty if unknown.
    #[serde(default)]
    pub sent_at: String,
}

/// The tutor conversation for one session, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Append a message stamped with the current local time
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.push_at(role, content, now_stamp());
    }

    /// Append a message with an explicit stamp
    pub fn push_at(&mut self, role: Role, content: impl Into<String>, sent_at: String) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
            sent_at,
        });
    }

    /// Most recent user message, if any
    pub fn last_user(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::User)
    }
}

/// Current local time in the transcript stamp format
pub fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in [Role::User, Role::Tutor, Role::System] {
            assert_eq!(Role::from_name(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_name("wizard"), None);
    }

    #[test]
    fn push_stamps_messages() {
        let mut transcript = Transcript::default();
        transcript.push(Role::User, "hello");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages[0].content, "hello");
        // YYYY-MM-DD HH:MM
        assert_eq!(transcript.messages[0].sent_at.len(), 16);
    }

    #[test]
    fn last_user_skips_tutor_messages() {
        let mut transcript = Transcript::default();
        transcript.push_at(Role::User, "first", String::new());
        transcript.push_at(Role::Tutor, "reply", String::new());
        assert_eq!(transcript.last_user().unwrap().content, "first");

        transcript.push_at(Role::User, "second", String::new());
        transcript.push_at(Role::Tutor, "reply", String::new());
        assert_eq!(transcript.last_user().unwrap().content, "second");
    }

    #[test]
    fn last_user_on_empty_is_none() {
        assert!(Transcript::default().last_user().is_none());
    }
}
