//! Vendor-neutral prompt assembly for network-backed tutors.
//!
//! Nothing here talks to an API; these functions produce the text and the
//! role-tagged message list any chat-completion style backend consumes.

use crate::model::chat::{Role, Transcript};
use crate::model::session::ExpertiseLevel;

/// A role-tagged message ready for a chat-completion style backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: &'static str,
    pub content: String,
}

/// The request prompt for generating a structured curriculum
pub fn curriculum_prompt(topic: &str, level: ExpertiseLevel) -> String {
    format!(
        "You are an expert curriculum designer. Create a detailed, structured \
         curriculum that will help someone learn about the requested topic. \
         Topic: {}\nExpertise Level: {}\n\n\
         Format the curriculum in markdown with clear sections for:\n\
         1. Learning Objectives\n\
         2. Prerequisites\n\
         3. Main Topics (with subtopics)\n\
         4. Practical Exercises\n\
         5. Resources\n\n\
         Make sure the content is appropriate for the specified expertise level.",
        topic, level
    )
}

/// Default system prompt for tutoring chat
pub fn tutor_system_prompt() -> &'static str {
    "You are an expert tutor helping a student learn according to their \
     curriculum. Always reference the curriculum when appropriate, and guide \
     the student through their learning journey in a structured way. Be \
     encouraging and supportive, while ensuring accurate and in-depth \
     knowledge transfer."
}

/// Assemble the full message list for a chat turn: the system prompt, the
/// curriculum as context, then the transcript in order.
pub fn chat_context(transcript: &Transcript, curriculum: &str) -> Vec<PromptMessage> {
    let mut messages = vec![
        PromptMessage {
            role: "system",
            content: tutor_system_prompt().to_string(),
        },
        PromptMessage {
            role: "system",
            content: format!("Current curriculum:\n{}", curriculum),
        },
    ];
    for msg in &transcript.messages {
        let role = match msg.role {
            Role::User => "user",
            Role::Tutor => "assistant",
            Role::System => "system",
        };
        messages.push(PromptMessage {
            role,
            content: msg.content.clone(),
        });
    }
    messages
}
