use tracing::debug;

use crate::model::chat::Transcript;
use crate::model::session::ExpertiseLevel;
use crate::ops::section;
use crate::parse::parse_outline;

use super::{Tutor, TutorError};

/// Deterministic tutor that needs no network backend.
///
/// Curricula come from a fixed template; replies are driven by the
/// curriculum outline. When the learner's question names a section, the
/// reply is that section's content block; otherwise it is an overview of the
/// top-level sections.
pub struct OfflineTutor;

impl Tutor for OfflineTutor {
    fn curriculum(&self, topic: &str, level: ExpertiseLevel) -> Result<String, TutorError> {
        debug!(topic, level = %level, "generating offline curriculum");
        Ok(format!(
            "\
# Learning Plan: {topic}
Level: {level}

## Objectives
1. Understand core concepts of {topic}
2. Apply knowledge in practical scenarios
3. Master advanced techniques

## Topics to Cover
1. Introduction to {topic}
   - Basic concepts
   - Fundamental principles
   - Getting started

2. Core Concepts
   - Key components
   - Best practices
   - Common patterns

3. Advanced Topics
   - Advanced techniques
   - Real-world applications
   - Expert-level concepts

4. Practical Applications
   - Hands-on projects
   - Case studies
   - Problem-solving exercises
"
        ))
    }

    fn reply(&self, transcript: &Transcript, curriculum: &str) -> Result<String, TutorError> {
        let outline = parse_outline(curriculum);
        let question = transcript
            .last_user()
            .map(|m| m.content.to_lowercase())
            .unwrap_or_default();
        debug!(sections = outline.node_count(), "generating offline reply");

        // A question that names a section gets that section's content block
        if !question.is_empty() {
            let named = outline
                .nodes()
                .into_iter()
                .find(|n| question.contains(&n.title.to_lowercase()));
            if let Some(node) = named
                && let Some(content) = section::section_content_by_id(&outline, node.id)
            {
                return Ok(content);
            }
        }

        if outline.is_empty() {
            return Ok(
                "This session has no curriculum outline yet. Import or generate one, \
                 then ask about any of its sections."
                    .to_string(),
            );
        }

        let topics: Vec<&str> = outline
            .roots
            .iter()
            .map(|root| root.title.as_str())
            .collect();
        Ok(format!(
            "This curriculum covers: {}. Ask about any section to go deeper.",
            topics.join(", ")
        ))
    }
}
