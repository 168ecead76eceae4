use serde::Serialize;

use crate::model::outline::{Outline, OutlineNode};
use crate::model::session::{ExpertiseLevel, Session};
use crate::ops::progress;
use crate::ops::search::SearchHit;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct NodeJson {
    pub id: usize,
    pub title: String,
    pub depth: usize,
    pub completed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeJson>,
}

#[derive(Serialize)]
pub struct SessionJson {
    pub id: String,
    pub topic: String,
    pub level: ExpertiseLevel,
    pub sections: usize,
    pub completed: usize,
    pub percent: f64,
}

#[derive(Serialize)]
pub struct OutlineJson {
    pub session: String,
    pub nodes: Vec<NodeJson>,
}

#[derive(Serialize)]
pub struct ProgressJson {
    pub session: String,
    pub total: usize,
    pub completed: usize,
    pub percent: f64,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub session: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<usize>,
    pub field: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn node_to_json(node: &OutlineNode) -> NodeJson {
    NodeJson {
        id: node.id.0,
        title: node.title.clone(),
        depth: node.depth,
        completed: node.completed,
        children: node.children.iter().map(node_to_json).collect(),
    }
}

pub fn session_to_json(id: &str, session: &Session) -> SessionJson {
    let stats = progress::completion_stats(&session.outline);
    SessionJson {
        id: id.to_string(),
        topic: session.topic.clone(),
        level: session.level,
        sections: stats.total,
        completed: stats.completed,
        percent: stats.percentage(),
    }
}

pub fn hit_to_json(hit: &SearchHit) -> SearchHitJson {
    SearchHitJson {
        session: hit.session_id.clone(),
        node: hit.node_id.map(|id| id.0),
        field: hit.field.as_str().to_string(),
        text: hit.text.clone(),
    }
}

// ---------------------------------------------------------------------------
// Display rendering
// ---------------------------------------------------------------------------

/// Render the outline as an indented checklist, one node per line:
/// `[x] \`3\` Title`, two spaces of indent per nesting step.
pub fn render_outline(outline: &Outline) -> String {
    fn render(nodes: &[OutlineNode], indent: usize, lines: &mut Vec<String>) {
        for node in nodes {
            let mark = if node.completed { 'x' } else { ' ' };
            lines.push(format!(
                "{}[{}] `{}` {}",
                "  ".repeat(indent),
                mark,
                node.id,
                node.title
            ));
            render(&node.children, indent + 1, lines);
        }
    }

    let mut lines = Vec::new();
    render(&outline.roots, 0, &mut lines);
    lines.join("\n")
}

/// One-line session summary for `syl list`
pub fn render_session_line(id: &str, session: &Session) -> String {
    let stats = progress::completion_stats(&session.outline);
    format!(
        "{}  {} ({}) {}/{} sections ({:.1}%)",
        id,
        session.topic,
        session.level,
        stats.completed,
        stats.total,
        stats.percentage()
    )
}
