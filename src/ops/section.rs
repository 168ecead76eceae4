use crate::model::outline::{NodeId, Outline, OutlineNode};

/// Render a display block for the section with this exact title: the title
/// as a heading line plus a bullet list of direct children (not deeper
/// descendants). `None` when no node matches; a miss is not an error.
/// Pure read; never mutates the tree.
pub fn section_content(outline: &Outline, title: &str) -> Option<String> {
    outline.find_by_title(title).map(render_section)
}

/// Id-based variant of [`section_content`]
pub fn section_content_by_id(outline: &Outline, id: NodeId) -> Option<String> {
    outline.find_by_id(id).map(render_section)
}

fn render_section(node: &OutlineNode) -> String {
    let mut out = format!("# {}\n", node.title);
    if !node.children.is_empty() {
        out.push_str("\nSubtopics:\n");
        for child in &node.children {
            out.push_str(&format!("- {}\n", child.title));
        }
    }
    out
}
