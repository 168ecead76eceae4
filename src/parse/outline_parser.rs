use tracing::debug;

use crate::model::outline::{NodeId, Outline, OutlineNode};

/// Parse curriculum text into an outline tree.
///
/// The input is markdown-ish: headings, bullets, and ordinal lists carry the
/// structure, with indentation driving a running nesting level. Malformed or
/// unstructured input never fails; it degrades to a flat list of roots.
pub fn parse_outline(source: &str) -> Outline {
    struct Pending {
        title: String,
        depth: usize,
        parent: Option<usize>,
    }

    let mut arena: Vec<Pending> = Vec::new();
    let mut path = AncestorPath::default();
    let mut current_level = 1usize;
    let mut prev_indent: Option<usize> = None;

    for line in source.lines() {
        // Blank lines are skipped and do not affect indentation tracking
        if line.trim().is_empty() {
            continue;
        }

        let indent = count_indent(line);
        if let Some(prev) = prev_indent {
            if indent > prev {
                current_level += 1;
            } else if indent < prev {
                current_level = current_level.saturating_sub(1).max(1);
            }
        }
        prev_indent = Some(indent);

        let (kind, title) = classify(line.trim());
        let level = match kind {
            LineKind::Heading => {
                // A heading is always top-level, and the lines that follow at
                // unchanged indentation nest under it.
                current_level = 2;
                1
            }
            _ => current_level,
        };

        // Markers with no text (a bare `#` or `-`) carry no section
        if title.is_empty() {
            continue;
        }

        let idx = arena.len();
        if level == 1 || path.is_empty() {
            arena.push(Pending {
                title,
                depth: 1,
                parent: None,
            });
            path.reset(1, idx);
        } else if let Some(parent) = path.ancestor_for(level) {
            arena.push(Pending {
                title,
                depth: level,
                parent: Some(parent),
            });
            path.record(level, idx);
        } else {
            // No ancestor recorded at any shallower level: degrade to a
            // fresh root and discard the nesting context built so far.
            arena.push(Pending {
                title,
                depth: level,
                parent: None,
            });
            path.reset(level, idx);
        }
    }

    // Assemble the tree. Parents always precede children in the arena.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
    let mut root_idxs = Vec::new();
    for (idx, pending) in arena.iter().enumerate() {
        match pending.parent {
            Some(parent) => children[parent].push(idx),
            None => root_idxs.push(idx),
        }
    }

    fn build(idx: usize, arena: &[Pending], children: &[Vec<usize>]) -> OutlineNode {
        let mut node = OutlineNode::new(NodeId(idx), arena[idx].title.clone(), arena[idx].depth);
        node.children = children[idx]
            .iter()
            .map(|&child| build(child, arena, children))
            .collect();
        node
    }

    let roots: Vec<OutlineNode> = root_idxs
        .into_iter()
        .map(|idx| build(idx, &arena, &children))
        .collect();

    debug!(nodes = arena.len(), roots = roots.len(), "parsed outline");
    Outline { roots }
}

/// Level-indexed record of the most recently created node at each nesting
/// depth, used to attach new nodes to the correct parent. Kept local to a
/// single parse; `reset` models the documented fallback-to-root behavior.
#[derive(Debug, Default)]
struct AncestorPath {
    entries: Vec<(usize, usize)>,
}

impl AncestorPath {
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `node` as the most recent at `level`, replacing any previous
    /// entry for that level. Deeper entries are left in place.
    fn record(&mut self, level: usize, node: usize) {
        self.entries.retain(|(l, _)| *l != level);
        self.entries.push((level, node));
    }

    /// Nearest recorded ancestor for a node at `level`: scan levels
    /// `level-1, level-2, …, 1` and return the first hit.
    fn ancestor_for(&self, level: usize) -> Option<usize> {
        (1..level)
            .rev()
            .find_map(|l| self.entries.iter().find(|(el, _)| *el == l).map(|(_, n)| *n))
    }

    /// Drop all recorded context and start over with a single entry
    fn reset(&mut self, level: usize, node: usize) {
        self.entries.clear();
        self.entries.push((level, node));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Heading,
    Bullet,
    Ordinal,
    Text,
}

/// Classify a trimmed line and strip its marker
fn classify(text: &str) -> (LineKind, String) {
    if let Some(rest) = text.strip_prefix('#') {
        let rest = rest.trim_start_matches('#');
        return (LineKind::Heading, rest.trim().to_string());
    }
    if let Some(rest) = text.strip_prefix("- ").or_else(|| text.strip_prefix("* ")) {
        return (LineKind::Bullet, rest.trim().to_string());
    }
    if text == "-" || text == "*" {
        return (LineKind::Bullet, String::new());
    }
    if let Some(rest) = strip_ordinal(text) {
        return (LineKind::Ordinal, rest);
    }
    (LineKind::Text, text.to_string())
}

/// Strip an `N.` ordinal prefix, if present
fn strip_ordinal(text: &str) -> Option<String> {
    let digits_end = text.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let rest = text[digits_end..].strip_prefix('.')?;
    Some(rest.trim().to_string())
}

/// Count leading whitespace (spaces and tabs)
fn count_indent(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}
