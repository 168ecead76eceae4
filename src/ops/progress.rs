use indexmap::IndexSet;

use crate::model::outline::{NodeId, Outline, OutlineNode};

/// Aggregate completion counts for an outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
}

impl ProgressStats {
    /// Completion percentage in [0, 100]; 0 for an empty outline
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.completed as f64 / self.total as f64
        }
    }
}

/// Mark the first pre-order node with this exact title as completed.
/// Returns the marked node's id, or `None` if no node matched (a miss is a
/// silent no-op, never an error).
pub fn mark_completed(outline: &mut Outline, title: &str) -> Option<NodeId> {
    let node = outline.find_by_title_mut(title)?;
    node.completed = true;
    Some(node.id)
}

/// Mark a node as completed by id. Returns false on a miss.
pub fn mark_completed_by_id(outline: &mut Outline, id: NodeId) -> bool {
    match outline.find_by_id_mut(id) {
        Some(node) => {
            node.completed = true;
            true
        }
        None => false,
    }
}

/// Count all nodes and the completed ones
pub fn completion_stats(outline: &Outline) -> ProgressStats {
    let mut stats = ProgressStats::default();
    outline.for_each(&mut |node| {
        stats.total += 1;
        if node.completed {
            stats.completed += 1;
        }
    });
    stats
}

/// Completion percentage over every node in the tree
pub fn completion_percentage(outline: &Outline) -> f64 {
    completion_stats(outline).percentage()
}

/// Ids of all completed nodes, in pre-order
pub fn completed_ids(outline: &Outline) -> IndexSet<NodeId> {
    let mut ids = IndexSet::new();
    outline.for_each(&mut |node| {
        if node.completed {
            ids.insert(node.id);
        }
    });
    ids
}

/// Re-apply a completion overlay to a freshly parsed outline. Ids that no
/// longer resolve are ignored (the lookup-miss rule).
pub fn apply_completed(outline: &mut Outline, ids: &IndexSet<NodeId>) {
    for &id in ids {
        mark_completed_by_id(outline, id);
    }
}

/// Clear completion on every node
pub fn clear_completed(outline: &mut Outline) {
    fn clear(nodes: &mut [OutlineNode]) {
        for node in nodes {
            node.completed = false;
            clear(&mut node.children);
        }
    }
    clear(&mut outline.roots);
}

/// The first incomplete node in pre-order: the next thing to study
pub fn next_section(outline: &Outline) -> Option<&OutlineNode> {
    outline.nodes().into_iter().find(|n| !n.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_outline;

    fn sample() -> Outline {
        parse_outline("# Topic\n- Sub1\n- Sub2")
    }

    #[test]
    fn test_percentage_on_empty_outline_is_zero() {
        assert_eq!(completion_percentage(&Outline::default()), 0.0);
    }

    #[test]
    fn test_mark_one_of_three() {
        let mut outline = sample();
        let id = mark_completed(&mut outline, "Sub1");
        assert!(id.is_some());
        let pct = completion_percentage(&outline);
        assert!((pct - 100.0 / 3.0).abs() < 1e-9, "got {}", pct);
    }

    #[test]
    fn test_mark_unknown_title_is_silent_noop() {
        let mut outline = sample();
        let before = completion_percentage(&outline);
        assert_eq!(mark_completed(&mut outline, "Nonexistent"), None);
        assert_eq!(completion_percentage(&outline), before);
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut outline = sample();
        mark_completed(&mut outline, "Sub1");
        mark_completed(&mut outline, "Sub1");
        assert_eq!(completion_stats(&outline).completed, 1);
    }

    #[test]
    fn test_full_completion_is_hundred() {
        let mut outline = sample();
        for title in ["Topic", "Sub1", "Sub2"] {
            mark_completed(&mut outline, title);
        }
        assert_eq!(completion_percentage(&outline), 100.0);
        assert!(next_section(&outline).is_none());
    }

    #[test]
    fn test_mark_by_id() {
        let mut outline = sample();
        assert!(mark_completed_by_id(&mut outline, NodeId(2)));
        assert!(!mark_completed_by_id(&mut outline, NodeId(99)));
        assert_eq!(completion_stats(&outline).completed, 1);
    }

    #[test]
    fn test_duplicate_titles_mark_first_only() {
        let mut outline = parse_outline("# Review\n- Review\n- Review");
        mark_completed(&mut outline, "Review");
        // The root (first pre-order match) is marked, not the children
        assert!(outline.roots[0].completed);
        assert_eq!(completion_stats(&outline).completed, 1);
        // The children stay individually addressable by id
        assert!(mark_completed_by_id(&mut outline, NodeId(2)));
        assert_eq!(completion_stats(&outline).completed, 2);
    }

    #[test]
    fn test_overlay_survives_reparse() {
        let source = "# Topic\n- Sub1\n- Sub2";
        let mut outline = parse_outline(source);
        mark_completed(&mut outline, "Sub2");
        let overlay = completed_ids(&outline);

        // Reparsing discards completion; re-applying the overlay restores it
        let mut fresh = parse_outline(source);
        assert_eq!(completion_stats(&fresh).completed, 0);
        apply_completed(&mut fresh, &overlay);
        assert_eq!(outline, fresh);
    }

    #[test]
    fn test_overlay_ignores_stale_ids() {
        let mut outline = sample();
        let mut overlay = IndexSet::new();
        overlay.insert(NodeId(1));
        overlay.insert(NodeId(42));
        apply_completed(&mut outline, &overlay);
        assert_eq!(completion_stats(&outline).completed, 1);
    }

    #[test]
    fn test_clear_completed() {
        let mut outline = sample();
        mark_completed(&mut outline, "Topic");
        mark_completed(&mut outline, "Sub2");
        clear_completed(&mut outline);
        assert_eq!(completion_stats(&outline).completed, 0);
    }

    #[test]
    fn test_next_section_follows_pre_order() {
        let mut outline = sample();
        assert_eq!(next_section(&outline).unwrap().title, "Topic");
        mark_completed(&mut outline, "Topic");
        assert_eq!(next_section(&outline).unwrap().title, "Sub1");
        mark_completed(&mut outline, "Sub1");
        assert_eq!(next_section(&outline).unwrap().title, "Sub2");
    }
}
