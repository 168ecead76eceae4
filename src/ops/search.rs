use regex::Regex;

use crate::model::outline::NodeId;
use crate::model::study::Study;

/// Which field of a session matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Topic,
    Section,
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::Topic => "topic",
            MatchField::Section => "section",
        }
    }
}

/// A search hit in a session topic or outline section title
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub session_id: String,
    /// Set for section hits, absent for topic hits
    pub node_id: Option<NodeId>,
    pub field: MatchField,
    pub text: String,
}

/// Search session topics and section titles across the study.
///
/// If `session_filter` is `Some`, only that session is searched; otherwise
/// every loaded session is. Hits come back in session order, topic first,
/// then sections in pre-order.
pub fn search_study(study: &Study, re: &Regex, session_filter: Option<&str>) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    for (session_id, session) in &study.sessions {
        if let Some(filter) = session_filter
            && session_id != filter
        {
            continue;
        }

        if re.is_match(&session.topic) {
            hits.push(SearchHit {
                session_id: session_id.clone(),
                node_id: None,
                field: MatchField::Topic,
                text: session.topic.clone(),
            });
        }

        session.outline.for_each(&mut |node| {
            if re.is_match(&node.title) {
                hits.push(SearchHit {
                    session_id: session_id.clone(),
                    node_id: Some(node.id),
                    field: MatchField::Section,
                    text: node.title.clone(),
                });
            }
        });
    }

    hits
}
