use crate::model::chat::{ChatMessage, Role, Transcript};

/// Parse a transcript file (`sessions/<id>.chat.md`).
///
/// Messages start with a `## <role> @ <stamp>` header; everything until the
/// next header is the message body. Text before the first header is skipped;
/// a header with an unknown role degrades to body text of the message above.
pub fn parse_chat_log(source: &str) -> Transcript {
    let mut transcript = Transcript::default();
    let mut current: Option<(Role, String, Vec<String>)> = None;

    for line in source.lines() {
        if let Some((role, sent_at)) = parse_header(line) {
            flush(&mut current, &mut transcript);
            current = Some((role, sent_at, Vec::new()));
            continue;
        }
        if let Some((_, _, body)) = current.as_mut() {
            body.push(line.to_string());
        }
    }
    flush(&mut current, &mut transcript);

    transcript
}

/// Serialize a transcript to the chat log format
pub fn serialize_chat_log(transcript: &Transcript) -> String {
    let mut out = String::new();
    for msg in &transcript.messages {
        if msg.sent_at.is_empty() {
            out.push_str(&format!("## {}\n\n", msg.role.as_str()));
        } else {
            out.push_str(&format!("## {} @ {}\n\n", msg.role.as_str(), msg.sent_at));
        }
        out.push_str(&msg.content);
        out.push_str("\n\n");
    }
    out
}

/// Parse a `## <role> @ <stamp>` header line
fn parse_header(line: &str) -> Option<(Role, String)> {
    let rest = line.strip_prefix("## ")?;
    let (name, stamp) = match rest.split_once(" @ ") {
        Some((name, stamp)) => (name.trim(), stamp.trim().to_string()),
        None => (rest.trim(), String::new()),
    };
    Role::from_name(name).map(|role| (role, stamp))
}

fn flush(current: &mut Option<(Role, String, Vec<String>)>, transcript: &mut Transcript) {
    if let Some((role, sent_at, mut body)) = current.take() {
        while body.first().is_some_and(|l| l.trim().is_empty()) {
            body.remove(0);
        }
        while body.last().is_some_and(|l| l.trim().is_empty()) {
            body.pop();
        }
        transcript.messages.push(ChatMessage {
            role,
            content: body.join("\n"),
            sent_at,
        });
    }
}
