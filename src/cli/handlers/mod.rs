mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::progress_io;
use crate::io::study_io::{self, StudyError};
use crate::model::chat::Role;
use crate::model::config::SessionConfig;
use crate::model::outline::NodeId;
use crate::model::session::{ExpertiseLevel, Session, slugify, unique_id};
use crate::model::study::Study;
use crate::ops::{progress, search, section};
use crate::tutor;

/// Global override for the study directory (set by -C flag)
static STUDY_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_study_cwd()
    if let Some(ref dir) = cli.study_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        STUDY_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        Commands::Init(args) => cmd_init(args),
        Commands::New(args) => cmd_new(args, json),
        Commands::List => cmd_list(json),
        Commands::Outline(args) => cmd_outline(args, json),
        Commands::Show(args) => cmd_show(args),
        Commands::Next(args) => cmd_next(args, json),
        Commands::Done(args) => cmd_done(args, json),
        Commands::Reset(args) => cmd_reset(args),
        Commands::Progress(args) => cmd_progress(args, json),
        Commands::Log(args) => cmd_log(args, json),
        Commands::Ask(args) => cmd_ask(args, json),
        Commands::Search(args) => cmd_search(args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_study_cwd() -> Result<Study, StudyError> {
    let start = match STUDY_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(StudyError::IoError)?,
    };
    let root = study_io::discover_study(&start)?;
    study_io::load_study(&root)
}

/// Find a session by id
fn find_session<'a>(study: &'a Study, id: &str) -> Result<&'a Session, StudyError> {
    study
        .sessions
        .iter()
        .find(|(sid, _)| sid == id)
        .map(|(_, session)| session)
        .ok_or_else(|| StudyError::UnknownSession(id.to_string()))
}

/// Find a mutable session reference by id
fn find_session_mut<'a>(study: &'a mut Study, id: &str) -> Result<&'a mut Session, StudyError> {
    study
        .sessions
        .iter_mut()
        .find(|(sid, _)| sid == id)
        .map(|(_, session)| session)
        .ok_or_else(|| StudyError::UnknownSession(id.to_string()))
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

fn cmd_new(args: NewArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = ExpertiseLevel::parse(&args.level).ok_or_else(|| {
        format!(
            "unknown level '{}' (expected beginner, intermediate, or advanced)",
            args.level
        )
    })?;
    let study = load_study_cwd()?;

    let curriculum = match &args.from {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path, e))?,
        None => {
            let backend = tutor::tutor_for_mode(&study.config.tutor.mode)?;
            backend.curriculum(&args.topic, level)?
        }
    };

    let existing: Vec<String> = study
        .config
        .sessions
        .iter()
        .map(|s| s.id.clone())
        .collect();
    let id = unique_id(&slugify(&args.topic), &existing);
    let file = study_io::session_file(&id);

    study_io::save_curriculum(&study.study_dir, &file, &curriculum)?;

    let (_config, mut doc) = config_io::read_config(&study.study_dir)?;
    config_io::add_session_to_config(
        &mut doc,
        &SessionConfig {
            id: id.clone(),
            topic: args.topic.clone(),
            level: level.as_str().to_string(),
            file,
        },
    );
    config_io::write_config(&study.study_dir, &doc)?;

    let session = Session::from_curriculum(&id, &args.topic, level, curriculum);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&session_to_json(&id, &session))?
        );
    } else {
        println!(
            "created session `{}` with {} sections",
            id,
            session.outline.node_count()
        );
    }
    Ok(())
}

fn cmd_list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let study = load_study_cwd()?;

    if json {
        let sessions: Vec<SessionJson> = study
            .sessions
            .iter()
            .map(|(id, session)| session_to_json(id, session))
            .collect();
        println!("{}", serde_json::to_string_pretty(&sessions)?);
    } else if study.sessions.is_empty() {
        println!("no sessions yet (try `syl new <topic>`)");
    } else {
        for (id, session) in &study.sessions {
            println!("{}", render_session_line(id, session));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Outline commands
// ---------------------------------------------------------------------------

fn cmd_outline(args: OutlineArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let study = load_study_cwd()?;
    let session = find_session(&study, &args.session)?;

    if json {
        let out = OutlineJson {
            session: args.session.clone(),
            nodes: session.outline.roots.iter().map(node_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let rendered = render_outline(&session.outline);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }
    Ok(())
}

fn cmd_show(args: SectionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let study = load_study_cwd()?;
    let session = find_session(&study, &args.session)?;

    let content = match args.id {
        Some(raw) => section::section_content_by_id(&session.outline, NodeId(raw)),
        None => {
            let title = args
                .title
                .as_deref()
                .ok_or("specify a section title or --id <n>")?;
            section::section_content(&session.outline, title)
        }
    };

    // A miss prints nothing; it is not an error
    if let Some(content) = content {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_next(args: SessionArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let study = load_study_cwd()?;
    let session = find_session(&study, &args.session)?;

    match progress::next_section(&session.outline) {
        Some(node) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&node_to_json(node))?);
            } else {
                println!("[ ] `{}` {}", node.id, node.title);
            }
        }
        None => {
            if !json {
                println!("all sections completed");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress commands
// ---------------------------------------------------------------------------

fn cmd_done(args: SectionArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut study = load_study_cwd()?;
    let study_dir = study.study_dir.clone();
    let session_id = args.session.clone();
    let session = find_session_mut(&mut study, &args.session)?;

    let marked = match args.id {
        Some(raw) => {
            let id = NodeId(raw);
            progress::mark_completed_by_id(&mut session.outline, id).then_some(id)
        }
        None => {
            let title = args
                .title
                .as_deref()
                .ok_or("specify a section title or --id <n>")?;
            progress::mark_completed(&mut session.outline, title)
        }
    };

    if let Some(id) = marked {
        let mut overlay = progress_io::read_progress(&study_dir).unwrap_or_default();
        overlay
            .sessions
            .entry(session_id.clone())
            .or_default()
            .completed
            .insert(id);
        progress_io::write_progress(&study_dir, &overlay)?;
    }

    let stats = progress::completion_stats(&session.outline);
    if json {
        let out = ProgressJson {
            session: session_id,
            total: stats.total,
            completed: stats.completed,
            percent: stats.percentage(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match marked {
            Some(id) => println!(
                "marked `{}` done: {}/{} sections ({:.1}%)",
                id,
                stats.completed,
                stats.total,
                stats.percentage()
            ),
            // An unmatched section is a silent no-op, not an error
            None => println!("no matching section; nothing marked"),
        }
    }
    Ok(())
}

fn cmd_reset(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let study = load_study_cwd()?;
    find_session(&study, &args.session)?;

    let mut overlay = progress_io::read_progress(&study.study_dir).unwrap_or_default();
    overlay.sessions.remove(&args.session);
    progress_io::write_progress(&study.study_dir, &overlay)?;

    println!("cleared completion for `{}`", args.session);
    Ok(())
}

fn cmd_progress(args: SessionArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let study = load_study_cwd()?;
    let session = find_session(&study, &args.session)?;
    let stats = progress::completion_stats(&session.outline);

    if json {
        let out = ProgressJson {
            session: args.session.clone(),
            total: stats.total,
            completed: stats.completed,
            percent: stats.percentage(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "{}: {}/{} sections completed ({:.1}%)",
            args.session,
            stats.completed,
            stats.total,
            stats.percentage()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tutor commands
// ---------------------------------------------------------------------------

fn cmd_log(args: SessionArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let study = load_study_cwd()?;
    let session = find_session(&study, &args.session)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&session.transcript.messages)?
        );
    } else {
        for msg in &session.transcript.messages {
            if msg.sent_at.is_empty() {
                println!("[{}]", msg.role.as_str());
            } else {
                println!("[{} {}]", msg.role.as_str(), msg.sent_at);
            }
            println!("{}\n", msg.content);
        }
    }
    Ok(())
}

fn cmd_ask(args: AskArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut study = load_study_cwd()?;
    let study_dir = study.study_dir.clone();
    let mode = study.config.tutor.mode.clone();
    let session = find_session_mut(&mut study, &args.session)?;

    let backend = tutor::tutor_for_mode(&mode)?;
    session.transcript.push(Role::User, args.message.clone());
    let reply = backend.reply(&session.transcript, &session.curriculum)?;
    session.transcript.push(Role::Tutor, reply.clone());
    study_io::save_transcript(&study_dir, &args.session, &session.transcript)?;

    if json {
        if let Some(msg) = session.transcript.messages.last() {
            println!("{}", serde_json::to_string_pretty(msg)?);
        }
    } else {
        println!("{}", reply);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn cmd_search(args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let re = Regex::new(&args.pattern).map_err(|e| format!("invalid regex: {}", e))?;
    let study = load_study_cwd()?;
    let hits = search::search_study(&study, &re, args.session.as_deref());

    if json {
        let out: Vec<SearchHitJson> = hits.iter().map(hit_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if hits.is_empty() {
        println!("no matches");
    } else {
        for hit in &hits {
            match hit.node_id {
                Some(node) => println!("{}  `{}` {}", hit.session_id, node, hit.text),
                None => println!("{}  topic: {}", hit.session_id, hit.text),
            }
        }
    }
    Ok(())
}
