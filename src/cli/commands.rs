use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "syl", about = concat!("[~] syllabus v", env!("CARGO_PKG_VERSION"), " - your curriculum is plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different study directory
    #[arg(short = 'C', long = "study-dir", global = true)]
    pub study_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new study in the current directory
    Init(InitArgs),
    /// Create a study session (tutor-generated or imported curriculum)
    New(NewArgs),
    /// List sessions and their completion
    List,
    /// Print a session's outline tree
    Outline(OutlineArgs),
    /// Show one section: its title and direct subtopics
    Show(SectionArgs),
    /// Show the next section to study
    Next(SessionArgs),
    /// Mark a section completed
    Done(SectionArgs),
    /// Clear all completion state for a session
    Reset(SessionArgs),
    /// Show completion statistics for a session
    Progress(SessionArgs),
    /// Print a session's tutor transcript
    Log(SessionArgs),
    /// Ask the tutor a question in a session
    Ask(AskArgs),
    /// Search session topics and section titles by regex
    Search(SearchArgs),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Study name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if study/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Session args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NewArgs {
    /// Topic to study
    pub topic: String,
    /// Expertise level: beginner, intermediate, advanced
    #[arg(long, default_value = "beginner")]
    pub level: String,
    /// Import curriculum from a markdown file instead of asking the tutor
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Args)]
pub struct SessionArgs {
    /// Session id (see `syl list`)
    pub session: String,
}

#[derive(Args)]
pub struct OutlineArgs {
    /// Session id (see `syl list`)
    pub session: String,
}

#[derive(Args)]
pub struct SectionArgs {
    /// Session id (see `syl list`)
    pub session: String,
    /// Section title (exact match, first hit in outline order)
    pub title: Option<String>,
    /// Address the section by node id instead of title
    #[arg(long)]
    pub id: Option<usize>,
}

#[derive(Args)]
pub struct AskArgs {
    /// Session id (see `syl list`)
    pub session: String,
    /// The question to ask
    pub message: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
    /// Limit search to one session
    #[arg(long)]
    pub session: Option<String>,
}
