use clap::Parser;
use syllabus::cli::commands::Cli;
use syllabus::cli::handlers;

fn main() {
    // WARN by default; RUST_LOG=debug traces parsing, loads, and tutor calls
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
