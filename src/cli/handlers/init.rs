use std::fs;

use crate::cli::commands::InitArgs;

const CONFIG_TEMPLATE: &str = r##"[study]
name = "{name}"

# --- Tutor ---
# Which backend answers `syl new` and `syl ask`.
# "offline" needs no network: template curricula, outline-guided replies.
[tutor]
mode = "offline"

# --- Sessions ---
# Managed by `syl new`. Edit freely; `file` is relative to study/.
#
# [[sessions]]
# id = "rust-basics"
# topic = "Rust Basics"
# level = "beginner"
# file = "sessions/rust-basics.md"
"##;

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let study_dir = cwd.join("study");

    if study_dir.exists() && !args.force {
        return Err("study/ already exists (use --force to reinitialize)".into());
    }

    let name = match args.name {
        Some(name) => name,
        None => cwd
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("study")
            .to_string(),
    };

    fs::create_dir_all(study_dir.join("sessions"))?;
    fs::write(
        study_dir.join("config.toml"),
        CONFIG_TEMPLATE.replace("{name}", &name),
    )?;

    println!("initialized study `{}` in {}", name, study_dir.display());
    Ok(())
}
