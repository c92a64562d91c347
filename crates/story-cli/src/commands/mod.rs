pub mod check;
pub mod play;
pub mod reset;
pub mod status;

use std::path::Path;

use colored::Colorize;
use story_core::{ContentError, ContentIssue, Severity, StoryContent, loader};
use story_engine::{EngineConfig, FileStore, ProgressStore, StoryEngine};

/// Load and validate a story file, printing any issues to stderr.
fn load_story(path: &Path) -> Result<StoryContent, String> {
    match loader::load_file(path) {
        Ok(content) => Ok(content),
        Err(ContentError::Invalid(issues)) => {
            print_issues(&issues);
            Err(format!("{} is not a valid story", path.display()))
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Print content issues to stderr with a trailing count.
fn print_issues(issues: &[ContentIssue]) {
    for issue in issues {
        let label = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        eprintln!("  {label}: {}", issue.message);
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warnings = issues.len() - errors;
    if errors > 0 || warnings > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}

fn check_slot(slot: &str) -> Result<(), String> {
    if FileStore::is_valid_key(slot) {
        Ok(())
    } else {
        Err(format!(
            "invalid slot '{slot}': slot names may only contain letters, digits, '-' and '_'"
        ))
    }
}

/// Build an engine over `content` that saves into `save_dir`.
fn open_engine(content: StoryContent, save_dir: &Path, slot: &str) -> Result<StoryEngine, String> {
    check_slot(slot)?;
    let config = EngineConfig::default().with_storage_key(slot);
    let mut engine = StoryEngine::new(FileStore::new(save_dir), config);
    engine.initialize(content);
    Ok(engine)
}

/// Open the progress record for `slot` without loading any story.
fn open_store(save_dir: &Path, slot: &str) -> Result<ProgressStore, String> {
    check_slot(slot)?;
    Ok(ProgressStore::new(FileStore::new(save_dir), slot))
}
