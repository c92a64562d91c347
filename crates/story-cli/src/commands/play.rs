use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use crate::session::PlaySession;

pub fn run(story: &Path, save_dir: &Path, slot: &str, new: bool) -> Result<(), String> {
    let content = super::load_story(story)?;
    let title = content.title.clone();
    let engine = super::open_engine(content, save_dir, slot)?;
    println!("  {} {title}", "Playing".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let mut session = PlaySession::new(engine);
    let opening = session
        .start(new)
        .map_err(|e| format!("failed to start: {e}"))?;
    println!("{opening}\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        tracing::debug!(command = %input, "play command");

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    if let Some(progress) = session.engine().progress() {
        println!("  Progress saved at {}.", progress.position);
    }

    Ok(())
}
