use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use story_core::SceneIndex;

pub fn run(story: &Path, save_dir: &Path, slot: &str) -> Result<(), String> {
    let content = super::load_story(story)?;
    let store = super::open_store(save_dir, slot)?;

    let Some(progress) = store.load() else {
        println!("  No saved progress in slot '{slot}'.");
        return Ok(());
    };

    let index = SceneIndex::build(&content);
    let location = match index.resolve(&content, &progress.position.scene_id) {
        Some(r) => format!(
            "Act {} \"{}\", Chapter {} \"{}\"",
            r.act.number, r.act.title, r.chapter.number, r.chapter.title
        ),
        None => "scene no longer exists; play will start over".to_string(),
    };
    let persona = progress
        .current_persona
        .as_ref()
        .map_or_else(|| "-".to_string(), |p| p.name.clone());
    let discovered = if progress.discovered_items.is_empty() {
        "-".to_string()
    } else {
        progress
            .discovered_items
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Scene".to_string(), progress.position.scene_id.clone()]);
    table.add_row(vec!["Location".to_string(), location]);
    table.add_row(vec!["Persona".to_string(), persona]);
    table.add_row(vec!["Choices".to_string(), progress.choices.len().to_string()]);
    table.add_row(vec!["Discovered".to_string(), discovered]);
    table.add_row(vec![
        "Started".to_string(),
        progress.started_at.format("%Y-%m-%d %H:%M").to_string(),
    ]);
    table.add_row(vec![
        "Last played".to_string(),
        progress.last_played_at.format("%Y-%m-%d %H:%M").to_string(),
    ]);

    println!("{table}");
    Ok(())
}
