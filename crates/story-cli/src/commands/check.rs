use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use story_core::{loader, validate};

pub fn run(story: &Path) -> Result<(), String> {
    let content = loader::parse_file(story).map_err(|e| e.to_string())?;
    let issues = validate::validate(&content);
    super::print_issues(&issues);
    if validate::has_errors(&issues) {
        return Err("validation failed with errors".into());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Act", "Title", "Era", "Chapters", "Scenes", "Persona"]);

    for act in &content.acts {
        let scenes: usize = act.chapters.iter().map(|c| c.scenes.len()).sum();
        let persona = act
            .persona
            .as_ref()
            .map_or_else(|| "-".to_string(), |p| p.name.clone());
        table.add_row(vec![
            act.number.to_string(),
            act.title.clone(),
            act.era.clone(),
            act.chapters.len().to_string(),
            scenes.to_string(),
            persona,
        ]);
    }

    println!("{table}");
    println!();
    println!("  All checks passed for '{}'.", content.title);
    println!(
        "  {} acts, {} chapters, {} scenes",
        content.acts.len(),
        content.chapter_count(),
        content.scene_count()
    );

    Ok(())
}
