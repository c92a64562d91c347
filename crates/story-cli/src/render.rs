//! Plain-text rendering of scenes, personas, and mindsets.

use colored::Colorize;
use story_core::{Act, Chapter, Constraint, MindsetContext, Persona, Scene, SceneBody};

pub fn scene(act: &Act, chapter: &Chapter, scene: &Scene) -> String {
    let mut out = String::new();
    let heading = format!(
        "Act {}: {} / Chapter {}: {}",
        act.number, act.title, chapter.number, chapter.title
    );
    out.push_str(&format!("{}\n", heading.dimmed()));
    if let Some(title) = &scene.title {
        out.push_str(&format!("{}\n", title.bold()));
    }
    out.push_str(&format!("{}\n", format!("[{}]", scene.id).dimmed()));

    match &scene.body {
        SceneBody::Narrative { text } => {
            for paragraph in text {
                out.push_str(&format!("\n{paragraph}\n"));
            }
        }
        SceneBody::Dialogue { lines } => {
            out.push('\n');
            for line in lines {
                out.push_str(&format!("{}: {}\n", line.speaker.bold(), line.text));
            }
        }
        SceneBody::Choice { prompt, choices } => {
            if !prompt.is_empty() {
                out.push_str(&format!("\n{prompt}\n"));
            }
            for (i, option) in choices.iter().enumerate() {
                out.push_str(&format!("  {}. {} ({})\n", i + 1, option.text, option.id.cyan()));
            }
        }
        SceneBody::Challenge {
            task,
            description,
            objectives,
        } => {
            out.push_str(&format!("\n{} {task}\n", "Challenge:".bold()));
            if !description.is_empty() {
                out.push_str(&format!("{description}\n"));
            }
            for objective in objectives {
                out.push_str(&format!("  - {objective}\n"));
            }
        }
    }

    let hint = if !scene.choices().is_empty() {
        "choose <option> to continue"
    } else if scene.next_scene.is_some() {
        "next to continue"
    } else {
        "end of this path"
    };
    out.push_str(&format!("\n{}", format!("({hint})").dimmed()));
    out
}

pub fn persona(persona: &Persona) -> String {
    let mut out = persona.name.bold().to_string();
    if !persona.years.is_empty() {
        out.push_str(&format!(" ({})", persona.years));
    }
    for (label, value) in [
        ("Era", &persona.era),
        ("Background", &persona.background),
        ("Motivation", &persona.motivation),
        ("Contribution", &persona.key_contribution),
    ] {
        if !value.is_empty() {
            out.push_str(&format!("\n{label}: {value}"));
        }
    }
    if !persona.quote.is_empty() {
        out.push_str(&format!("\n\"{}\"", persona.quote.italic()));
    }
    push_constraints(&mut out, &persona.constraints);
    out
}

pub fn mindset(mindset: &MindsetContext) -> String {
    let mut out = format!("{} {}", "Year:".bold(), mindset.year);
    for (label, items) in [
        ("Known", &mindset.known_technology),
        ("Unknown", &mindset.unknown_technology),
        ("Problems", &mindset.active_problems),
        ("Impossible", &mindset.impossibilities),
    ] {
        if !items.is_empty() {
            out.push_str(&format!("\n{label}: {}", items.join(", ")));
        }
    }
    push_constraints(&mut out, &mindset.constraints);
    let perspective = &mindset.perspective;
    if !perspective.limitation.is_empty() {
        out.push_str(&format!("\nLimitation: {}", perspective.limitation));
    }
    if !perspective.aspiration.is_empty() {
        out.push_str(&format!("\nAspiration: {}", perspective.aspiration));
    }
    out
}

fn push_constraints(out: &mut String, constraints: &[Constraint]) {
    for constraint in constraints {
        out.push_str(&format!("\n  [{}] {}", constraint.kind, constraint.description));
    }
}
