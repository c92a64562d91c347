//! The interactive play loop's command interpreter.

use std::cell::RefCell;
use std::rc::Rc;

use colored::Colorize;
use story_engine::{EngineResult, StoryEngine, StoryEvent};

use crate::render;

/// Wraps an engine and turns text commands into text responses.
pub struct PlaySession {
    engine: StoryEngine,
    notices: Rc<RefCell<Vec<String>>>,
}

impl PlaySession {
    pub fn new(mut engine: StoryEngine) -> Self {
        let notices = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notices);
        engine.subscribe(move |event| {
            let notice = match event {
                StoryEvent::PersonaChanged {
                    persona: Some(p), ..
                } => format!("You are now {}.", p.name),
                StoryEvent::MindsetChanged {
                    mindset: Some(m),
                    act_number,
                    ..
                } => format!("Act {act_number} begins. The year is {}.", m.year),
                _ => return,
            };
            sink.borrow_mut().push(notice);
        });
        Self { engine, notices }
    }

    /// Begin play: resume the saved game unless `fresh`, then show the scene.
    pub fn start(&mut self, fresh: bool) -> EngineResult<String> {
        let greeting = if fresh {
            self.engine.start_new_game()?;
            "Starting a new game."
        } else if self.engine.resume()? {
            "Resuming where you left off."
        } else {
            "Starting a new game."
        };
        Ok(format!("{}\n\n{}", greeting.bold(), self.after_move()))
    }

    pub fn engine(&self) -> &StoryEngine {
        &self.engine
    }

    /// Process one line of input.
    pub fn process(&mut self, input: &str) -> EngineResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "next" | "n" => {
                self.engine.next_scene()?;
                Ok(self.after_move())
            }
            "back" | "b" => {
                self.engine.previous_scene()?;
                Ok(self.after_move())
            }
            "go" => {
                if rest.is_empty() {
                    return Ok("Usage: go <scene-id>".to_string());
                }
                self.engine.go_to_scene(rest)?;
                Ok(self.after_move())
            }
            "choose" | "c" => self.do_choose(rest),
            "look" | "l" => Ok(self.look()),
            "discover" => self.do_discover(rest),
            "status" => Ok(self.do_status()),
            "persona" => Ok(self
                .engine
                .current_persona()
                .map_or_else(|| "No persona.".to_string(), render::persona)),
            "mindset" => Ok(self
                .engine
                .mindset()
                .map_or_else(|| "No mindset.".to_string(), |m| render::mindset(&m))),
            "restart" => {
                self.engine.start_new_game()?;
                Ok(self.after_move())
            }
            "reset" => {
                self.engine.clear_progress();
                Ok("Progress cleared. Type 'restart' to begin again.".to_string())
            }
            "help" => Ok(help_text()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Ok(format!(
                "Unknown command '{cmd}'. Type 'help' for commands."
            )),
        }
    }

    /// Render the current scene.
    pub fn look(&self) -> String {
        let Some(scene) = self.engine.current_scene() else {
            return "No game in progress. Type 'restart' to begin.".to_string();
        };
        match (self.engine.current_act(), self.engine.current_chapter()) {
            (Some(act), Some(chapter)) => render::scene(act, chapter, scene),
            _ => format!("[{}]", scene.id),
        }
    }

    fn after_move(&mut self) -> String {
        let notices: Vec<String> = self.notices.borrow_mut().drain(..).collect();
        let mut out = String::new();
        for notice in notices {
            out.push_str(&format!("{}\n\n", notice.green().bold()));
        }
        out.push_str(&self.look());
        out
    }

    fn do_choose(&mut self, rest: &str) -> EngineResult<String> {
        if rest.is_empty() {
            return Ok("Usage: choose <option-id | number>".to_string());
        }
        let choice_id = match rest.parse::<usize>() {
            Ok(n) if n >= 1 => self
                .engine
                .current_scene()
                .and_then(|s| s.choices().get(n - 1))
                .map_or_else(|| rest.to_string(), |c| c.id.clone()),
            _ => rest.to_string(),
        };
        self.engine.choose(&choice_id)?;
        Ok(self.after_move())
    }

    fn do_discover(&mut self, rest: &str) -> EngineResult<String> {
        if rest.is_empty() {
            return Ok("Usage: discover <item>".to_string());
        }
        if self.engine.add_discovered_item(rest)? {
            Ok(format!("Discovered '{rest}'."))
        } else {
            Ok(format!("Already discovered '{rest}'."))
        }
    }

    fn do_status(&self) -> String {
        let Some(progress) = self.engine.progress() else {
            return "No game in progress.".to_string();
        };
        let persona = self
            .engine
            .current_persona()
            .map_or("-", |p| p.name.as_str());
        format!(
            "{}\nPersona: {persona}\nChoices: {}\nDiscovered: {}\nHistory: {}",
            progress.position,
            progress.choices.len(),
            progress.discovered_items.len(),
            self.engine.history_len(),
        )
    }
}

fn help_text() -> String {
    [
        "Commands:",
        "  next, n              Continue to the next scene",
        "  back, b              Return to the previous scene",
        "  go <scene>           Jump to a scene by id",
        "  choose, c <option>   Pick an option by id or number",
        "  look, l              Show the current scene again",
        "  discover <item>      Mark an item as discovered",
        "  status               Show your progress",
        "  persona              Show who you are playing",
        "  mindset              Show what your era knows",
        "  restart              Start over from the beginning",
        "  reset                Delete saved progress",
        "  quit, q              Leave (progress is saved)",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_core::loader;

    const STORY: &str = r#"{
        "title": "Relays",
        "acts": [
            {
                "number": 1, "title": "Switches", "era": "1930s", "stage": "relay",
                "persona": { "id": "zuse", "name": "Konrad Zuse" },
                "mindset": { "personaId": "zuse", "year": 1936 },
                "chapters": [{
                    "number": 1, "title": "Living Room", "year": "1936",
                    "scenes": [
                        { "id": "s1", "type": "narrative", "text": ["Berlin."], "nextScene": "pick" },
                        { "id": "pick", "type": "choice", "prompt": "Build with?", "choices": [
                            { "id": "relay", "text": "Relays", "nextScene": "s2" },
                            { "id": "tube", "text": "Tubes", "nextScene": "s3" }
                        ] },
                        { "id": "s2", "type": "narrative", "text": ["Click."] }
                    ]
                }]
            },
            {
                "number": 2, "title": "Tubes", "era": "1940s", "stage": "vacuum",
                "persona": { "id": "eckert", "name": "J. Presper Eckert" },
                "mindset": { "personaId": "eckert", "year": 1945 },
                "chapters": [{
                    "number": 1, "title": "Moore School", "year": "1945",
                    "scenes": [
                        { "id": "s3", "type": "narrative", "text": ["Glow."] }
                    ]
                }]
            }
        ]
    }"#;

    fn session() -> PlaySession {
        colored::control::set_override(false);
        let mut engine = StoryEngine::in_memory();
        engine.initialize(loader::load_str(STORY).unwrap());
        engine.start_new_game().unwrap();
        PlaySession::new(engine)
    }

    #[test]
    fn start_announces_persona() {
        colored::control::set_override(false);
        let mut engine = StoryEngine::in_memory();
        engine.initialize(loader::load_str(STORY).unwrap());
        let mut s = PlaySession::new(engine);
        let out = s.start(false).unwrap();
        assert!(out.starts_with("Starting a new game."));
        assert!(out.contains("You are now Konrad Zuse."));
        assert!(out.contains("Berlin."));
    }

    #[test]
    fn next_and_back() {
        let mut s = session();
        let out = s.process("next").unwrap();
        assert!(out.contains("Build with?"));
        let out = s.process("b").unwrap();
        assert!(out.contains("Berlin."));
        assert!(s.process("back").is_err());
    }

    #[test]
    fn choose_by_number_crosses_act() {
        let mut s = session();
        s.process("n").unwrap();
        let out = s.process("choose 2").unwrap();
        assert!(out.contains("You are now J. Presper Eckert."));
        assert!(out.contains("The year is 1945."));
        assert!(out.contains("Glow."));
        assert_eq!(s.engine().current_scene_id(), Some("s3"));
    }

    #[test]
    fn choose_by_id() {
        let mut s = session();
        s.process("go pick").unwrap();
        s.process("choose relay").unwrap();
        assert_eq!(s.engine().current_scene_id(), Some("s2"));
        let choices = s.engine().progress().unwrap().choices.clone();
        assert_eq!(choices[0].choice_id, "relay");
    }

    #[test]
    fn unknown_choice_is_an_error() {
        let mut s = session();
        s.process("go pick").unwrap();
        let err = s.process("choose abacus").unwrap_err();
        assert!(err.to_string().contains("abacus"));
    }

    #[test]
    fn discover_twice() {
        let mut s = session();
        assert_eq!(s.process("discover gate-and").unwrap(), "Discovered 'gate-and'.");
        assert_eq!(
            s.process("discover gate-and").unwrap(),
            "Already discovered 'gate-and'."
        );
    }

    #[test]
    fn status_and_persona() {
        let mut s = session();
        let status = s.process("status").unwrap();
        assert!(status.contains("Act 1, Chapter 1, scene 's1'"));
        assert!(status.contains("Persona: Konrad Zuse"));
        assert!(s.process("persona").unwrap().contains("Konrad Zuse"));
        assert!(s.process("mindset").unwrap().contains("1936"));
    }

    #[test]
    fn reset_then_restart() {
        let mut s = session();
        s.process("next").unwrap();
        s.process("reset").unwrap();
        assert!(s.engine().progress().is_none());
        assert!(s.look().contains("No game in progress"));
        s.process("restart").unwrap();
        assert_eq!(s.engine().current_scene_id(), Some("s1"));
    }

    #[test]
    fn unknown_command_and_usage() {
        let mut s = session();
        assert!(s.process("dance").unwrap().contains("Unknown command 'dance'"));
        assert!(s.process("go").unwrap().starts_with("Usage"));
        assert!(s.process("help").unwrap().contains("choose"));
        assert_eq!(s.process("").unwrap(), "");
    }
}
