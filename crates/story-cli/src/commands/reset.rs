use std::path::Path;

pub fn run(save_dir: &Path, slot: &str) -> Result<(), String> {
    let mut store = super::open_store(save_dir, slot)?;
    if !store.has() {
        println!("  No saved progress in slot '{slot}'.");
        return Ok(());
    }
    store.clear();
    if store.has() {
        return Err(format!("could not remove saved progress in slot '{slot}'"));
    }
    println!("  Cleared saved progress in slot '{slot}'.");
    Ok(())
}
