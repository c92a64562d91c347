//! Loading content from JSON.

use std::path::Path;

use crate::content::StoryContent;
use crate::error::{ContentError, ContentResult};
use crate::validate::{has_errors, validate};

/// Parse content from a JSON string without validating it.
pub fn parse_str(json: &str) -> ContentResult<StoryContent> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a content file without validating it.
pub fn parse_file(path: &Path) -> ContentResult<StoryContent> {
    let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&json)
}

/// Parse and validate content from a JSON string.
///
/// Warnings are logged; any error-severity issue fails the load.
pub fn load_str(json: &str) -> ContentResult<StoryContent> {
    checked(parse_str(json)?)
}

/// Read, parse, and validate a content file.
pub fn load_file(path: &Path) -> ContentResult<StoryContent> {
    checked(parse_file(path)?)
}

fn checked(content: StoryContent) -> ContentResult<StoryContent> {
    let issues = validate(&content);
    for issue in &issues {
        tracing::warn!(%issue, "content issue");
    }
    if has_errors(&issues) {
        return Err(ContentError::Invalid(issues));
    }
    tracing::debug!(
        acts = content.acts.len(),
        scenes = content.scene_count(),
        "loaded story content"
    );
    Ok(content)
}
