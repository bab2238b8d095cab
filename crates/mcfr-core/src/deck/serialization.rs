use crate::domain::{DeckError, DeckResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Canonicalizes line endings and guarantees a trailing newline, so
/// repeated writes of the same deck are byte-identical.
pub fn normalize_deck_text(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

/// Writes one deck file: create the directory, then a single write of the
/// fully constructed text. Failures carry the target path and cause.
pub fn write_deck_file(dir: &Path, file_name: &str, content: &str) -> DeckResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| {
        DeckError::io_system(
            "IO.DECK_DIRECTORY",
            format!("failed to create deck directory '{}': {}", dir.display(), source),
        )
    })?;
    let path = dir.join(file_name);
    fs::write(&path, normalize_deck_text(content)).map_err(|source| {
        DeckError::io_system(
            "IO.DECK_WRITE",
            format!("failed to write deck file '{}': {}", path.display(), source),
        )
    })?;
    Ok(path)
}
