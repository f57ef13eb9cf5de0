//! JSON parameter sources: a file named on the command line, or a document
//! piped on stdin.

use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Load typed parameters from `path` if given, otherwise from piped stdin.
///
/// Returns `Ok(None)` when there is no file and stdin is a TTY or empty, so
/// the caller can fall back to individual flags.
pub fn load_json<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn Error>> {
    match path {
        Some(path) => read_json_file(path).map(Some),
        None => read_piped_stdin(),
    }
}

fn read_json_file<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn Error>> {
    let file = resolve_path(path)?;
    let contents = fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;
    parse_json(&contents, &format!("'{}'", file.display()))
}

fn read_piped_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_json(trimmed, "stdin").map(Some)
}

fn parse_json<T: DeserializeOwned>(contents: &str, source: &str) -> Result<T, Box<dyn Error>> {
    serde_json::from_str(contents).map_err(|e| format!("Failed to parse {source}: {e}").into())
}

/// Absolute path of an existing regular file; relative paths resolve against
/// the working directory.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }
    Ok(resolved)
}
