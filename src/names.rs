//! Newline-delimited name lists.
//!
//! Both the sources selector at the workspace root and the `dependencies`
//! file inside each working copy are plain lists with one project name per
//! line. Surrounding whitespace is trimmed and blank lines are skipped.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

/// Parses a name list from its text.
pub fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a name list, returning `None` when the file does not exist.
pub fn read_optional(path: &Path) -> Result<Option<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(parse(&content))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
