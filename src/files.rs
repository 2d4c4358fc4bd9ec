#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use crate::error::{Result, StudioError};

/// Title and description that get written to the video and copied into every
/// localization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoText {
    pub title: String,
    pub description: String,
}

impl VideoText {
    pub fn load(title_path: &Path, description_path: &Path) -> Result<Self> {
        Ok(Self {
            title: load_text_file(title_path)?,
            description: load_text_file(description_path)?,
        })
    }
}

/// Reads a UTF-8 file and trims surrounding whitespace. A file that is empty
/// after trimming is an error.
pub fn load_text_file(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path).map_err(|err| StudioError::io(path, err))?;
    let content = raw.trim();
    if content.is_empty() {
        return Err(StudioError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(content.to_string())
}
