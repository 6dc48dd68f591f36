//! A chapter file uploaded through the UI.
//! Held in memory until it is staged to disk for one initialize call.

use crate::error::{RagdeskError, Result};

/// Only JSON chapter files are accepted.
pub const CHAPTER_EXTENSION: &str = "json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFile {
    name: String,
    bytes: Vec<u8>,
}

impl ChapterFile {
    /// Build a chapter file, rejecting names that are empty, carry a path
    /// component, or do not end in `.json`.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, bytes: bytes.into() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RagdeskError::Upload("file name is empty".to_string()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(RagdeskError::Upload(format!(
            "file name must not contain a path: {name}"
        )));
    }
    let has_json_ext = std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(CHAPTER_EXTENSION))
        .unwrap_or(false);
    if !has_json_ext {
        return Err(RagdeskError::Upload(format!(
            "only .{CHAPTER_EXTENSION} chapter files are accepted: {name}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_json_name() {
        let f = ChapterFile::new("chapter_01.json", b"{}".to_vec()).unwrap();
        assert_eq!(f.name(), "chapter_01.json");
        assert_eq!(f.bytes(), b"{}");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(ChapterFile::new("INTRO.JSON", Vec::new()).is_ok());
    }

    #[test]
    fn test_rejects_path_components() {
        for name in ["../etc/passwd.json", "sub/dir.json", "..\\x.json", ".."] {
            let err = ChapterFile::new(name, Vec::new()).unwrap_err();
            assert!(err.is_user_error(), "{name} should be a user error");
        }
    }

    #[test]
    fn test_rejects_other_extensions() {
        assert!(ChapterFile::new("notes.txt", Vec::new()).is_err());
        assert!(ChapterFile::new("json", Vec::new()).is_err());
        assert!(ChapterFile::new("   ", Vec::new()).is_err());
    }
}
