// SPDX-License-Identifier: PMPL-1.0-or-later

//! Filesystem helpers for namespace documents
//!
//! Layout: `<locales>/<lang>/<namespace>.json`, UTF-8, 2-space indented.
//! Backups of overwritten files go to `<backup root>/<stamp>/<lang>/<namespace>.json`.

use crate::types::Node;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Result of reading a document that may legitimately be absent or broken
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Missing,
    /// The file exists but could not be read (permissions, a directory in its place)
    Unreadable(String),
    /// The file was read but is not valid JSON
    Malformed(String),
    Parsed(Node),
}

impl ReadOutcome {
    pub fn into_node(self) -> Option<Node> {
        match self {
            ReadOutcome::Parsed(node) => Some(node),
            _ => None,
        }
    }
}

pub fn document_path(locales_dir: &Path, lang: &str, namespace: &str) -> PathBuf {
    locales_dir.join(lang).join(format!("{}.json", namespace))
}

/// Read and parse a document without failing. I/O errors other than
/// not-found come back as [`ReadOutcome::Unreadable`], syntax errors as
/// [`ReadOutcome::Malformed`].
pub fn read_document(path: &Path) -> ReadOutcome {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return ReadOutcome::Missing,
        Err(err) => return ReadOutcome::Unreadable(err.to_string()),
    };
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    match serde_json::from_str::<Node>(content) {
        Ok(node) => ReadOutcome::Parsed(node),
        Err(err) => ReadOutcome::Malformed(err.to_string()),
    }
}

/// Render a document the way it is stored on disk.
pub fn render_document(node: &Node) -> Result<String> {
    let mut json = serde_json::to_string_pretty(node).context("serializing document")?;
    json.push('\n');
    Ok(json)
}

pub fn write_document(path: &Path, node: &Node) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = render_document(node)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Re-read a written document and confirm it parses as JSON.
pub fn validate_document(path: &Path) -> Result<Node> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Timestamp naming one run's backup folder, with millisecond precision.
pub fn run_stamp() -> String {
    Utc::now().format("%Y%m%d%H%M%S%3f").to_string()
}

/// `base` if nothing exists there yet, otherwise the first free `base-N`.
pub fn unused_dir(base: PathBuf) -> PathBuf {
    if !base.exists() {
        return base;
    }
    let name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let free = (1u32..)
        .map(|n| base.with_file_name(format!("{}-{}", name, n)))
        .find(|candidate| !candidate.exists());
    free.unwrap_or(base)
}

/// Copy `source` into the run's backup folder, keeping `<lang>/<file>`.
pub fn backup_document(source: &Path, backup_dir: &Path, lang: &str) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .with_context(|| format!("{} has no file name", source.display()))?;
    let target_dir = backup_dir.join(lang);
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("creating {}", target_dir.display()))?;
    let target = target_dir.join(file_name);
    fs::copy(source, &target).with_context(|| {
        format!("copying {} to {}", source.display(), target.display())
    })?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_and_invalid_are_distinguished() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("common.json");
        assert_eq!(read_document(&path), ReadOutcome::Missing);

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_document(&path), ReadOutcome::Malformed(_)));

        fs::write(&path, "\u{feff}{\"a\": \"b\"}").unwrap();
        assert!(matches!(read_document(&path), ReadOutcome::Parsed(_)));
    }

    #[test]
    fn directory_in_place_of_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("common.json");
        fs::create_dir_all(&path).unwrap();
        assert!(matches!(read_document(&path), ReadOutcome::Unreadable(_)));
    }

    #[test]
    fn run_stamp_has_milliseconds() {
        let stamp = run_stamp();
        assert_eq!(stamp.len(), 17);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn unused_dir_adds_suffix_on_collision() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("20240101000000000");
        assert_eq!(unused_dir(base.clone()), base);

        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(dir.path().join("20240101000000000-1")).unwrap();
        assert_eq!(unused_dir(base), dir.path().join("20240101000000000-2"));
    }

    #[test]
    fn written_documents_use_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = document_path(dir.path(), "de", "common");
        let node = Node::from(json!({ "nav": { "home": "Startseite" } }));
        write_document(&path, &node).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"nav\": {\n    \"home\": \"Startseite\"\n  }\n}\n");
        assert_eq!(validate_document(&path).unwrap(), node);
    }

    #[test]
    fn backup_keeps_language_folder() {
        let dir = TempDir::new().unwrap();
        let source = document_path(dir.path(), "fr", "forms");
        write_document(&source, &Node::from(json!({ "a": "b" }))).unwrap();

        let backup_root = dir.path().join(".backups").join("20240101000000");
        let copy = backup_document(&source, &backup_root, "fr").unwrap();
        assert_eq!(copy, backup_root.join("fr").join("forms.json"));
        assert_eq!(fs::read(&copy).unwrap(), fs::read(&source).unwrap());
    }
}
