// SPDX-License-Identifier: PMPL-1.0-or-later

//! Status: read-only audit of a locale tree
//!
//! For every registry language, checks each namespace file for validity,
//! compares its key shape with the reference and counts placeholder
//! leaves. Languages are then bucketed into perfect / good / needs work /
//! broken so the rollout can be staged language by language.

use crate::config::MANIFEST_NAMESPACE;
use crate::generate::load_reference;
use crate::i18n::{self, LanguageInfo};
use crate::phrasebook::is_placeholder;
use crate::storage::{self, ReadOutcome};
use crate::types::{Direction, Node};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    Valid,
    /// Present but not valid JSON
    Invalid,
    /// Present but could not be read
    Unreadable,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Perfect,
    Good,
    NeedsWork,
    Broken,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Perfect => "perfect",
            Category::Good => "good",
            Category::NeedsWork => "needs work",
            Category::Broken => "broken",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceStatus {
    pub namespace: String,
    pub state: FileState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub leaves: usize,
    pub placeholders: usize,
    /// Reference key paths absent from this file
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_keys: Vec<String>,
    /// Key paths in this file the reference does not have
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageStatus {
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub direction: Direction,
    pub valid_files: usize,
    pub leaves: usize,
    pub placeholders: usize,
    pub quality: u8,
    pub shape_matches: bool,
    pub category: Category,
    pub namespaces: Vec<NamespaceStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub created_at: String,
    pub locales_dir: PathBuf,
    pub reference_language: String,
    pub reference_keys: usize,
    pub perfect: usize,
    pub good: usize,
    pub needs_work: usize,
    pub broken: usize,
    pub languages: Vec<LanguageStatus>,
    /// JSON files outside the registry languages or configured namespaces
    pub orphans: Vec<PathBuf>,
}

impl StatusReport {
    /// Share of languages that are perfect or good.
    pub fn readiness(&self) -> u8 {
        if self.languages.is_empty() {
            return 0;
        }
        let ready = self.perfect + self.good;
        ((ready as f64 / self.languages.len() as f64) * 100.0).round() as u8
    }
}

/// Audit every registry language under `locales_dir`.
pub fn run(locales_dir: &Path, reference: &str, namespaces: &[String]) -> Result<StatusReport> {
    let (reference_docs, _) = load_reference(locales_dir, reference, namespaces)?;
    let reference_shapes: HashMap<&str, _> = reference_docs
        .iter()
        .map(|(ns, node)| (ns.as_str(), node.key_paths()))
        .collect();
    let reference_keys: usize = reference_docs.iter().map(|(_, node)| node.string_leaf_count()).sum();

    let languages: Vec<LanguageStatus> = i18n::REGISTRY
        .iter()
        .map(|lang| audit_language(locales_dir, lang, reference, namespaces, &reference_shapes))
        .collect();

    let count = |category: Category| languages.iter().filter(|l| l.category == category).count();
    Ok(StatusReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        locales_dir: locales_dir.to_path_buf(),
        reference_language: reference.to_string(),
        reference_keys,
        perfect: count(Category::Perfect),
        good: count(Category::Good),
        needs_work: count(Category::NeedsWork),
        broken: count(Category::Broken),
        orphans: find_orphans(locales_dir, namespaces),
        languages,
    })
}

fn audit_language(
    locales_dir: &Path,
    lang: &LanguageInfo,
    reference: &str,
    namespaces: &[String],
    reference_shapes: &HashMap<&str, BTreeSet<String>>,
) -> LanguageStatus {
    let is_reference = lang.code == reference;
    let mut statuses = Vec::new();

    for namespace in namespaces {
        let path = storage::document_path(locales_dir, lang.code, namespace);
        // The reference language is never generated, so its manifest is optional
        if is_reference && namespace == MANIFEST_NAMESPACE && !path.exists() {
            continue;
        }
        let status = match storage::read_document(&path) {
            ReadOutcome::Missing => NamespaceStatus {
                namespace: namespace.clone(),
                state: FileState::Missing,
                error: None,
                leaves: 0,
                placeholders: 0,
                missing_keys: Vec::new(),
                extra_keys: Vec::new(),
            },
            ReadOutcome::Unreadable(err) => NamespaceStatus {
                namespace: namespace.clone(),
                state: FileState::Unreadable,
                error: Some(err),
                leaves: 0,
                placeholders: 0,
                missing_keys: Vec::new(),
                extra_keys: Vec::new(),
            },
            ReadOutcome::Malformed(err) => NamespaceStatus {
                namespace: namespace.clone(),
                state: FileState::Invalid,
                error: Some(err),
                leaves: 0,
                placeholders: 0,
                missing_keys: Vec::new(),
                extra_keys: Vec::new(),
            },
            ReadOutcome::Parsed(node) => {
                let (missing_keys, extra_keys) = match reference_shapes.get(namespace.as_str()) {
                    Some(expected) if namespace != MANIFEST_NAMESPACE => {
                        let actual = node.key_paths();
                        (
                            expected.difference(&actual).cloned().collect(),
                            actual.difference(expected).cloned().collect(),
                        )
                    }
                    _ => (Vec::new(), Vec::new()),
                };
                NamespaceStatus {
                    namespace: namespace.clone(),
                    state: FileState::Valid,
                    error: None,
                    leaves: node.string_leaf_count(),
                    placeholders: if is_reference { 0 } else { count_placeholders(&node) },
                    missing_keys,
                    extra_keys,
                }
            }
        };
        statuses.push(status);
    }

    let valid_files = statuses.iter().filter(|s| s.state == FileState::Valid).count();
    let leaves: usize = statuses.iter().map(|s| s.leaves).sum();
    let placeholders: usize = statuses.iter().map(|s| s.placeholders).sum();
    let quality = if leaves == 0 {
        0
    } else {
        (((leaves - placeholders) as f64 / leaves as f64) * 100.0).round() as u8
    };
    let shape_matches = statuses
        .iter()
        .all(|s| s.missing_keys.is_empty() && s.extra_keys.is_empty());

    LanguageStatus {
        code: lang.code.to_string(),
        name: lang.name.to_string(),
        native_name: lang.native_name.to_string(),
        direction: lang.direction,
        valid_files,
        leaves,
        placeholders,
        quality,
        shape_matches,
        category: categorize(valid_files == statuses.len(), valid_files, quality),
        namespaces: statuses,
    }
}

fn categorize(all_valid: bool, valid_files: usize, quality: u8) -> Category {
    if all_valid && quality >= 95 {
        Category::Perfect
    } else if all_valid && quality >= 80 {
        Category::Good
    } else if valid_files > 0 {
        Category::NeedsWork
    } else {
        Category::Broken
    }
}

fn count_placeholders(node: &Node) -> usize {
    let mut count = 0;
    node.for_each_leaf(|_, leaf| {
        if leaf.as_str().is_some_and(is_placeholder) {
            count += 1;
        }
    });
    count
}

/// JSON files two levels down that no registry language or configured
/// namespace accounts for. Hidden folders (backups) are not scanned.
fn find_orphans(locales_dir: &Path, namespaces: &[String]) -> Vec<PathBuf> {
    let mut orphans: Vec<PathBuf> = WalkDir::new(locales_dir)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| !is_hidden(path.strip_prefix(locales_dir).unwrap_or(path)))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .filter(|path| {
            let lang = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let namespace = path.file_stem().and_then(|n| n.to_str()).unwrap_or_default();
            i18n::find(lang).is_none() || !namespaces.iter().any(|ns| ns == namespace)
        })
        .collect();
    orphans.sort();
    orphans
}

fn is_hidden(relative: &Path) -> bool {
    relative
        .components()
        .any(|c| c.as_os_str().to_str().is_some_and(|name| name.starts_with('.')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_thresholds() {
        assert_eq!(categorize(true, 7, 100), Category::Perfect);
        assert_eq!(categorize(true, 7, 95), Category::Perfect);
        assert_eq!(categorize(true, 7, 80), Category::Good);
        assert_eq!(categorize(true, 7, 79), Category::NeedsWork);
        assert_eq!(categorize(false, 3, 100), Category::NeedsWork);
        assert_eq!(categorize(false, 0, 0), Category::Broken);
    }

    #[test]
    fn placeholders_are_counted_per_leaf() {
        let node = Node::from(serde_json::json!({
            "a": "[DE] Donate",
            "b": ["Spenden", "[DE] Give"],
            "c": 3
        }));
        assert_eq!(count_placeholders(&node), 2);
    }
}
