// SPDX-License-Identifier: PMPL-1.0-or-later

//! Generate: regenerate every target dictionary from the reference language
//!
//! Loads the reference namespaces, then for each target language merges
//! every namespace against what is already on disk, backs up the old file,
//! writes the new one and finally re-parses everything it touched. A
//! failure on one file is recorded and the run moves on; only an unreadable
//! reference aborts.

use crate::config::{Config, MANIFEST_NAMESPACE};
use crate::i18n::LanguageInfo;
use crate::manifest::{build_manifest, ManifestSettings};
use crate::merge::{merge_document, MergeStats};
use crate::phrasebook::Phrasebook;
use crate::storage::{self, ReadOutcome};
use crate::types::Node;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything a run needs, resolved from config and CLI flags
pub struct GenerateConfig {
    pub locales_dir: PathBuf,
    pub reference_language: String,
    pub namespaces: Vec<String>,
    pub languages: Vec<&'static LanguageInfo>,
    /// Backup folder for this run; `None` disables backups
    pub backup_dir: Option<PathBuf>,
    pub manifest: ManifestSettings,
}

impl GenerateConfig {
    pub fn from_config(config: &Config, only: Option<&[String]>, no_backup: bool) -> Result<Self> {
        let stamp = storage::run_stamp();
        Ok(Self {
            locales_dir: config.locales_dir.clone(),
            reference_language: config.reference_language.clone(),
            namespaces: config.namespaces.clone(),
            languages: config.target_languages(only)?,
            backup_dir: if no_backup {
                None
            } else {
                config.backup_dir(&stamp).map(storage::unused_dir)
            },
            manifest: config.manifest.clone(),
        })
    }
}

/// Outcome for a single target language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageOutcome {
    pub code: String,
    pub name: String,
    pub files_written: usize,
    pub files_failed: usize,
    pub stats: MergeStats,
    pub completion: u8,
}

/// Complete generate report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub created_at: String,
    pub locales_dir: PathBuf,
    pub reference_language: String,
    pub phrasebook_source: String,
    pub phrasebook_version: u32,
    pub phrasebook_digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
    pub languages_processed: usize,
    pub files_written: usize,
    pub validation_errors: usize,
    /// Existing files that were unreadable and regenerated from scratch
    pub repaired: Vec<String>,
    /// Reference namespaces that could not be loaded
    pub skipped_namespaces: Vec<String>,
    pub issues: Vec<String>,
    pub languages: Vec<LanguageOutcome>,
    pub success: bool,
}

/// Load the reference documents in namespace order.
///
/// A missing or broken namespace is skipped with a warning; the call only
/// fails when the reference directory is absent or nothing could be loaded.
pub fn load_reference(
    locales_dir: &Path,
    reference: &str,
    namespaces: &[String],
) -> Result<(Vec<(String, Node)>, Vec<String>)> {
    let reference_dir = locales_dir.join(reference);
    if !reference_dir.is_dir() {
        bail!(
            "reference locale directory not found: {}",
            reference_dir.display()
        );
    }

    let mut loaded = Vec::new();
    let mut skipped = Vec::new();
    for namespace in namespaces {
        if namespace == MANIFEST_NAMESPACE {
            continue;
        }
        let path = storage::document_path(locales_dir, reference, namespace);
        match storage::read_document(&path) {
            ReadOutcome::Parsed(node) => {
                debug!(namespace = %namespace, leaves = node.string_leaf_count(), "reference loaded");
                loaded.push((namespace.clone(), node));
            }
            ReadOutcome::Missing => {
                warn!(namespace = %namespace, "no reference source, skipping namespace");
                skipped.push(namespace.clone());
            }
            ReadOutcome::Malformed(err) => {
                warn!(namespace = %namespace, "reference source is not valid JSON, skipping: {}", err);
                skipped.push(namespace.clone());
            }
            ReadOutcome::Unreadable(err) => {
                warn!(namespace = %namespace, "reference source cannot be read, skipping: {}", err);
                skipped.push(namespace.clone());
            }
        }
    }

    if loaded.is_empty() {
        bail!(
            "no reference namespaces could be loaded from {}",
            reference_dir.display()
        );
    }
    Ok((loaded, skipped))
}

/// Run the generator across all configured languages and namespaces.
pub fn run(config: &GenerateConfig, phrasebook: &Phrasebook) -> Result<RunReport> {
    let (reference, skipped_namespaces) =
        load_reference(&config.locales_dir, &config.reference_language, &config.namespaces)?;
    let wants_manifest = config.namespaces.iter().any(|ns| ns == MANIFEST_NAMESPACE);

    let mut outcomes = Vec::new();
    let mut written: Vec<PathBuf> = Vec::new();
    let mut issues = Vec::new();
    let mut repaired = Vec::new();

    for lang in &config.languages {
        info!(lang = lang.code, "generating {}", lang.name);
        let mut outcome = LanguageOutcome {
            code: lang.code.to_string(),
            name: lang.name.to_string(),
            files_written: 0,
            files_failed: 0,
            stats: MergeStats::default(),
            completion: 0,
        };

        let lang_dir = config.locales_dir.join(lang.code);
        if let Err(err) = fs::create_dir_all(&lang_dir) {
            issues.push(format!("{}: cannot create directory: {}", lang.code, err));
            outcome.files_failed = reference.len() + usize::from(wants_manifest);
            outcomes.push(outcome);
            continue;
        }

        let mut generated = Vec::new();
        for (namespace, english) in &reference {
            let path = storage::document_path(&config.locales_dir, lang.code, namespace);
            let mut malformed = false;
            let existing = match storage::read_document(&path) {
                ReadOutcome::Malformed(err) => {
                    warn!(file = %path.display(), "existing translation is not valid JSON, regenerating: {}", err);
                    malformed = true;
                    None
                }
                ReadOutcome::Unreadable(err) => {
                    warn!(file = %path.display(), "existing translation cannot be read: {}", err);
                    None
                }
                other => other.into_node(),
            };

            let (document, stats) = merge_document(english, existing.as_ref(), lang.code, phrasebook);
            outcome.stats.absorb(&stats);

            match write_with_backup(&path, &document, config.backup_dir.as_deref(), lang.code) {
                Ok(()) => {
                    outcome.files_written += 1;
                    written.push(path);
                    generated.push(namespace.clone());
                    if malformed {
                        repaired.push(format!("{}/{}.json", lang.code, namespace));
                    }
                }
                Err(err) => {
                    outcome.files_failed += 1;
                    issues.push(format!("{}/{}.json write failed: {:#}", lang.code, namespace, err));
                }
            }
        }
        outcome.completion = outcome.stats.completion();

        if wants_manifest {
            let path = storage::document_path(&config.locales_dir, lang.code, MANIFEST_NAMESPACE);
            let manifest = build_manifest(lang, outcome.completion, &generated, &config.manifest);
            let result = manifest
                .to_node()
                .and_then(|node| write_with_backup(&path, &node, config.backup_dir.as_deref(), lang.code));
            match result {
                Ok(()) => {
                    outcome.files_written += 1;
                    written.push(path);
                }
                Err(err) => {
                    outcome.files_failed += 1;
                    issues.push(format!("{}/{}.json write failed: {:#}", lang.code, MANIFEST_NAMESPACE, err));
                }
            }
        }

        info!(
            lang = lang.code,
            written = outcome.files_written,
            placeholders = outcome.stats.placeholders,
            completion = outcome.completion,
            "language done"
        );
        outcomes.push(outcome);
    }

    let validation_errors = validate_written(&written);
    let languages_processed = outcomes.iter().filter(|o| o.files_written > 0).count();
    let files_written = outcomes.iter().map(|o| o.files_written).sum();
    let info = phrasebook.info();

    Ok(RunReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        locales_dir: config.locales_dir.clone(),
        reference_language: config.reference_language.clone(),
        phrasebook_source: info.source.clone(),
        phrasebook_version: info.version,
        phrasebook_digest: info.digest.clone(),
        backup_dir: config.backup_dir.clone(),
        languages_processed,
        files_written,
        validation_errors,
        repaired,
        skipped_namespaces,
        success: validation_errors == 0 && issues.is_empty(),
        issues,
        languages: outcomes,
    })
}

fn write_with_backup(path: &Path, document: &Node, backup_dir: Option<&Path>, lang: &str) -> Result<()> {
    if let Some(backup_dir) = backup_dir {
        if path.exists() {
            if let Err(err) = storage::backup_document(path, backup_dir, lang) {
                warn!(file = %path.display(), "could not back up: {:#}", err);
            }
        }
    }
    storage::write_document(path, document)
}

/// Re-parse every written file; returns the number that failed.
fn validate_written(paths: &[PathBuf]) -> usize {
    let mut errors = 0;
    for path in paths {
        if let Err(err) = storage::validate_document(path) {
            errors += 1;
            warn!(file = %path.display(), "validation failed: {:#}", err);
        }
    }
    debug!(files = paths.len(), errors, "validation finished");
    errors
}
