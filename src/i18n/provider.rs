// SPDX-License-Identifier: PMPL-1.0-or-later

//! Runtime language provider.
//!
//! Loads the namespace documents for the active language and for the
//! reference language, then answers `t(key)` lookups for page components.
//! Missing or broken files are tolerated: the affected keys simply fall
//! back to the reference language, then to the key itself.

use super::languages::{self, LanguageInfo};
use crate::storage::{self, ReadOutcome};
use crate::types::{Direction, Node};
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct LanguageProvider {
    locales_dir: PathBuf,
    namespaces: Vec<String>,
    reference: &'static LanguageInfo,
    active: &'static LanguageInfo,
    active_docs: Vec<(String, Node)>,
    reference_docs: Vec<(String, Node)>,
}

impl LanguageProvider {
    /// Load `lang` plus the `reference` fallback language from `locales_dir`.
    pub fn load(locales_dir: &Path, lang: &str, reference: &str, namespaces: &[String]) -> Result<Self> {
        let active = resolve_language(lang)?;
        let reference = resolve_language(reference)?;
        let reference_docs = load_documents(locales_dir, reference.code, namespaces);
        let active_docs = if active.code == reference.code {
            Vec::new()
        } else {
            load_documents(locales_dir, active.code, namespaces)
        };
        Ok(Self {
            locales_dir: locales_dir.to_path_buf(),
            namespaces: namespaces.to_vec(),
            reference,
            active,
            active_docs,
            reference_docs,
        })
    }

    /// Switch the active language, reloading its documents.
    ///
    /// Codes outside the registry are rejected and leave the provider unchanged.
    pub fn set_language(&mut self, lang: &str) -> Result<()> {
        let next = resolve_language(lang)?;
        if next.code == self.active.code {
            return Ok(());
        }
        self.active_docs = if next.code == self.reference.code {
            Vec::new()
        } else {
            load_documents(&self.locales_dir, next.code, &self.namespaces)
        };
        self.active = next;
        Ok(())
    }

    pub fn language(&self) -> &'static LanguageInfo {
        self.active
    }

    pub fn reference(&self) -> &'static LanguageInfo {
        self.reference
    }

    pub fn direction(&self) -> Direction {
        self.active.direction
    }

    /// Translation for `key`, without falling back to the key itself.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        resolve_key(&self.active_docs, key).or_else(|| resolve_key(&self.reference_docs, key))
    }

    /// Translation for `key`; returns the key when nothing matches.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        match self.lookup(key) {
            Some(value) => value,
            None => {
                debug!(key, lang = self.active.code, "translation key not found");
                key
            }
        }
    }

    /// Like [`t`](Self::t), replacing `{{name}}` placeholders from `params`.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        interpolate(self.t(key), params)
    }
}

fn resolve_language(code: &str) -> Result<&'static LanguageInfo> {
    let code = code.trim().to_ascii_lowercase();
    languages::find(&code).ok_or_else(|| anyhow!("language '{}' is not supported", code))
}

fn load_documents(locales_dir: &Path, lang: &str, namespaces: &[String]) -> Vec<(String, Node)> {
    let mut docs = Vec::new();
    for namespace in namespaces {
        let path = storage::document_path(locales_dir, lang, namespace);
        match storage::read_document(&path) {
            ReadOutcome::Parsed(node) => docs.push((namespace.clone(), node)),
            ReadOutcome::Missing => debug!(file = %path.display(), "namespace not present"),
            ReadOutcome::Malformed(err) => warn!(file = %path.display(), "ignoring namespace with invalid JSON: {}", err),
            ReadOutcome::Unreadable(err) => warn!(file = %path.display(), "ignoring unreadable namespace: {}", err),
        }
    }
    docs
}

fn resolve_key<'a>(docs: &'a [(String, Node)], key: &str) -> Option<&'a str> {
    let mut segments = key.split('.');
    let first = segments.next()?;

    if let Some((_, doc)) = docs.iter().find(|(ns, _)| ns == first) {
        let rest: Vec<&str> = segments.collect();
        if !rest.is_empty() {
            return walk(doc, &rest);
        }
    }

    let all: Vec<&str> = key.split('.').collect();
    docs.iter().find_map(|(_, doc)| walk(doc, &all))
}

fn walk<'a>(doc: &'a Node, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(doc, |node, segment| node.child(segment))
        .and_then(Node::as_str)
}

/// Replace `{{name}}` markers with values from `params`.
///
/// Markers without a matching parameter are left in place.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        let is_name = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
        match params.iter().find(|(k, _)| is_name && *k == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}
