// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-language manifest record
//!
//! Regenerated wholesale on every run. The record holds no wall-clock
//! timestamp, so a re-run over unchanged inputs rewrites identical bytes.

use crate::i18n::LanguageInfo;
use crate::types::{Direction, Node, Region};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings shared by every manifest of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestSettings {
    pub version: String,
    pub status: String,
    pub translated_by: String,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            version: "2.0.0".to_string(),
            status: "active".to_string(),
            translated_by: "BAOBAB HOPE Translation System".to_string(),
        }
    }
}

/// Written to `<lang>/manifest.json`; field names follow the site's camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageManifest {
    pub language: String,
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub direction: Direction,
    pub region: Region,
    pub version: String,
    pub status: String,
    pub completion: u8,
    pub namespaces: Vec<String>,
    pub translated_by: String,
}

impl LanguageManifest {
    pub fn to_node(&self) -> Result<Node> {
        let value = serde_json::to_value(self)
            .with_context(|| format!("serializing manifest for {}", self.code))?;
        Ok(Node::from(value))
    }
}

pub fn build_manifest(
    lang: &LanguageInfo,
    completion: u8,
    namespaces: &[String],
    settings: &ManifestSettings,
) -> LanguageManifest {
    LanguageManifest {
        language: lang.code.to_string(),
        code: lang.code.to_string(),
        name: lang.name.to_string(),
        native_name: lang.native_name.to_string(),
        direction: lang.direction,
        region: lang.region,
        version: settings.version.clone(),
        status: settings.status.clone(),
        completion,
        namespaces: namespaces.to_vec(),
        translated_by: settings.translated_by.clone(),
    }
}
