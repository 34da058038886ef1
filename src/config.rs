// SPDX-License-Identifier: PMPL-1.0-or-later

//! Optional `locale-sync.toml` configuration
//!
//! Every field has a default, so an empty file (or none at all) describes
//! the standard site layout. Command-line flags override what is loaded here.

use crate::i18n::{self, LanguageInfo};
use crate::manifest::ManifestSettings;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "locale-sync.toml";

/// Namespace whose document is generated from language metadata, not merged
pub const MANIFEST_NAMESPACE: &str = "manifest";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locales_dir: PathBuf,
    pub reference_language: String,
    pub namespaces: Vec<String>,
    /// Empty means every registry language except the reference
    pub languages: Vec<String>,
    pub phrasebook: Option<PathBuf>,
    pub report_path: PathBuf,
    pub backups: BackupConfig,
    pub manifest: ManifestSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub enabled: bool,
    /// Relative paths are resolved against `locales_dir`
    pub directory: PathBuf,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from(".backups"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from("locales"),
            reference_language: i18n::REFERENCE_LANGUAGE.to_string(),
            namespaces: [
                "actions",
                "common",
                "forms",
                MANIFEST_NAMESPACE,
                "misc",
                "navigation",
                "pages",
            ]
            .iter()
            .map(|ns| ns.to_string())
            .collect(),
            languages: Vec::new(),
            phrasebook: None,
            report_path: PathBuf::from("locale-sync-report.json"),
            backups: BackupConfig::default(),
            manifest: ManifestSettings::default(),
        }
    }
}

impl Config {
    /// Load `path`, or `locale-sync.toml` from the working directory when no
    /// path is given. Only an explicitly named file is required to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                bail!("config file not found: {}", path.display());
            }
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if i18n::find(&self.reference_language).is_none() {
            bail!(
                "reference language '{}' is not in the language registry",
                self.reference_language
            );
        }
        if self.namespaces.is_empty() {
            bail!("at least one namespace must be configured");
        }
        for namespace in &self.namespaces {
            if namespace.is_empty() || namespace.contains(['/', '\\', '.']) {
                bail!("invalid namespace name '{}'", namespace);
            }
        }
        Ok(())
    }

    /// Target languages for a run, honouring an optional override list.
    pub fn target_languages(&self, only: Option<&[String]>) -> Result<Vec<&'static LanguageInfo>> {
        let wanted = only.unwrap_or(&self.languages);
        if wanted.is_empty() {
            return Ok(i18n::targets(&self.reference_language).collect());
        }

        let mut targets = Vec::new();
        for code in wanted {
            let code = code.trim().to_ascii_lowercase();
            let lang = i18n::find(&code)
                .ok_or_else(|| anyhow!("unsupported language code '{}'", code))?;
            if lang.code == self.reference_language {
                bail!("'{}' is the reference language and cannot be a target", code);
            }
            if !targets.iter().any(|t: &&LanguageInfo| t.code == lang.code) {
                targets.push(lang);
            }
        }
        Ok(targets)
    }

    /// Backup folder for a run stamped `stamp`, or `None` when disabled.
    pub fn backup_dir(&self, stamp: &str) -> Option<PathBuf> {
        if !self.backups.enabled {
            return None;
        }
        let root = if self.backups.directory.is_absolute() {
            self.backups.directory.clone()
        } else {
            self.locales_dir.join(&self.backups.directory)
        };
        Some(root.join(stamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.namespaces.len(), 7);
        assert_eq!(config.target_languages(None).unwrap().len(), 50);
    }

    #[test]
    fn partial_file_overrides() {
        let config = Config::from_toml_str(
            r#"
locales_dir = "public/locales"
languages = ["de", "fr"]

[backups]
enabled = false

[manifest]
version = "3.1.0"
"#,
        )
        .unwrap();
        assert_eq!(config.locales_dir, PathBuf::from("public/locales"));
        assert!(config.backup_dir("x").is_none());
        assert_eq!(config.manifest.version, "3.1.0");
        assert_eq!(config.manifest.status, "active");
        let codes: Vec<&str> = config.target_languages(None).unwrap().iter().map(|l| l.code).collect();
        assert_eq!(codes, vec!["de", "fr"]);
    }

    #[test]
    fn override_list_wins_and_is_validated() {
        let config = Config::default();
        let only = vec!["JA".to_string(), "ja".to_string()];
        let langs = config.target_languages(Some(only.as_slice())).unwrap();
        assert_eq!(langs.len(), 1);
        assert!(config.target_languages(Some(&["xx".to_string()][..])).is_err());
        assert!(config.target_languages(Some(&["en".to_string()][..])).is_err());
    }

    #[test]
    fn unknown_reference_rejected() {
        assert!(Config::from_toml_str("reference_language = \"xx\"").is_err());
        assert!(Config::from_toml_str("namespaces = [\"../etc\"]").is_err());
    }

    #[test]
    fn backup_dir_is_relative_to_locales() {
        let config = Config::default();
        assert_eq!(
            config.backup_dir("20240101000000"),
            Some(PathBuf::from("locales/.backups/20240101000000"))
        );
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/locale-sync.toml"))).is_err());
    }
}
