// SPDX-License-Identifier: PMPL-1.0-or-later

//! Phrase lookup: resolve one English string for one target language.
//!
//! The table lives in a versioned data file (YAML or JSON) rather than in
//! code, so translators can extend it without touching the generator. A
//! default table is bundled into the binary and used when no file is given.
//!
//! Resolution order for a string:
//! 1. exact, case-insensitive match in the table with an entry for the language
//! 2. pass-through rules (numbers, e-mails, links, money, brand names)
//! 3. the placeholder marker `[XX] original text`
//!
//! [`Phrasebook::lookup`] is total: every input produces an output.

pub mod rules;

pub use rules::{PassThrough, PassThroughRules};

use crate::i18n::{self, is_valid_iso639_1};
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const BUNDLED_PHRASEBOOK: &str = include_str!("../../data/phrasebook.yaml");

/// On-disk layout of a phrasebook file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PhrasebookFile {
    version: u32,
    passthrough: PassThroughFile,
    /// Kept as a JSON map so document order survives for collision warnings
    phrases: serde_json::Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PassThroughFile {
    brand_names: Vec<String>,
}

/// How a single string was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Dictionary(String),
    PassThrough(PassThrough, String),
    Placeholder(String),
}

impl Resolution {
    pub fn text(&self) -> &str {
        match self {
            Resolution::Dictionary(s) | Resolution::PassThrough(_, s) | Resolution::Placeholder(s) => s,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Resolution::Dictionary(s) | Resolution::PassThrough(_, s) | Resolution::Placeholder(s) => s,
        }
    }
}

/// Where the loaded table came from, for reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasebookInfo {
    pub source: String,
    pub version: u32,
    pub digest: String,
    pub phrases: usize,
}

pub struct Phrasebook {
    info: PhrasebookInfo,
    /// normalised English phrase -> language code -> translation
    entries: HashMap<String, HashMap<String, String>>,
    rules: PassThroughRules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

impl Phrasebook {
    /// The table compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_PHRASEBOOK, FileFormat::Yaml, "bundled")
    }

    /// Load a table from disk; the extension selects YAML or JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let format = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => bail!(
                "unsupported phrasebook format for {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading phrasebook {}", path.display()))?;
        Self::parse(&content, format, &path.display().to_string())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content, FileFormat::Yaml, "inline")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse(content, FileFormat::Json, "inline")
    }

    fn parse(content: &str, format: FileFormat, source: &str) -> Result<Self> {
        let file: PhrasebookFile = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)
                .with_context(|| format!("parsing phrasebook {} as yaml", source))?,
            FileFormat::Json => serde_json::from_str(content)
                .with_context(|| format!("parsing phrasebook {} as json", source))?,
        };

        let mut entries: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (phrase, translations) in file.phrases {
            let key = normalize(&phrase);
            if key.is_empty() {
                bail!("phrasebook {} contains an empty phrase", source);
            }
            let translations: BTreeMap<String, String> = serde_json::from_value(translations)
                .with_context(|| format!("phrase '{}' in {} must map language codes to strings", phrase, source))?;

            let slot = entries.entry(key.clone()).or_default();
            for (lang, text) in translations {
                let lang = lang.trim().to_ascii_lowercase();
                if !is_valid_iso639_1(&lang) {
                    return Err(anyhow!(
                        "phrase '{}' in {} uses unknown language code '{}'",
                        phrase,
                        source,
                        lang
                    ));
                }
                if let Some(previous) = slot.insert(lang.clone(), text.clone()) {
                    if previous != text {
                        warn!(
                            phrase = %key,
                            lang = %lang,
                            "duplicate phrasebook entry, '{}' replaces '{}'",
                            text,
                            previous
                        );
                    }
                }
            }
        }

        let rules = PassThroughRules::new(&file.passthrough.brand_names)?;
        let info = PhrasebookInfo {
            source: source.to_string(),
            version: file.version,
            digest: hex::encode(Sha256::digest(content.as_bytes())),
            phrases: entries.len(),
        };
        debug!(source, version = info.version, phrases = info.phrases, "phrasebook loaded");

        Ok(Self {
            info,
            entries,
            rules,
        })
    }

    pub fn info(&self) -> &PhrasebookInfo {
        &self.info
    }

    pub fn rules(&self) -> &PassThroughRules {
        &self.rules
    }

    /// Table entry for `text` in `lang`, ignoring case and surrounding space.
    pub fn entry(&self, text: &str, lang: &str) -> Option<&str> {
        self.entries
            .get(&normalize(text))
            .and_then(|by_lang| by_lang.get(lang))
            .map(String::as_str)
            .filter(|translation| !translation.is_empty())
    }

    pub fn resolve(&self, text: &str, lang: &str) -> Resolution {
        if let Some(translation) = self.entry(text, lang) {
            return Resolution::Dictionary(translation.to_string());
        }
        if let Some(kind) = self.rules.classify(text) {
            return Resolution::PassThrough(kind, text.to_string());
        }
        Resolution::Placeholder(placeholder(lang, text))
    }

    pub fn lookup(&self, text: &str, lang: &str) -> String {
        self.resolve(text, lang).into_text()
    }
}

fn normalize(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

/// The "needs translation" marker: `[DE] Impact Measurement Framework`.
pub fn placeholder(lang: &str, text: &str) -> String {
    format!("[{}] {}", lang.to_ascii_uppercase(), text)
}

/// True when `text` starts with a `[XX]` tag naming a registry language.
///
/// Other uppercase tags such as `[PDF]` are ordinary text.
pub fn is_placeholder(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('[') else {
        return false;
    };
    match rest.find(']') {
        Some(end) if (2..=3).contains(&end) => {
            let tag = &rest[..end];
            tag.chars().all(|c| c.is_ascii_uppercase())
                && i18n::find(&tag.to_ascii_lowercase()).is_some()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
version: 7
passthrough:
  brand_names: ["ACME Relief"]
phrases:
  "Donate Now":
    de: "jetzt spenden"
    fr: "Faire un don"
  "learn more":
    de: "Mehr erfahren"
"#;

    #[test]
    fn dictionary_match_ignores_case() {
        let book = Phrasebook::from_yaml_str(TABLE).unwrap();
        assert_eq!(book.lookup("Donate Now", "de"), "jetzt spenden");
        assert_eq!(book.lookup("DONATE NOW", "de"), "jetzt spenden");
        assert_eq!(book.lookup(" Learn More ", "de"), "Mehr erfahren");
    }

    #[test]
    fn unknown_phrase_becomes_placeholder() {
        let book = Phrasebook::from_yaml_str(TABLE).unwrap();
        assert_eq!(
            book.lookup("Impact Measurement Framework", "de"),
            "[DE] Impact Measurement Framework"
        );
        // Entry exists, but not for this language
        assert_eq!(book.lookup("Donate Now", "ja"), "[JA] Donate Now");
    }

    #[test]
    fn passthrough_beats_placeholder() {
        let book = Phrasebook::from_yaml_str(TABLE).unwrap();
        for text in ["acme@example.org", "https://acme.org", "2024", "ACME Relief", "$1,250"] {
            assert_eq!(book.lookup(text, "sw"), text);
        }
        assert!(matches!(
            book.resolve("acme@example.org", "de"),
            Resolution::PassThrough(PassThrough::Email, _)
        ));
    }

    #[test]
    fn json_and_yaml_agree() {
        let json = r#"{"version": 7, "phrases": {"donate now": {"de": "jetzt spenden"}}}"#;
        let book = Phrasebook::from_json_str(json).unwrap();
        assert_eq!(book.info().version, 7);
        assert_eq!(book.lookup("Donate now", "de"), "jetzt spenden");
    }

    #[test]
    fn later_duplicate_wins() {
        let table = r#"
phrases:
  "Get Involved": { de: "Mitmachen" }
  "get involved": { de: "Engagieren Sie sich" }
"#;
        let book = Phrasebook::from_yaml_str(table).unwrap();
        assert_eq!(book.lookup("Get Involved", "de"), "Engagieren Sie sich");
        assert_eq!(book.info().phrases, 1);
    }

    #[test]
    fn invalid_language_code_rejected() {
        let table = "phrases:\n  donate: { xx: \"nope\" }\n";
        assert!(Phrasebook::from_yaml_str(table).is_err());
    }

    #[test]
    fn digest_tracks_content() {
        let a = Phrasebook::from_yaml_str(TABLE).unwrap();
        let b = Phrasebook::from_yaml_str(&format!("{}\n# edited\n", TABLE)).unwrap();
        assert_eq!(a.info().digest.len(), 64);
        assert_ne!(a.info().digest, b.info().digest);
    }

    #[test]
    fn bundled_table_loads() {
        let book = Phrasebook::bundled().unwrap();
        assert!(book.info().phrases > 0);
        assert_eq!(book.lookup("Donate Now", "de"), "Jetzt spenden");
        assert_eq!(book.lookup("BAOBAB HOPE", "fr"), "BAOBAB HOPE");
    }

    #[test]
    fn placeholder_detection() {
        assert!(is_placeholder("[DE] Donate"));
        assert!(is_placeholder("[AR] تبرع"));
        assert!(!is_placeholder("[PDF] Bericht herunterladen"));
        assert!(!is_placeholder("[OK] Weiter"));
        assert!(!is_placeholder("[XX] Donate"));
        assert!(!is_placeholder("Spenden"));
        assert!(!is_placeholder("[note] text"));
        assert!(!is_placeholder("[1] footnote"));
        assert_eq!(placeholder("de", "Donate"), "[DE] Donate");
    }
}
