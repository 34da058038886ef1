// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for the read-only status audit

use locale_sync::generate::{self, GenerateConfig};
use locale_sync::i18n;
use locale_sync::manifest::ManifestSettings;
use locale_sync::phrasebook::Phrasebook;
use locale_sync::status::{self, Category, FileState};
use locale_sync::storage;
use locale_sync::types::Node;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn namespaces() -> Vec<String> {
    vec!["common".to_string(), "manifest".to_string()]
}

fn write(locales: &Path, lang: &str, ns: &str, value: serde_json::Value) {
    storage::write_document(&storage::document_path(locales, lang, ns), &Node::from(value)).unwrap();
}

fn seed(locales: &Path) {
    write(locales, "en", "common", json!({ "title": "Donate", "body": "Every gift counts" }));
}

fn language<'a>(report: &'a status::StatusReport, code: &str) -> &'a status::LanguageStatus {
    report.languages.iter().find(|l| l.code == code).unwrap()
}

#[test]
fn test_status_buckets_languages() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    write(dir.path(), "de", "common", json!({ "title": "Spenden", "body": "Jede Gabe zählt" }));
    write(dir.path(), "de", "manifest", json!({ "code": "de" }));
    write(dir.path(), "fr", "common", json!({ "title": "Faire un don", "body": "[FR] Every gift counts" }));
    write(dir.path(), "fr", "manifest", json!({ "code": "fr" }));
    fs::create_dir_all(dir.path().join("es")).unwrap();
    fs::write(dir.path().join("es/common.json"), "not json").unwrap();

    let report = status::run(dir.path(), "en", &namespaces()).unwrap();
    assert_eq!(report.languages.len(), i18n::REGISTRY.len());
    assert_eq!(report.reference_keys, 2);

    let en = language(&report, "en");
    assert_eq!(en.category, Category::Perfect);
    assert_eq!(en.namespaces.len(), 1, "reference manifest is optional");

    assert_eq!(language(&report, "de").category, Category::Perfect);

    let fr = language(&report, "fr");
    assert_eq!(fr.quality, 67);
    assert_eq!(fr.category, Category::NeedsWork);

    let es = language(&report, "es");
    assert_eq!(es.namespaces[0].state, FileState::Invalid);
    assert_eq!(es.category, Category::Broken);

    assert_eq!(language(&report, "ja").category, Category::Broken);
    assert_eq!(report.perfect, 2);
    assert_eq!(report.needs_work, 1);
}

#[test]
fn test_status_reports_shape_drift() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    write(dir.path(), "it", "common", json!({ "title": "Dona", "extra": "Di più" }));
    write(dir.path(), "it", "manifest", json!({ "code": "it" }));

    let report = status::run(dir.path(), "en", &namespaces()).unwrap();
    let it = language(&report, "it");
    assert!(!it.shape_matches);
    assert_eq!(it.namespaces[0].missing_keys, vec!["body".to_string()]);
    assert_eq!(it.namespaces[0].extra_keys, vec!["extra".to_string()]);
}

#[test]
fn test_status_after_generate_has_no_broken_targets() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    let config = GenerateConfig {
        locales_dir: dir.path().to_path_buf(),
        reference_language: "en".to_string(),
        namespaces: namespaces(),
        languages: i18n::targets("en").collect(),
        backup_dir: None,
        manifest: ManifestSettings::default(),
    };
    generate::run(&config, &Phrasebook::bundled().unwrap()).unwrap();

    let report = status::run(dir.path(), "en", &namespaces()).unwrap();
    assert_eq!(report.broken, 0);
    assert!(report.languages.iter().all(|l| l.shape_matches));
    assert!(report.orphans.is_empty());
}

#[test]
fn test_status_lists_orphans_but_skips_backups() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    write(dir.path(), "en", "legacy", json!({ "a": "b" }));
    write(dir.path(), "xx", "common", json!({ "a": "b" }));
    write(dir.path(), ".backups/20240101000000", "common", json!({ "a": "b" }));

    let report = status::run(dir.path(), "en", &namespaces()).unwrap();
    assert_eq!(
        report.orphans,
        vec![
            dir.path().join("en/legacy.json"),
            dir.path().join("xx/common.json"),
        ]
    );
}

#[test]
fn test_status_requires_reference() {
    let dir = TempDir::new().unwrap();
    assert!(status::run(dir.path(), "en", &namespaces()).is_err());
}
