// SPDX-License-Identifier: PMPL-1.0-or-later

//! Key-tree walker
//!
//! Produces a target-language document with exactly the shape of the
//! English reference. The walk is a single zip over two trees: the
//! reference drives the shape, the existing translation (if any) is
//! consulted position by position, and every string leaf is settled by a
//! caller-supplied resolver.

use crate::phrasebook::{is_placeholder, Phrasebook, Resolution};
use crate::types::Node;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Zip `reference` with `existing`, rebuilding the reference's shape.
///
/// `resolve` receives each English string leaf together with the value at
/// the same position in `existing` (when that value is a string). Scalars
/// are copied from the reference. Existing values that have no counterpart
/// in the reference are dropped.
pub fn zip_with<F>(reference: &Node, existing: Option<&Node>, resolve: &mut F) -> Node
where
    F: FnMut(&str, Option<&str>) -> String,
{
    match reference {
        Node::Leaf(english) => Node::Leaf(resolve(english, existing.and_then(Node::as_str))),
        Node::Scalar(value) => Node::Scalar(value.clone()),
        Node::List(items) => {
            let previous = existing.and_then(Node::as_list).unwrap_or(&[]);
            Node::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| zip_with(item, previous.get(index), resolve))
                    .collect(),
            )
        }
        Node::Map(entries) => {
            let previous: HashMap<&str, &Node> = match existing {
                Some(Node::Map(old)) => old.iter().map(|(k, v)| (k.as_str(), v)).collect(),
                _ => HashMap::new(),
            };
            Node::Map(
                entries
                    .iter()
                    .map(|(key, value)| {
                        let merged = zip_with(value, previous.get(key.as_str()).copied(), resolve);
                        (key.clone(), merged)
                    })
                    .collect(),
            )
        }
    }
}

/// Whether an existing translation should survive regeneration.
///
/// It must be non-blank, differ from the English source and carry no
/// placeholder tag.
pub fn keep_existing(existing: &str, english: &str) -> bool {
    !existing.trim().is_empty() && existing != english && !is_placeholder(existing)
}

/// Per-document tally of how leaves were settled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    pub kept: usize,
    pub dictionary: usize,
    pub passthrough: usize,
    pub placeholders: usize,
}

impl MergeStats {
    pub fn leaves(&self) -> usize {
        self.kept + self.dictionary + self.passthrough + self.placeholders
    }

    pub fn absorb(&mut self, other: &MergeStats) {
        self.kept += other.kept;
        self.dictionary += other.dictionary;
        self.passthrough += other.passthrough;
        self.placeholders += other.placeholders;
    }

    /// Share of leaves that are not placeholders, rounded to a whole percent.
    pub fn completion(&self) -> u8 {
        let leaves = self.leaves();
        if leaves == 0 {
            return 100;
        }
        let resolved = leaves - self.placeholders;
        ((resolved as f64 / leaves as f64) * 100.0).round() as u8
    }
}

/// Merge one namespace document for `lang`.
pub fn merge_document(
    reference: &Node,
    existing: Option<&Node>,
    lang: &str,
    phrasebook: &Phrasebook,
) -> (Node, MergeStats) {
    let mut stats = MergeStats::default();
    let document = zip_with(reference, existing, &mut |english, previous| {
        if let Some(previous) = previous.filter(|p| keep_existing(p, english)) {
            stats.kept += 1;
            return previous.to_string();
        }
        let resolution = phrasebook.resolve(english, lang);
        match resolution {
            Resolution::Dictionary(_) => stats.dictionary += 1,
            Resolution::PassThrough(..) => stats.passthrough += 1,
            Resolution::Placeholder(_) => stats.placeholders += 1,
        }
        resolution.into_text()
    });
    (document, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book() -> Phrasebook {
        Phrasebook::from_yaml_str(
            "passthrough: { brand_names: [\"ACME Relief\"] }\nphrases:\n  donate now: { de: \"jetzt spenden\" }\n",
        )
        .unwrap()
    }

    fn english() -> Node {
        Node::from(json!({
            "hero": { "title": "Donate Now", "subtitle": "Impact Measurement Framework" },
            "contact": "acme@example.org",
            "steps": ["Choose", "Give"],
            "year": 2024
        }))
    }

    #[test]
    fn fresh_merge_follows_lookup() {
        let (doc, stats) = merge_document(&english(), None, "de", &book());
        assert_eq!(
            doc.to_value(),
            json!({
                "hero": { "title": "jetzt spenden", "subtitle": "[DE] Impact Measurement Framework" },
                "contact": "acme@example.org",
                "steps": ["[DE] Choose", "[DE] Give"],
                "year": 2024
            })
        );
        assert_eq!(stats.dictionary, 1);
        assert_eq!(stats.passthrough, 1);
        assert_eq!(stats.placeholders, 3);
        assert_eq!(stats.completion(), 40);
    }

    #[test]
    fn good_translations_are_preserved() {
        let existing = Node::from(json!({
            "hero": { "title": "Spende jetzt!", "subtitle": "[DE] Impact Measurement Framework" },
            "steps": ["Wählen", "Give"],
            "stale": "removed upstream"
        }));
        let (doc, stats) = merge_document(&english(), Some(&existing), "de", &book());
        assert_eq!(doc.child("hero").and_then(|n| n.get("title")).and_then(Node::as_str), Some("Spende jetzt!"));
        assert_eq!(doc.get("steps").and_then(|n| n.child("0")).and_then(Node::as_str), Some("Wählen"));
        // equal to English: re-resolved
        assert_eq!(doc.get("steps").and_then(|n| n.child("1")).and_then(Node::as_str), Some("[DE] Give"));
        assert!(doc.get("stale").is_none());
        assert_eq!(stats.kept, 2);
    }

    #[test]
    fn shape_matches_reference_even_with_mismatched_existing() {
        let existing = Node::from(json!({ "hero": "flattened", "steps": { "0": "x" } }));
        let (doc, _) = merge_document(&english(), Some(&existing), "fr", &book());
        assert_eq!(doc.key_paths(), english().key_paths());
    }

    #[test]
    fn merge_is_idempotent() {
        let (first, _) = merge_document(&english(), None, "de", &book());
        let (second, _) = merge_document(&english(), Some(&first), "de", &book());
        assert_eq!(first, second);
    }

    #[test]
    fn keep_existing_rules() {
        assert!(keep_existing("Spenden", "Donate"));
        assert!(!keep_existing("Donate", "Donate"));
        assert!(!keep_existing("", "Donate"));
        assert!(!keep_existing("[DE] Donate", "Donate"));
    }

    #[test]
    fn bracketed_acronyms_are_translations() {
        let english = Node::from(json!({ "download": "[PDF] Download report" }));
        let existing = Node::from(json!({ "download": "[PDF] Bericht herunterladen" }));
        let (doc, stats) = merge_document(&english, Some(&existing), "de", &book());
        assert_eq!(
            doc.get("download").and_then(Node::as_str),
            Some("[PDF] Bericht herunterladen")
        );
        assert_eq!(stats.kept, 1);
    }

    #[test]
    fn empty_document_is_complete() {
        assert_eq!(MergeStats::default().completion(), 100);
    }
}
