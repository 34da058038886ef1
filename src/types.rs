// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for locale-sync
//!
//! A namespace document is modelled as a recursive [`Node`] tree instead of
//! raw `serde_json::Value`, so the merge code can match on the shapes it
//! actually cares about (string leaves, lists, maps) and treat every other
//! JSON scalar as opaque data that is copied through untouched.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// One node of a namespace document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Display string for one language
    Leaf(String),
    List(Vec<Node>),
    /// Object entries in document order
    Map(Vec<(String, Node)>),
    /// Numbers, booleans and null; never translated
    Scalar(Value),
}

impl Node {
    pub fn empty_map() -> Self {
        Node::Map(Vec::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Leaf(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    /// Look up a direct child of a map node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Resolve a child by map key, or by index when `self` is a list.
    pub fn child(&self, segment: &str) -> Option<&Node> {
        match self {
            Node::Map(_) => self.get(segment),
            Node::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Visit every terminal node (string leaves and scalars) with its key path.
    ///
    /// Paths use dots between object keys and `[i]` for list positions,
    /// e.g. `hero.buttons[1].label`.
    pub fn for_each_leaf<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &Node),
    {
        let mut path = String::new();
        self.walk_leaves(&mut path, &mut visit);
    }

    fn walk_leaves<F>(&self, path: &mut String, visit: &mut F)
    where
        F: FnMut(&str, &Node),
    {
        match self {
            Node::Leaf(_) | Node::Scalar(_) => visit(path, self),
            Node::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    let mark = path.len();
                    path.push_str(&format!("[{}]", index));
                    item.walk_leaves(path, visit);
                    path.truncate(mark);
                }
            }
            Node::Map(entries) => {
                for (key, value) in entries {
                    let mark = path.len();
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(key);
                    value.walk_leaves(path, visit);
                    path.truncate(mark);
                }
            }
        }
    }

    /// Set of key paths describing the document's shape.
    ///
    /// Empty lists and maps contribute their own path so that `{}` and a
    /// missing key are distinguishable.
    pub fn key_paths(&self) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        let mut path = String::new();
        self.collect_paths(&mut path, &mut paths);
        paths
    }

    fn collect_paths(&self, path: &mut String, paths: &mut BTreeSet<String>) {
        match self {
            Node::Leaf(_) | Node::Scalar(_) => {
                paths.insert(path.clone());
            }
            Node::List(items) => {
                if items.is_empty() {
                    paths.insert(format!("{}[]", path));
                }
                for (index, item) in items.iter().enumerate() {
                    let mark = path.len();
                    path.push_str(&format!("[{}]", index));
                    item.collect_paths(path, paths);
                    path.truncate(mark);
                }
            }
            Node::Map(entries) => {
                if entries.is_empty() {
                    paths.insert(format!("{}{{}}", path));
                }
                for (key, value) in entries {
                    let mark = path.len();
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(key);
                    value.collect_paths(path, paths);
                    path.truncate(mark);
                }
            }
        }
    }

    /// Number of string leaves in the tree.
    pub fn string_leaf_count(&self) -> usize {
        let mut count = 0;
        self.for_each_leaf(|_, node| {
            if matches!(node, Node::Leaf(_)) {
                count += 1;
            }
        });
        count
    }

    pub fn to_value(&self) -> Value {
        match self {
            Node::Leaf(s) => Value::String(s.clone()),
            Node::Scalar(v) => v.clone(),
            Node::List(items) => Value::Array(items.iter().map(Node::to_value).collect()),
            Node::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Node::Leaf(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Map(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect()),
            other => Node::Scalar(other),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Leaf(value.to_string())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(s) => serializer.serialize_str(s),
            Node::Scalar(v) => v.serialize(serializer),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}

/// Script direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ltr => write!(f, "ltr"),
            Direction::Rtl => write!(f, "rtl"),
        }
    }
}

/// Broad audience region, used for grouping in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Global,
    Africa,
    Asia,
    Europe,
    MiddleEast,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Region::Global => "global",
            Region::Africa => "africa",
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::MiddleEast => "middle-east",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Node {
        Node::from(json!({
            "nav": { "home": "Home", "about": "About" },
            "steps": ["One", { "label": "Two" }],
            "count": 3,
            "empty": {}
        }))
    }

    #[test]
    fn key_paths_cover_every_leaf() {
        let paths: Vec<String> = sample().key_paths().into_iter().collect();
        assert_eq!(
            paths,
            vec![
                "count",
                "empty{}",
                "nav.about",
                "nav.home",
                "steps[0]",
                "steps[1].label",
            ]
        );
    }

    #[test]
    fn document_order_survives_serialization() {
        let raw = r#"{"zeta":"z","alpha":"a","mid":{"b":"1","a":"2"}}"#;
        let node: Node = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&node).unwrap(), raw);
    }

    #[test]
    fn child_indexes_lists() {
        let node = sample();
        let label = node
            .child("steps")
            .and_then(|n| n.child("1"))
            .and_then(|n| n.child("label"))
            .and_then(Node::as_str);
        assert_eq!(label, Some("Two"));
        assert!(node.child("steps").and_then(|n| n.child("x")).is_none());
    }

    #[test]
    fn string_leaves_exclude_scalars() {
        assert_eq!(sample().string_leaf_count(), 4);
    }
}
