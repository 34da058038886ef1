// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for exported reports

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportOutputFormat {
    #[default]
    Json,
    Yaml,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            _ => None,
        }
    }

    /// Format implied by a file extension, if any.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::parse)
    }

    /// `path` with its extension swapped to this format's when they disagree.
    pub fn matching_path(&self, path: &std::path::Path) -> std::path::PathBuf {
        if Self::from_path(path) == Some(*self) {
            path.to_path_buf()
        } else {
            path.with_extension(self.extension())
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportOutputFormat::Json => "json",
            ReportOutputFormat::Yaml => "yaml",
        }
    }

    pub fn serialize<T: Serialize>(&self, report: &T) -> Result<String> {
        match self {
            ReportOutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(report)?;
                json.push('\n');
                Ok(json)
            }
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(ReportOutputFormat::parse("YML"), Some(ReportOutputFormat::Yaml));
        assert_eq!(ReportOutputFormat::parse("json"), Some(ReportOutputFormat::Json));
        assert_eq!(ReportOutputFormat::parse("ncl"), None);
        assert_eq!(
            ReportOutputFormat::from_path(Path::new("out/report.yaml")),
            Some(ReportOutputFormat::Yaml)
        );
    }

    #[test]
    fn matching_path_swaps_only_on_mismatch() {
        let yaml = ReportOutputFormat::Yaml;
        assert_eq!(
            yaml.matching_path(Path::new("locale-sync-report.json")),
            Path::new("locale-sync-report.yaml")
        );
        assert_eq!(yaml.matching_path(Path::new("out/run.yml")), Path::new("out/run.yml"));
        assert_eq!(
            ReportOutputFormat::Json.matching_path(Path::new("report")),
            Path::new("report.json")
        );
    }

    #[test]
    fn yaml_and_json_carry_same_fields() {
        let value = serde_json::json!({ "success": true, "files_written": 7 });
        let json = ReportOutputFormat::Json.serialize(&value).unwrap();
        let yaml = ReportOutputFormat::Yaml.serialize(&value).unwrap();
        assert!(json.ends_with("}\n"));
        assert!(yaml.contains("files_written: 7"));
    }
}
