// SPDX-License-Identifier: PMPL-1.0-or-later

//! Pass-through rules: strings that must reach every language unchanged.
//!
//! Numbers, e-mail addresses, links, money amounts and the organisation's
//! own name read the same in every dictionary, so wrapping them in a
//! placeholder tag would only create noise for reviewers.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Why a string was passed through untranslated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassThrough {
    Blank,
    Numeric,
    Email,
    Url,
    Currency,
    BrandName,
}

pub struct PassThroughRules {
    numeric: Regex,
    url: Regex,
    currency: Regex,
    brand_names: Vec<String>,
}

const NUMERIC: &str = r"^\d+(?:[.,]\d+)*$";
const URL: &str = r"(?i)^(?:https?|ftp|mailto|tel):";
const CURRENCY: &str = concat!(
    r"^(?:[$€£¥₦₹₵]|(?:USD|EUR|GBP|CHF)\s?)\d[\d,]*(?:\.\d+)?\s?(?:bn|[kKmMbB])?\+?$",
    r"|^\d[\d,]*(?:\.\d+)?\s?(?:bn|[kKmMbB])?\s?(?:[$€£¥₦₹₵]|USD|EUR|GBP|CHF)$",
);

impl PassThroughRules {
    pub fn new(brand_names: &[String]) -> Result<Self> {
        Ok(Self {
            numeric: Regex::new(NUMERIC).context("compiling numeric pattern")?,
            url: Regex::new(URL).context("compiling url pattern")?,
            currency: Regex::new(CURRENCY).context("compiling currency pattern")?,
            brand_names: brand_names
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        })
    }

    /// Returns the matching rule, or `None` when the text needs translating.
    pub fn classify(&self, text: &str) -> Option<PassThrough> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Some(PassThrough::Blank);
        }
        if self.numeric.is_match(trimmed) {
            return Some(PassThrough::Numeric);
        }
        if trimmed.contains('@') && trimmed.contains('.') {
            return Some(PassThrough::Email);
        }
        if self.url.is_match(trimmed) || trimmed.contains("://") {
            return Some(PassThrough::Url);
        }
        if self.currency.is_match(trimmed) {
            return Some(PassThrough::Currency);
        }
        if self.brand_names.iter().any(|name| name == trimmed) {
            return Some(PassThrough::BrandName);
        }
        None
    }

    pub fn brand_names(&self) -> &[String] {
        &self.brand_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> PassThroughRules {
        PassThroughRules::new(&["ACME Relief".to_string()]).unwrap()
    }

    #[test]
    fn numbers_pass_through() {
        let rules = rules();
        assert_eq!(rules.classify("2024"), Some(PassThrough::Numeric));
        assert_eq!(rules.classify("1,000"), Some(PassThrough::Numeric));
        assert_eq!(rules.classify("3.5"), Some(PassThrough::Numeric));
        assert_eq!(rules.classify("24/7"), None);
    }

    #[test]
    fn contact_details_pass_through() {
        let rules = rules();
        assert_eq!(rules.classify("acme@example.org"), Some(PassThrough::Email));
        assert_eq!(rules.classify("https://example.org/donate"), Some(PassThrough::Url));
        assert_eq!(rules.classify("mailto:info@example.org"), Some(PassThrough::Email));
        assert_eq!(rules.classify("tel:+123456"), Some(PassThrough::Url));
        assert_eq!(rules.classify("see ftp://mirror"), Some(PassThrough::Url));
    }

    #[test]
    fn money_amounts_pass_through() {
        let rules = rules();
        assert_eq!(rules.classify("$1,250"), Some(PassThrough::Currency));
        assert_eq!(rules.classify("€50"), Some(PassThrough::Currency));
        assert_eq!(rules.classify("1.5M USD"), Some(PassThrough::Currency));
        assert_eq!(rules.classify("$2.3M+"), Some(PassThrough::Currency));
        assert_eq!(rules.classify("Give $50"), None);
    }

    #[test]
    fn brand_name_is_exact() {
        let rules = rules();
        assert_eq!(rules.classify("ACME Relief"), Some(PassThrough::BrandName));
        assert_eq!(rules.classify("  ACME Relief "), Some(PassThrough::BrandName));
        assert_eq!(rules.classify("About ACME Relief"), None);
    }

    #[test]
    fn blank_strings_pass_through() {
        assert_eq!(rules().classify(""), Some(PassThrough::Blank));
        assert_eq!(rules().classify("   "), Some(PassThrough::Blank));
    }
}
