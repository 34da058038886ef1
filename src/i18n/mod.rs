// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation support for locale-sync.
//!
//! Two halves:
//!
//! - `languages`: the registry of supported languages with their
//!   descriptive metadata, plus ISO 639-1 code validation.
//! - `provider`: the runtime side, loading the namespace documents of
//!   the active language and resolving dotted keys with `t()`.
//!
//! ## Lookup rules
//!
//! Keys use dotted paths: `"navigation.nav.home"`. When the first segment
//! names a loaded namespace the rest of the path is resolved inside it;
//! otherwise every namespace is searched in configured order. Lookups fall
//! back to the reference language, and finally to the key itself
//! (fail-open, never panics).

mod languages;
mod provider;

pub use languages::{find, is_valid_iso639_1, targets, LanguageInfo, REFERENCE_LANGUAGE, REGISTRY};
pub use provider::{interpolate, LanguageProvider};
