// SPDX-License-Identifier: PMPL-1.0-or-later

//! locale-sync: keeps a site's translation dictionaries in step with English.
//!
//! English namespace files under `<locales>/en/` are the source of truth.
//! Every other language gets the same key tree, with existing human
//! translations kept, phrasebook hits filled in and the rest marked with a
//! `[XX]` placeholder for a translator to pick up.
//!
//! - **generate**: merge every target language and write the run report.
//! - **status**: read-only audit bucketing languages by readiness.
//! - **i18n**: language registry and the runtime `t(key)` provider.

pub mod config;
pub mod generate;
pub mod i18n;
pub mod manifest;
pub mod merge;
pub mod phrasebook;
pub mod report;
pub mod status;
pub mod storage;
pub mod types;
