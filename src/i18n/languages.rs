// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language registry and ISO 639-1 code validation.
//!
//! The registry lists every language the site ships dictionaries for: the
//! English reference plus fifty targets. Each entry carries the descriptive
//! metadata that ends up in the generated manifest.
//!
//! Reference: <https://www.loc.gov/standards/iso639-2/php/code_list.php>

use crate::types::{Direction, Region};
use serde::Serialize;

/// Descriptive metadata for one supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub direction: Direction,
    pub region: Region,
}

impl LanguageInfo {
    const fn new(
        code: &'static str,
        name: &'static str,
        native_name: &'static str,
        direction: Direction,
        region: Region,
    ) -> Self {
        Self {
            code,
            name,
            native_name,
            direction,
            region,
        }
    }
}

/// Code of the language every other dictionary is derived from.
pub const REFERENCE_LANGUAGE: &str = "en";

/// All supported languages, sorted by code with English first.
pub const REGISTRY: &[LanguageInfo] = &[
    LanguageInfo::new("en", "English", "English", Direction::Ltr, Region::Global),
    LanguageInfo::new("af", "Afrikaans", "Afrikaans", Direction::Ltr, Region::Africa),
    LanguageInfo::new("am", "Amharic", "አማርኛ", Direction::Ltr, Region::Africa),
    LanguageInfo::new("ar", "Arabic", "العربية", Direction::Rtl, Region::MiddleEast),
    LanguageInfo::new("bg", "Bulgarian", "Български", Direction::Ltr, Region::Europe),
    LanguageInfo::new("bn", "Bengali", "বাংলা", Direction::Ltr, Region::Asia),
    LanguageInfo::new("cs", "Czech", "Čeština", Direction::Ltr, Region::Europe),
    LanguageInfo::new("cy", "Welsh", "Cymraeg", Direction::Ltr, Region::Europe),
    LanguageInfo::new("da", "Danish", "Dansk", Direction::Ltr, Region::Europe),
    LanguageInfo::new("de", "German", "Deutsch", Direction::Ltr, Region::Europe),
    LanguageInfo::new("el", "Greek", "Ελληνικά", Direction::Ltr, Region::Europe),
    LanguageInfo::new("es", "Spanish", "Español", Direction::Ltr, Region::Europe),
    LanguageInfo::new("et", "Estonian", "Eesti", Direction::Ltr, Region::Europe),
    LanguageInfo::new("fa", "Persian", "فارسی", Direction::Rtl, Region::MiddleEast),
    LanguageInfo::new("fi", "Finnish", "Suomi", Direction::Ltr, Region::Europe),
    LanguageInfo::new("fr", "French", "Français", Direction::Ltr, Region::Europe),
    LanguageInfo::new("ga", "Irish", "Gaeilge", Direction::Ltr, Region::Europe),
    LanguageInfo::new("ha", "Hausa", "Hausa", Direction::Ltr, Region::Africa),
    LanguageInfo::new("he", "Hebrew", "עברית", Direction::Rtl, Region::MiddleEast),
    LanguageInfo::new("hi", "Hindi", "हिन्दी", Direction::Ltr, Region::Asia),
    LanguageInfo::new("hr", "Croatian", "Hrvatski", Direction::Ltr, Region::Europe),
    LanguageInfo::new("hu", "Hungarian", "Magyar", Direction::Ltr, Region::Europe),
    LanguageInfo::new("id", "Indonesian", "Bahasa Indonesia", Direction::Ltr, Region::Asia),
    LanguageInfo::new("ig", "Igbo", "Igbo", Direction::Ltr, Region::Africa),
    LanguageInfo::new("is", "Icelandic", "Íslenska", Direction::Ltr, Region::Europe),
    LanguageInfo::new("it", "Italian", "Italiano", Direction::Ltr, Region::Europe),
    LanguageInfo::new("ja", "Japanese", "日本語", Direction::Ltr, Region::Asia),
    LanguageInfo::new("ko", "Korean", "한국어", Direction::Ltr, Region::Asia),
    LanguageInfo::new("lt", "Lithuanian", "Lietuvių", Direction::Ltr, Region::Europe),
    LanguageInfo::new("lv", "Latvian", "Latviešu", Direction::Ltr, Region::Europe),
    LanguageInfo::new("ms", "Malay", "Bahasa Melayu", Direction::Ltr, Region::Asia),
    LanguageInfo::new("nl", "Dutch", "Nederlands", Direction::Ltr, Region::Europe),
    LanguageInfo::new("no", "Norwegian", "Norsk", Direction::Ltr, Region::Europe),
    LanguageInfo::new("pl", "Polish", "Polski", Direction::Ltr, Region::Europe),
    LanguageInfo::new("pt", "Portuguese", "Português", Direction::Ltr, Region::Europe),
    LanguageInfo::new("ro", "Romanian", "Română", Direction::Ltr, Region::Europe),
    LanguageInfo::new("ru", "Russian", "Русский", Direction::Ltr, Region::Europe),
    LanguageInfo::new("sk", "Slovak", "Slovenčina", Direction::Ltr, Region::Europe),
    LanguageInfo::new("sl", "Slovenian", "Slovenščina", Direction::Ltr, Region::Europe),
    LanguageInfo::new("sr", "Serbian", "Српски", Direction::Ltr, Region::Europe),
    LanguageInfo::new("sv", "Swedish", "Svenska", Direction::Ltr, Region::Europe),
    LanguageInfo::new("sw", "Swahili", "Kiswahili", Direction::Ltr, Region::Africa),
    LanguageInfo::new("th", "Thai", "ไทย", Direction::Ltr, Region::Asia),
    LanguageInfo::new("tl", "Filipino", "Filipino", Direction::Ltr, Region::Asia),
    LanguageInfo::new("tr", "Turkish", "Türkçe", Direction::Ltr, Region::MiddleEast),
    LanguageInfo::new("ur", "Urdu", "اردو", Direction::Rtl, Region::Asia),
    LanguageInfo::new("vi", "Vietnamese", "Tiếng Việt", Direction::Ltr, Region::Asia),
    LanguageInfo::new("xh", "Xhosa", "isiXhosa", Direction::Ltr, Region::Africa),
    LanguageInfo::new("yo", "Yoruba", "Yorùbá", Direction::Ltr, Region::Africa),
    LanguageInfo::new("zh", "Chinese", "中文", Direction::Ltr, Region::Asia),
    LanguageInfo::new("zu", "Zulu", "isiZulu", Direction::Ltr, Region::Africa),
];

/// Look up a registry entry by code. Codes are matched exactly (lowercase).
pub fn find(code: &str) -> Option<&'static LanguageInfo> {
    REGISTRY.iter().find(|lang| lang.code == code)
}

/// Registry entries except `reference`, in registry order.
pub fn targets(reference: &str) -> impl Iterator<Item = &'static LanguageInfo> + '_ {
    REGISTRY.iter().filter(move |lang| lang.code != reference)
}

/// Validates whether a string is a known ISO 639-1 two-letter language code.
///
/// Used to reject malformed codes in phrasebook files before they silently
/// fail to match any registry language.
///
/// # Examples
/// ```
/// assert!(locale_sync::i18n::is_valid_iso639_1("en"));
/// assert!(locale_sync::i18n::is_valid_iso639_1("yo"));
/// assert!(!locale_sync::i18n::is_valid_iso639_1("xx"));
/// ```
pub fn is_valid_iso639_1(code: &str) -> bool {
    matches!(
        code,
        "aa" | "ab" | "af" | "ak" | "am" | "an" | "ar" | "as" | "av" | "ay" | "az"
            | "ba" | "be" | "bg" | "bh" | "bi" | "bm" | "bn" | "bo" | "br" | "bs"
            | "ca" | "ce" | "ch" | "co" | "cr" | "cs" | "cu" | "cv" | "cy"
            | "da" | "de" | "dv" | "dz"
            | "ee" | "el" | "en" | "eo" | "es" | "et" | "eu"
            | "fa" | "ff" | "fi" | "fj" | "fo" | "fr" | "fy"
            | "ga" | "gd" | "gl" | "gn" | "gu" | "gv"
            | "ha" | "he" | "hi" | "ho" | "hr" | "ht" | "hu" | "hy" | "hz"
            | "ia" | "id" | "ie" | "ig" | "ii" | "ik" | "io" | "is" | "it" | "iu"
            | "ja" | "jv"
            | "ka" | "kg" | "ki" | "kj" | "kk" | "kl" | "km" | "kn" | "ko" | "kr" | "ks" | "ku" | "kv" | "kw" | "ky"
            | "la" | "lb" | "lg" | "li" | "ln" | "lo" | "lt" | "lu" | "lv"
            | "mg" | "mh" | "mi" | "mk" | "ml" | "mn" | "mr" | "ms" | "mt" | "my"
            | "na" | "nb" | "nd" | "ne" | "ng" | "nl" | "nn" | "no" | "nr" | "nv" | "ny"
            | "oc" | "oj" | "om" | "or" | "os"
            | "pa" | "pi" | "pl" | "ps" | "pt"
            | "qu"
            | "rm" | "rn" | "ro" | "ru" | "rw"
            | "sa" | "sc" | "sd" | "se" | "sg" | "si" | "sk" | "sl" | "sm" | "sn" | "so" | "sq" | "sr" | "ss" | "st" | "su" | "sv" | "sw"
            | "ta" | "te" | "tg" | "th" | "ti" | "tk" | "tl" | "tn" | "to" | "tr" | "ts" | "tt" | "tw" | "ty"
            | "ug" | "uk" | "ur" | "uz"
            | "ve" | "vi" | "vo"
            | "wa" | "wo"
            | "xh"
            | "yi" | "yo"
            | "za" | "zh" | "zu"
    )
}
