use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for RFC 5646 language tags
///
/// Reels carry a full language tag ("en", "fr-CA", "deu"). Only the primary
/// subtag is checked, against ISO 639-1 and ISO 639-2.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// ISO 639-2/B codes that differ from their 639-2/T form
const PART2B_TO_PART2T: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Primary language subtag of a tag ("fr" for "fr-CA")
pub fn primary_subtag(tag: &str) -> &str {
    tag.trim().split(['-', '_']).next().unwrap_or_default()
}

/// Validate the primary subtag of a language tag
pub fn validate_language_tag(tag: &str) -> Result<LanguageCodeType> {
    let code = primary_subtag(tag).to_lowercase();

    match code.len() {
        2 if Language::from_639_1(&code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if PART2B_TO_PART2T.iter().any(|(b, _)| *b == code) => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Unknown language subtag in tag: {:?}", tag)),
    }
}
