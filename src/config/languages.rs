// Language code table (short code → NLLB tag)

use crate::error::{Result, TranslatorError};
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed mapping from the public short codes to the tags NLLB-200 uses in
/// its vocabulary. Read-only for the life of the process.
static LANG_CODES: phf::Map<&'static str, &'static str> = phf_map! {
    "gn" => "grn_Latn", // Guaraní
    "es" => "spa_Latn", // Spanish
};

/// A language accepted by the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Gn,
    Es,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 2] = [LanguageCode::Gn, LanguageCode::Es];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Gn => "gn",
            LanguageCode::Es => "es",
        }
    }

    /// NLLB tag for this language, e.g. `grn_Latn`.
    pub fn model_tag(&self) -> Result<&'static str> {
        model_tag(self.as_str())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = TranslatorError;

    /// Exact, case-sensitive match against the supported codes.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gn" => Ok(LanguageCode::Gn),
            "es" => Ok(LanguageCode::Es),
            other => Err(TranslatorError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Resolve a short code to its model tag.
pub fn model_tag(code: &str) -> Result<&'static str> {
    LANG_CODES
        .get(code)
        .copied()
        .ok_or_else(|| TranslatorError::UnsupportedLanguage(code.to_string()))
}

/// Supported short codes, in table order.
pub fn supported_codes() -> Vec<&'static str> {
    LanguageCode::ALL.iter().map(LanguageCode::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_exactly_two_entries() {
        assert_eq!(LANG_CODES.len(), 2);
        assert_eq!(model_tag("gn").unwrap(), "grn_Latn");
        assert_eq!(model_tag("es").unwrap(), "spa_Latn");
    }

    #[test]
    fn test_every_code_resolves() {
        for code in LanguageCode::ALL {
            assert!(code.model_tag().is_ok(), "{} has no model tag", code);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("gn".parse::<LanguageCode>().unwrap(), LanguageCode::Gn);
        assert!("GN".parse::<LanguageCode>().is_err());
        assert!("en".parse::<LanguageCode>().is_err());
        assert!(" es".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn test_unknown_code_is_unsupported_language() {
        match model_tag("fr") {
            Err(TranslatorError::UnsupportedLanguage(code)) => assert_eq!(code, "fr"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&LanguageCode::Gn).unwrap();
        assert_eq!(json, "\"gn\"");
        let back: LanguageCode = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(back, LanguageCode::Es);
    }
}
