// Translate request payload and its validation

use crate::config::{supported_codes, LanguageCode};
use crate::error::{FieldError, Result, TranslatorError};
use serde_json::Value;

/// A validated translation request.
///
/// `source_lang` and `target_lang` may be equal; empty `text` is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: LanguageCode,
    pub target_lang: LanguageCode,
}

impl TranslateRequest {
    /// Validate a raw JSON body, reporting every offending field at once.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            TranslatorError::Validation(vec![FieldError::new(
                "body",
                format!("invalid JSON: {}", e),
            )])
        })?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(obj) = value.as_object() else {
            return Err(TranslatorError::Validation(vec![FieldError::new(
                "body",
                "expected a JSON object",
            )]));
        };

        let mut errors = Vec::new();

        let text = match obj.get("text") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new("text", "must be a string"));
                None
            }
            None => {
                errors.push(FieldError::new("text", "field required"));
                None
            }
        };

        let source_lang = language_field(obj.get("source_lang"), "source_lang", &mut errors);
        let target_lang = language_field(obj.get("target_lang"), "target_lang", &mut errors);

        match (text, source_lang, target_lang) {
            (Some(text), Some(source_lang), Some(target_lang)) if errors.is_empty() => Ok(Self {
                text,
                source_lang,
                target_lang,
            }),
            _ => Err(TranslatorError::Validation(errors)),
        }
    }
}

fn language_field(
    value: Option<&Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<LanguageCode> {
    let allowed = supported_codes().join(", ");
    match value {
        None => {
            errors.push(FieldError::new(field, "field required"));
            None
        }
        Some(Value::String(s)) => match s.parse::<LanguageCode>() {
            Ok(code) => Some(code),
            Err(_) => {
                errors.push(FieldError::new(
                    field,
                    format!("'{}' is not one of: {}", s, allowed),
                ));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new(field, format!("must be one of: {}", allowed)));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn fields(err: TranslatorError) -> Vec<String> {
        match err {
            TranslatorError::Validation(fields) => fields.into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request() {
        let req = TranslateRequest::from_value(&json!({
            "text": "Mba'éichapa",
            "source_lang": "gn",
            "target_lang": "es"
        }))
        .unwrap();
        assert_eq!(req.source_lang, LanguageCode::Gn);
        assert_eq!(req.target_lang, LanguageCode::Es);
    }

    #[test]
    fn test_identity_and_empty_text_are_valid() {
        let req = TranslateRequest::from_value(&json!({
            "text": "",
            "source_lang": "es",
            "target_lang": "es"
        }))
        .unwrap();
        assert_eq!(req.text, "");
        assert_eq!(req.source_lang, req.target_lang);
    }

    #[test]
    fn test_missing_text() {
        let err = TranslateRequest::from_value(&json!({
            "source_lang": "gn",
            "target_lang": "es"
        }))
        .unwrap_err();
        assert_eq!(fields(err), vec!["text"]);
    }

    #[test]
    fn test_reports_every_bad_field() {
        let err = TranslateRequest::from_value(&json!({
            "text": 42,
            "source_lang": "en",
            "target_lang": null
        }))
        .unwrap_err();
        assert_eq!(fields(err), vec!["text", "source_lang", "target_lang"]);
    }

    #[test]
    fn test_language_codes_are_exact() {
        for bad in ["GN", "es ", "spa_Latn", ""] {
            let err = TranslateRequest::from_value(&json!({
                "text": "hola",
                "source_lang": bad,
                "target_lang": "gn"
            }))
            .unwrap_err();
            assert_eq!(fields(err), vec!["source_lang"], "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_non_object_and_malformed_bodies() {
        assert_eq!(fields(TranslateRequest::from_value(&json!([1, 2])).unwrap_err()), vec!["body"]);
        assert_eq!(fields(TranslateRequest::from_json(b"{not json").unwrap_err()), vec!["body"]);
    }

    proptest! {
        #[test]
        fn prop_only_gn_and_es_accepted(code in "[a-zA-Z_]{0,8}") {
            let result = TranslateRequest::from_value(&json!({
                "text": "x",
                "source_lang": code.clone(),
                "target_lang": "es"
            }));
            prop_assert_eq!(result.is_ok(), code == "gn" || code == "es");
        }
    }
}
