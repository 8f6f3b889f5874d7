// NLLB tokenizer wrapper

use crate::error::{Result, TranslatorError};
use std::path::Path;
use tokenizers::Tokenizer;

const EOS_TOKEN: &str = "</s>";

/// Thin wrapper over a Hugging Face `tokenizer.json` for NLLB models.
///
/// The source language is an argument of [`NllbTokenizer::encode`] rather
/// than tokenizer state, so one instance can serve concurrent requests in
/// different languages.
pub struct NllbTokenizer {
    inner: Tokenizer,
    eos_token_id: u32,
}

impl NllbTokenizer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let inner = Tokenizer::from_file(path).map_err(|e| {
            TranslatorError::Model(format!("Failed to load tokenizer {}: {}", path.display(), e))
        })?;
        Self::new(inner)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = Tokenizer::from_bytes(bytes)
            .map_err(|e| TranslatorError::Model(format!("Failed to parse tokenizer: {}", e)))?;
        Self::new(inner)
    }

    fn new(inner: Tokenizer) -> Result<Self> {
        let eos_token_id = inner.token_to_id(EOS_TOKEN).ok_or_else(|| {
            TranslatorError::Model(format!("Tokenizer has no {} token", EOS_TOKEN))
        })?;
        Ok(Self {
            inner,
            eos_token_id,
        })
    }

    pub fn eos_token_id(&self) -> u32 {
        self.eos_token_id
    }

    /// Token id of a language tag such as `spa_Latn`.
    pub fn lang_token_id(&self, tag: &str) -> Result<u32> {
        self.inner
            .token_to_id(tag)
            .ok_or_else(|| TranslatorError::UnsupportedLanguage(tag.to_string()))
    }

    /// Encode `text` as `[src_tag] tokens </s>`.
    pub fn encode(&self, text: &str, src_tag: &str) -> Result<Vec<u32>> {
        let src_id = self.lang_token_id(src_tag)?;
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| TranslatorError::Model(format!("Failed to encode input: {}", e)))?;

        let mut ids = Vec::with_capacity(encoding.get_ids().len() + 2);
        ids.push(src_id);
        ids.extend_from_slice(encoding.get_ids());
        ids.push(self.eos_token_id);
        Ok(ids)
    }

    /// Decode generated ids, dropping special tokens.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| TranslatorError::Model(format!("Failed to decode output: {}", e)))
    }
}

impl std::fmt::Debug for NllbTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NllbTokenizer")
            .field("vocab_size", &self.inner.get_vocab_size(true))
            .field("eos_token_id", &self.eos_token_id)
            .finish()
    }
}
