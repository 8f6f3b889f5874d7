//! Translation engine: tokenizer + sequence-to-sequence model runtime.
//!
//! The HTTP layer only sees the [`Translator`] trait, so tests can swap in
//! fake engines. [`TranslationEngine`] is the real implementation; it frames
//! the input with the source language tag, asks the [`Seq2SeqGenerator`] for
//! an output sequence that starts with the target language tag, and decodes
//! the result.
//!
//! # Submodules
//!
//! - `tokenizer`: NLLB framing over a Hugging Face `tokenizer.json`.
//! - `decode`: greedy decoding loop driven by a per-step callback.
//! - `onnx`: ONNX Runtime generator and model loading (feature `onnx`).

mod decode;
#[cfg(feature = "onnx")]
mod onnx;
mod tokenizer;

pub use decode::greedy_decode;
#[cfg(feature = "onnx")]
pub use onnx::{load_engine, OnnxGenerator};
pub use tokenizer::NllbTokenizer;

use crate::config::LanguageCode;
use crate::error::{FieldError, Result, TranslatorError};
use std::time::Instant;
use tracing::debug;

/// Positional embedding size of NLLB-200; framed inputs must fit in it.
pub const MAX_SOURCE_TOKENS: usize = 1024;

/// Anything that can translate text between two supported languages.
///
/// Implementations are called from blocking worker threads and may take a
/// long time; they must be safe to call concurrently.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: LanguageCode, target: LanguageCode) -> Result<String>;
}

/// The model runtime's generation step, treated as a black box.
pub trait Seq2SeqGenerator: Send + Sync {
    /// Generate output token ids for an already framed input sequence.
    /// The output must begin with `forced_bos_token_id` after the decoder
    /// start token.
    fn generate(&self, input_ids: &[u32], forced_bos_token_id: u32) -> Result<Vec<u32>>;
}

pub struct TranslationEngine {
    tokenizer: NllbTokenizer,
    generator: Box<dyn Seq2SeqGenerator>,
}

impl TranslationEngine {
    pub fn new(tokenizer: NllbTokenizer, generator: impl Seq2SeqGenerator + 'static) -> Self {
        Self {
            tokenizer,
            generator: Box::new(generator),
        }
    }

    pub fn tokenizer(&self) -> &NllbTokenizer {
        &self.tokenizer
    }
}

impl Translator for TranslationEngine {
    fn translate(&self, text: &str, source: LanguageCode, target: LanguageCode) -> Result<String> {
        let started = Instant::now();

        let src_tag = source.model_tag()?;
        let tgt_tag = target.model_tag()?;

        let input_ids = self.tokenizer.encode(text, src_tag)?;
        if input_ids.len() > MAX_SOURCE_TOKENS {
            return Err(TranslatorError::Validation(vec![FieldError::new(
                "text",
                format!(
                    "text is {} tokens long, at most {} are supported",
                    input_ids.len(),
                    MAX_SOURCE_TOKENS
                ),
            )]));
        }
        let forced_bos = self.tokenizer.lang_token_id(tgt_tag)?;
        let output_ids = self.generator.generate(&input_ids, forced_bos)?;
        let translated = self.tokenizer.decode(&output_ids)?;

        debug!(
            source = src_tag,
            target = tgt_tag,
            input_tokens = input_ids.len(),
            output_tokens = output_ids.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "translation complete"
        );

        Ok(translated)
    }
}

impl std::fmt::Debug for TranslationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationEngine")
            .field("tokenizer", &self.tokenizer)
            .finish()
    }
}
