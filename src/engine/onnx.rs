// ONNX Runtime generator for NLLB encoder/decoder exports

use super::{greedy_decode, NllbTokenizer, Seq2SeqGenerator, TranslationEngine};
use crate::config::ModelConfig;
use crate::error::{Result, TranslatorError};
use ndarray::{Array2, ArrayD, Axis, Ix3};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const TOKENIZER_FILE: &str = "tokenizer.json";

fn model_err(e: impl Display) -> TranslatorError {
    TranslatorError::Model(e.to_string())
}

/// Greedy generator over an encoder graph and a decoder graph without
/// past key/values, matching the model's default generation config
/// (`num_beams = 1`, no sampling).
pub struct OnnxGenerator {
    encoder: Session,
    decoder: Session,
    decoder_start_token_id: u32,
    eos_token_id: u32,
    max_length: usize,
}

impl OnnxGenerator {
    /// NLLB starts decoding from `</s>` and stops on it.
    pub fn load(
        encoder_path: &Path,
        decoder_path: &Path,
        eos_token_id: u32,
        config: &ModelConfig,
    ) -> Result<Self> {
        Ok(Self {
            encoder: build_session(encoder_path, config.intra_threads)?,
            decoder: build_session(decoder_path, config.intra_threads)?,
            decoder_start_token_id: eos_token_id,
            eos_token_id,
            max_length: config.max_length,
        })
    }

    fn encode(&self, input_ids: &[u32]) -> Result<(ArrayD<f32>, Array2<i64>)> {
        let ids = id_matrix(input_ids)?;
        let mask = Array2::<i64>::ones((1, input_ids.len()));

        let ids = Tensor::from_array(ids).map_err(model_err)?;
        let attention_mask = Tensor::from_array(mask.clone()).map_err(model_err)?;

        let inputs = ort::inputs![
            "input_ids" => ids,
            "attention_mask" => attention_mask,
        ]
        .map_err(model_err)?;
        let outputs = self.encoder.run(inputs).map_err(model_err)?;

        let hidden = outputs["last_hidden_state"]
            .try_extract_tensor::<f32>()
            .map_err(model_err)?
            .to_owned();
        Ok((hidden, mask))
    }

    fn next_token(
        &self,
        hidden: &ArrayD<f32>,
        mask: &Array2<i64>,
        decoder_ids: &[u32],
    ) -> Result<u32> {
        let ids = Tensor::from_array(id_matrix(decoder_ids)?).map_err(model_err)?;
        let encoder_mask = Tensor::from_array(mask.clone()).map_err(model_err)?;
        let encoder_states = Tensor::from_array(hidden.clone()).map_err(model_err)?;

        let inputs = ort::inputs![
            "input_ids" => ids,
            "encoder_attention_mask" => encoder_mask,
            "encoder_hidden_states" => encoder_states,
        ]
        .map_err(model_err)?;
        let outputs = self.decoder.run(inputs).map_err(model_err)?;

        let logits = outputs["logits"]
            .try_extract_tensor::<f32>()
            .map_err(model_err)?
            .into_dimensionality::<Ix3>()
            .map_err(model_err)?;
        let steps = logits.index_axis(Axis(0), 0);
        let last = steps.index_axis(Axis(0), decoder_ids.len() - 1);

        last.iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(id, _)| id as u32)
            .ok_or_else(|| TranslatorError::Model("Decoder returned empty logits".to_string()))
    }
}

impl Seq2SeqGenerator for OnnxGenerator {
    fn generate(&self, input_ids: &[u32], forced_bos_token_id: u32) -> Result<Vec<u32>> {
        let (hidden, mask) = self.encode(input_ids)?;

        greedy_decode(
            self.decoder_start_token_id,
            forced_bos_token_id,
            self.eos_token_id,
            self.max_length,
            |ids| self.next_token(&hidden, &mask, ids),
        )
    }
}

fn id_matrix(ids: &[u32]) -> Result<Array2<i64>> {
    Array2::from_shape_vec((1, ids.len()), ids.iter().map(|&id| i64::from(id)).collect())
        .map_err(model_err)
}

fn build_session(path: &Path, intra_threads: usize) -> Result<Session> {
    debug!("Loading ONNX graph {}", path.display());
    Session::builder()
        .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
        .and_then(|b| b.with_intra_threads(intra_threads.max(1)))
        .and_then(|b| b.commit_from_file(path))
        .map_err(|e| TranslatorError::Model(format!("Failed to load {}: {}", path.display(), e)))
}

struct ModelFiles {
    tokenizer: PathBuf,
    encoder: PathBuf,
    decoder: PathBuf,
}

async fn resolve_model_files(config: &ModelConfig) -> Result<ModelFiles> {
    if let Some(dir) = &config.model_dir {
        let dir = Path::new(dir);
        let files = ModelFiles {
            tokenizer: dir.join(TOKENIZER_FILE),
            encoder: dir.join(&config.encoder_file),
            decoder: dir.join(&config.decoder_file),
        };
        for path in [&files.tokenizer, &files.encoder, &files.decoder] {
            if !path.is_file() {
                return Err(TranslatorError::Config(format!(
                    "Model file not found: {}",
                    path.display()
                )));
            }
        }
        return Ok(files);
    }

    info!("Fetching {} from the Hugging Face Hub", config.model_id);
    let api = hf_hub::api::tokio::Api::new().map_err(model_err)?;
    let repo = api.model(config.model_id.clone());

    Ok(ModelFiles {
        tokenizer: fetch(&repo, TOKENIZER_FILE).await?,
        encoder: fetch(&repo, &config.encoder_file).await?,
        decoder: fetch(&repo, &config.decoder_file).await?,
    })
}

async fn fetch(repo: &hf_hub::api::tokio::ApiRepo, file: &str) -> Result<PathBuf> {
    repo.get(file)
        .await
        .map_err(|e| TranslatorError::Model(format!("Failed to fetch {}: {}", file, e)))
}

/// Fetch (or locate) the model files and build a ready engine.
///
/// Loading deserializes the full weights; it runs on a blocking thread and
/// only returns once the engine can serve requests.
pub async fn load_engine(config: &ModelConfig) -> Result<TranslationEngine> {
    let files = resolve_model_files(config).await?;
    let config = config.clone();

    tokio::task::spawn_blocking(move || -> Result<TranslationEngine> {
        let tokenizer = NllbTokenizer::from_file(&files.tokenizer)?;
        let generator = OnnxGenerator::load(
            &files.encoder,
            &files.decoder,
            tokenizer.eos_token_id(),
            &config,
        )?;
        info!("Model {} loaded", config.model_id);
        Ok(TranslationEngine::new(tokenizer, generator))
    })
    .await
    .map_err(|e| TranslatorError::Internal(format!("Model loader panicked: {}", e)))?
}
