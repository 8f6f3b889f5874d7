// nllb-translator - Guaraní <-> Spanish translation API backed by NLLB-200

pub mod auth;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod server;
pub mod utils;
