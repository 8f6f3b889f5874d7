// CLI module for nllb-translator

use clap::Parser;
use std::path::PathBuf;

/// nllb-translator - Guaraní <-> Spanish translation API backed by NLLB-200
#[derive(Parser, Debug)]
#[command(name = "nllb-translator", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.nllb-translator/config.toml)
    #[arg(short, long, env = "TRANSLATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}
