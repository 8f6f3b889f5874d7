// nllb-translator - Guaraní <-> Spanish translation API backed by NLLB-200

use anyhow::Result;
use clap::Parser;
use nllb_translator::cli::Args;
use nllb_translator::config::{AppConfig, API_KEY_ENV};
use nllb_translator::server::{create_router, AppState};
use nllb_translator::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting nllb-translator v{}", env!("CARGO_PKG_VERSION"));

    if !config.auth.is_configured() {
        warn!(
            "No API key set ({}); every /translate request will be rejected",
            API_KEY_ENV
        );
    }
    info!(
        quota = %config.rate_limit.quota()?,
        origins = ?config.cors.allowed_origins,
        "Request policy loaded"
    );

    // Phase 3: Load the model. Failure here aborts startup.
    let translator = load_translator(&config).await?;

    // Phase 4: Build and start HTTP server
    let state = AppState::new(config.clone(), translator)?;
    let app = create_router(state)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown. Peer addresses feed the
    // rate limiter.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down gracefully");
    Ok(())
}

#[cfg(feature = "onnx")]
async fn load_translator(
    config: &AppConfig,
) -> Result<Arc<dyn nllb_translator::engine::Translator>> {
    info!("Loading model {}", config.model.model_id);
    let engine = nllb_translator::engine::load_engine(&config.model).await?;
    Ok(Arc::new(engine))
}

#[cfg(not(feature = "onnx"))]
async fn load_translator(
    _config: &AppConfig,
) -> Result<Arc<dyn nllb_translator::engine::Translator>> {
    anyhow::bail!("built without a model runtime; enable the `onnx` feature")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
