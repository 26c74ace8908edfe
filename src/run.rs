//! Server bootstrap.

use axum::Router;
use axum::http::Method;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors;
use x402_sigverify_types::chain::{ChainRegistry, FromConfig};

use crate::chain::ChainProvider;
use crate::config::Config;
use crate::handlers;
use crate::util::{SigDown, Telemetry};
use crate::verifier::VerifierLocal;

/// Initializes and runs the signature verification server.
///
/// - Loads `.env` variables.
/// - Installs logging, and OpenTelemetry export when configured.
/// - Connects to the RPC endpoints of every configured chain.
/// - Serves the HTTP API until SIGTERM or SIGINT.
///
/// Binds to the address specified by the `HOST` and `PORT` env vars, unless the
/// config file sets `host` and `port`.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    rustls::crypto::CryptoProvider::install_default(rustls::crypto::ring::default_provider())
        .map_err(|_| "Failed to initialize rustls crypto provider")?;

    dotenv().ok();

    let telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register()?;

    let config: Config = Config::load()?;

    let chain_registry: ChainRegistry<ChainProvider> =
        ChainRegistry::from_config(config.chains()).await?;
    if chain_registry.is_empty() {
        tracing::warn!("No chains configured, every verification will be rejected");
    }
    let verifier = VerifierLocal::new(chain_registry);
    let axum_state = Arc::new(verifier);

    let http_endpoints = Router::new()
        .merge(handlers::routes().with_state(axum_state))
        .layer(telemetry.http_tracing())
        .layer(
            cors::CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(cors::Any),
        );

    let addr = SocketAddr::new(config.host(), config.port());
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("Failed to bind to {}: {}", addr, e))?;

    let sig_down = SigDown::try_new()?;
    let axum_cancellation_token = sig_down.cancellation_token();
    let axum_graceful_shutdown = async move { axum_cancellation_token.cancelled().await };
    axum::serve(listener, http_endpoints)
        .with_graceful_shutdown(axum_graceful_shutdown)
        .await?;
    sig_down.recv().await;

    Ok(())
}
