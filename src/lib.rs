//! Universal EVM signature verification server.
//!
//! Answers "did this address sign this hash?" over HTTP for externally owned accounts,
//! deployed ERC-1271 smart accounts and counterfactual ERC-6492 accounts, on every
//! configured EVM network.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chain`] | Chain providers built from configuration |
//! | [`config`] | Configuration types and loading |
//! | [`handlers`] | HTTP endpoints |
//! | [`proto`] | Request and response bodies |
//! | [`run`] | Server initialization and runtime |
//! | [`util`] | Shutdown signals and telemetry |
//! | [`verifier`] | Network routing and error classification |
//!
//! # Running the Server
//!
//! ```bash
//! cargo run -- --config /path/to/config.json
//!
//! # With OpenTelemetry export
//! OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4317 cargo run --features telemetry
//! ```

pub mod chain;
pub mod config;
pub mod handlers;
pub mod proto;
pub mod run;
pub mod util;
pub mod verifier;

pub use run::run;
