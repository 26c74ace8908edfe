//! Signature verification HTTP entrypoint.
//!
//! Endpoints:
//! - `GET /verify` – Request schema of `POST /verify`
//! - `POST /verify` – Verify an EOA, ERC-1271 or ERC-6492 signature
//! - `GET /supported` – Configured networks and their validator
//! - `GET /health` – Liveness
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `CONFIG` path of the JSON config file
//! - `HOST`, `PORT` control binding address
//! - `RUST_LOG` log filter
//! - `OTEL_*` variables enable trace and metric export (`telemetry` feature)

use std::process;

#[tokio::main]
async fn main() {
    let result = x402_sigverify::run().await;
    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1)
    }
}
