//! HTTP endpoints of the signature verification service.
//!
//! - `GET /` - service name
//! - `GET /health` - liveness
//! - `GET /verify` - machine-readable description of `POST /verify`
//! - `POST /verify` - verify a signature, see [`proto::VerifyRequest`]
//! - `GET /supported` - configured networks and how each checks signatures

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use crate::proto;
use crate::verifier::{Verifier, VerifierLocalError};

pub fn routes<A>() -> Router<Arc<A>>
where
    A: Verifier + Send + Sync + 'static,
    A::Error: IntoResponse,
{
    Router::new()
        .route("/", get(get_root))
        .route("/health", get(get_health))
        .route("/verify", get(get_verify_info).post(post_verify::<A>))
        .route("/supported", get(get_supported::<A>))
}

/// `GET /`: Greeting, to tell this service apart from others on a shared host.
#[instrument(skip_all)]
pub async fn get_root() -> impl IntoResponse {
    let pkg_name = env!("CARGO_PKG_NAME");
    (StatusCode::OK, format!("Hello from {pkg_name}!"))
}

#[instrument(skip_all)]
pub async fn get_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// `GET /verify`: Returns a machine-readable description of the `/verify` endpoint.
#[instrument(skip_all)]
pub async fn get_verify_info() -> impl IntoResponse {
    Json(json!({
        "endpoint": "/verify",
        "description": "POST to verify an EOA, ERC-1271 or ERC-6492 signature",
        "body": {
            "network": "CAIP-2 chain id or network name, e.g. eip155:8453 or base",
            "address": "Address of the claimed signer",
            "hash": "32-byte hash that was signed (or `message`)",
            "message": "UTF-8 message signed per EIP-191 (or `hash`)",
            "signature": "Hex string, byte array, or { r, s, v }",
            "factory": "Optional ERC-6492 factory address",
            "factoryData": "Optional ERC-6492 factory calldata, required with `factory`",
            "block": "Optional block tag, number or hash; defaults to latest",
        },
        "response": {
            "isValid": "boolean",
        }
    }))
}

/// `GET /supported`: Lists the networks this service is configured for.
#[instrument(skip_all)]
pub async fn get_supported<A>(State(verifier): State<Arc<A>>) -> Response
where
    A: Verifier + Send + Sync,
    A::Error: IntoResponse,
{
    match verifier.supported().await {
        Ok(supported) => (StatusCode::OK, Json(supported)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// `POST /verify`: Checks whether the given address signed the given hash or message.
///
/// Responds `200 {"isValid": bool}` whenever the question could be answered.
#[instrument(skip_all)]
pub async fn post_verify<A>(
    State(verifier): State<Arc<A>>,
    Json(body): Json<proto::VerifyRequest>,
) -> Response
where
    A: Verifier + Send + Sync,
    A::Error: IntoResponse,
{
    match verifier.verify(&body).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => {
            tracing::warn!(
                error = %error,
                body = %serde_json::to_string(&body).unwrap_or_else(|_| "<can-not-serialize>".to_string()),
                "Verification failed"
            );
            error.into_response()
        }
    }
}

impl IntoResponse for VerifierLocalError {
    fn into_response(self) -> Response {
        let status = match self {
            VerifierLocalError::UnsupportedNetwork(_)
            | VerifierLocalError::InvalidSubject(_)
            | VerifierLocalError::Encoding(_) => StatusCode::BAD_REQUEST,
            VerifierLocalError::Infrastructure(_) => StatusCode::BAD_GATEWAY,
        };
        let body = proto::ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
