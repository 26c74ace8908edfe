//! EVM chain addressing, configuration and the read-only chain provider.
//!
//! - [`Eip155ChainReference`] - numeric chain id (e.g. `8453` for Base)
//! - [`Eip155ChainConfig`] - per-chain RPC endpoints and validator override
//! - [`Eip155ChainProvider`] - executes validation calls (`provider` feature)

pub mod config;
pub use config::*;

#[cfg(feature = "provider")]
pub mod provider;
#[cfg(feature = "provider")]
pub use provider::*;

pub mod types;
pub use types::*;
