#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Chain-agnostic types for the x402-sigverify service.
//!
//! This crate holds the pieces that do not depend on a particular blockchain family.
//! Chain-specific verification lives in separate crates (see `x402-sigverify-eip155`).
//!
//! # Modules
//!
//! - [`chain`] - CAIP-2 chain identifiers, provider construction and the provider registry
//! - [`config`] - RPC endpoint configuration and environment variable resolution
//! - [`networks`] - Registry of well-known networks by human-readable name

pub mod chain;
pub mod config;
pub mod networks;
