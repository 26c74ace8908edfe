//! EIP-155 (EVM) universal signature verification.
//!
//! Checks whether an address signed a hash, whatever kind of account it is:
//!
//! - **EOA**: plain secp256k1 signatures, recovered locally when the validator reverts
//! - **ERC-1271**: deployed smart accounts answering `isValidSignature`
//! - **ERC-6492**: counterfactual smart accounts, verified with their deployment recipe
//!
//! All three go through the EIP-6492 universal validator, either at its deployed
//! address or simulated from creation bytecode ([`verify::DeploylessBytecode::BUILTIN`]
//! unless config overrides it).
//!
//! # Modules
//!
//! - [`verify`] - the verification algorithm, signature codecs and executor seam
//! - [`chain`] - chain references, config and the RPC-backed provider
//!
//! # Feature Flags
//!
//! - `provider` - [`chain::Eip155ChainProvider`], backed by alloy's HTTP transports
//! - `telemetry` - tracing spans and events
//!
//! # Example
//!
//! ```ignore
//! use x402_sigverify_eip155::verify::{self, SignatureInput, ValidatorTargetSource, VerifyHashRequest};
//!
//! // provider: any `CallExecutor`, e.g. `chain::Eip155ChainProvider`
//! let target = provider.validator_target();
//! let request = VerifyHashRequest::new(address, hash, SignatureInput::Hex(sig));
//! let is_valid = verify::verify_hash(&provider, &target, &request).await?;
//! ```

pub mod chain;
pub mod verify;

mod networks;
pub use networks::*;
