//! Configuration types shared across chain crates.
//!
//! # Environment Variable Resolution
//!
//! The [`LiteralOrEnv`] wrapper type allows configuration values to be specified
//! either as literal values or as references to environment variables:
//!
//! ```json
//! {
//!   "http": "http://localhost:8545",     // Literal value
//!   "http": "$BASE_RPC_URL",             // Simple env var
//!   "http": "${BASE_RPC_URL}"            // Braced env var
//! }
//! ```
//!
//! RPC URLs frequently embed API keys, so they are kept out of config files this way.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::str::FromStr;
use url::Url;

/// RPC provider configuration for a single endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcConfig {
    /// HTTP URL for the RPC endpoint, literal or `$VAR`.
    pub http: LiteralOrEnv<Url>,
    /// Rate limit for requests per second (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u32>,
}

/// A transparent wrapper that resolves environment variables during deserialization.
///
/// Supports both literal values and environment variable references:
/// - Literal: `"http://localhost:8545"`
/// - Simple env var: `"$RPC_URL"`
/// - Braced env var: `"${RPC_URL}"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOrEnv<T>(T);

impl<T> LiteralOrEnv<T> {
    pub fn from_literal(value: T) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns the variable name if the string matches `$VAR` or `${VAR}` syntax.
    fn parse_env_var_syntax(s: &str) -> Option<&str> {
        if let Some(braced) = s.strip_prefix("${").and_then(|r| r.strip_suffix('}')) {
            return (!braced.is_empty()).then_some(braced);
        }
        let var_name = s.strip_prefix('$')?;
        let is_var_name =
            !var_name.is_empty() && var_name.chars().all(|c| c.is_alphanumeric() || c == '_');
        is_var_name.then_some(var_name)
    }
}

impl<T> Deref for LiteralOrEnv<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de, T> Deserialize<'de> for LiteralOrEnv<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let value = if let Some(var_name) = Self::parse_env_var_syntax(&s) {
            std::env::var(var_name).map_err(|_| {
                serde::de::Error::custom(format!(
                    "Environment variable '{}' not found (referenced as '{}')",
                    var_name, s
                ))
            })?
        } else {
            s
        };

        let parsed = value
            .parse::<T>()
            .map_err(|e| serde::de::Error::custom(format!("Failed to parse value: {}", e)))?;

        Ok(LiteralOrEnv(parsed))
    }
}

impl<T> Serialize for LiteralOrEnv<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}
