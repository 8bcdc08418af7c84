//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: every chain key must be a
//! valid [`ChainName`], the default chain must be configured, and a chain
//! needs either an RPC endpoint or the light client flag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{ChainName, RpcEndpoint};

/// Name of the chain that always exists and cannot be removed.
pub const BUILTIN_CHAIN: &str = "polkadot";

/// Endpoint of the built-in chain.
pub const BUILTIN_RPC: &str = "wss://rpc.polkadot.io";

/// Top-level configuration file.
///
/// # Example
///
/// ```toml
/// default_chain = "polkadot"
///
/// [chains.polkadot]
/// rpc = "wss://rpc.polkadot.io"
///
/// [chains.westend]
/// light_client = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Chain used when `--chain` is not given
    pub default_chain: String,

    /// Configured chains by name
    pub chains: BTreeMap<String, ChainConfig>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let mut chains = BTreeMap::new();
        chains.insert(
            BUILTIN_CHAIN.to_string(),
            ChainConfig {
                rpc: RpcEndpoint::new(BUILTIN_RPC).ok(),
                light_client: false,
            },
        );
        Self {
            default_chain: BUILTIN_CHAIN.to_string(),
            chains,
        }
    }
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, chain) in &self.chains {
            ChainName::new(name.as_str())
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
            chain.validate(name)?;
        }

        if !self.chains.contains_key(&self.default_chain) {
            return Err(ConfigError::InvalidValue(format!(
                "default chain '{}' is not configured",
                self.default_chain
            )));
        }

        Ok(())
    }
}

/// Per-chain connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// JSON-RPC endpoint
    pub rpc: Option<RpcEndpoint>,

    /// Connect through an embedded light client instead of RPC
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub light_client: bool,
}

impl ChainConfig {
    /// Validate one chain entry.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.rpc.is_none() && !self.light_client {
            return Err(ConfigError::InvalidValue(format!(
                "chain '{}' needs an rpc endpoint or light_client = true",
                name
            )));
        }
        Ok(())
    }
}
