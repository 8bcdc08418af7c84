//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ChainName`] - Validated chain identity (config key and cache directory name)
//! - [`RpcEndpoint`] - Validated JSON-RPC endpoint URL
//! - [`Target`] - A parsed `Pallet.Item` reference
//!
//! # Validation
//!
//! These types enforce validity at construction time. A chain name is used
//! as a directory name under the cache root, so it must never contain path
//! separators or relative components.
//!
//! # Examples
//!
//! ```
//! use dotinspect::core::types::{ChainName, RpcEndpoint};
//!
//! let chain = ChainName::new("asset-hub").unwrap();
//! let rpc = RpcEndpoint::new("wss://rpc.polkadot.io").unwrap();
//! assert_eq!(rpc.http_url(), "https://rpc.polkadot.io");
//!
//! assert!(ChainName::new("../etc").is_err());
//! assert!(RpcEndpoint::new("ftp://example.com").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid chain name: {0}")]
    InvalidChainName(String),

    #[error("invalid rpc endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid target \"{0}\". Expected format: Pallet.Item (e.g. System.Account)")]
    InvalidTarget(String),
}

/// A validated chain name.
///
/// Chain names must:
/// - Be non-empty
/// - Contain only ASCII alphanumerics, `-` and `_`
/// - Not start with `-`
///
/// # Example
///
/// ```
/// use dotinspect::core::types::ChainName;
///
/// let name = ChainName::new("polkadot").unwrap();
/// assert_eq!(name.as_str(), "polkadot");
///
/// assert!(ChainName::new("").is_err());
/// assert!(ChainName::new("-kusama").is_err());
/// assert!(ChainName::new("my chain").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainName(String);

impl ChainName {
    /// Create a new validated chain name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidChainName` if the name is empty or contains
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidChainName(
                "chain name cannot be empty".into(),
            ));
        }
        if name.starts_with('-') {
            return Err(TypeError::InvalidChainName(
                "chain name cannot start with '-'".into(),
            ));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(TypeError::InvalidChainName(format!(
                "chain name cannot contain '{}'",
                c.escape_default()
            )));
        }
        Ok(())
    }

    /// Get the chain name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChainName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ChainName> for String {
    fn from(name: ChainName) -> Self {
        name.0
    }
}

impl AsRef<str> for ChainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated RPC endpoint.
///
/// Accepts `ws://`, `wss://`, `http://` and `https://` URLs. Metadata is
/// fetched with a single JSON-RPC request, so WebSocket endpoints are
/// addressed through their HTTP equivalent (see [`RpcEndpoint::http_url`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RpcEndpoint(String);

impl RpcEndpoint {
    const SCHEMES: [&'static str; 4] = ["ws://", "wss://", "http://", "https://"];

    /// Create a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidEndpoint` for an unsupported scheme or an
    /// empty host.
    pub fn new(url: impl Into<String>) -> Result<Self, TypeError> {
        let url = url.into();
        let Some(scheme) = Self::SCHEMES.iter().find(|s| url.starts_with(**s)) else {
            return Err(TypeError::InvalidEndpoint(format!(
                "'{}' must start with one of: {}",
                url,
                Self::SCHEMES.join(", ")
            )));
        };
        if url.len() == scheme.len() {
            return Err(TypeError::InvalidEndpoint(format!(
                "'{}' has no host",
                url
            )));
        }
        Ok(Self(url))
    }

    /// The endpoint as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The endpoint rewritten to HTTP(S).
    ///
    /// ```
    /// use dotinspect::core::types::RpcEndpoint;
    ///
    /// let rpc = RpcEndpoint::new("ws://127.0.0.1:9944").unwrap();
    /// assert_eq!(rpc.http_url(), "http://127.0.0.1:9944");
    /// ```
    pub fn http_url(&self) -> String {
        if let Some(rest) = self.0.strip_prefix("wss://") {
            format!("https://{}", rest)
        } else if let Some(rest) = self.0.strip_prefix("ws://") {
            format!("http://{}", rest)
        } else {
            self.0.clone()
        }
    }
}

impl TryFrom<String> for RpcEndpoint {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RpcEndpoint> for String {
    fn from(endpoint: RpcEndpoint) -> Self {
        endpoint.0
    }
}

impl std::fmt::Display for RpcEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dotted `Pallet.Item` reference.
///
/// Parsing is strict: the input must contain exactly one `.` with a
/// non-empty segment on each side. `A.B.C` is rejected rather than split on
/// the first separator.
///
/// # Example
///
/// ```
/// use dotinspect::core::types::Target;
///
/// let target = Target::parse("System.Account").unwrap();
/// assert_eq!(target.pallet, "System");
/// assert_eq!(target.item, "Account");
///
/// assert!(Target::parse("System").is_err());
/// assert!(Target::parse("A.B.C").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Pallet segment, as typed.
    pub pallet: String,
    /// Item segment, as typed.
    pub item: String,
}

impl Target {
    /// Parse a dotted reference.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTarget` unless the input has exactly two
    /// non-empty segments.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let mut segments = input.split('.');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(pallet), Some(item), None) if !pallet.is_empty() && !item.is_empty() => {
                Ok(Self {
                    pallet: pallet.to_string(),
                    item: item.to_string(),
                })
            }
            _ => Err(TypeError::InvalidTarget(input.to_string())),
        }
    }
}

impl std::str::FromStr for Target {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.pallet, self.item)
    }
}
