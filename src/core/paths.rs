//! core::paths
//!
//! Centralized path routing for dot storage locations.
//!
//! # Storage Layout
//!
//! All data is stored under a single root (`$DOT_HOME`, or `~/.polkadot`):
//! - `config.toml` - Chain configuration
//! - `chains/<name>/metadata.bin` - Cached runtime metadata per chain
//!
//! **Hard rule:** No code outside this module computes `*.join("chains")`
//! paths. Everything goes through `DotPaths`.
//!
//! # Example
//!
//! ```
//! use dotinspect::core::paths::DotPaths;
//! use dotinspect::core::types::ChainName;
//! use std::path::PathBuf;
//!
//! let paths = DotPaths::new(PathBuf::from("/home/alice/.polkadot"));
//! let chain = ChainName::new("kusama").unwrap();
//!
//! assert_eq!(
//!     paths.metadata_path(&chain),
//!     PathBuf::from("/home/alice/.polkadot/chains/kusama/metadata.bin")
//! );
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::ChainName;

/// Environment variable overriding the storage root.
pub const DOT_HOME_ENV: &str = "DOT_HOME";

/// Directory name used under the home directory.
const DEFAULT_DIR_NAME: &str = ".polkadot";

/// Centralized path routing for dot storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPaths {
    root: PathBuf,
}

impl DotPaths {
    /// Create paths rooted at the given directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the storage root from the environment.
    ///
    /// Uses `$DOT_HOME` if set, otherwise `~/.polkadot`. Returns `None` if
    /// neither is available.
    pub fn from_env() -> Option<Self> {
        if let Ok(root) = std::env::var(DOT_HOME_ENV) {
            if !root.is_empty() {
                return Some(Self::new(PathBuf::from(root)));
            }
        }
        dirs::home_dir().map(|home| Self::new(home.join(DEFAULT_DIR_NAME)))
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical config file location (`<root>/config.toml`).
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Directory holding all per-chain data.
    pub fn chains_dir(&self) -> PathBuf {
        self.root.join("chains")
    }

    /// Directory holding data for one chain.
    pub fn chain_dir(&self, chain: &ChainName) -> PathBuf {
        self.chains_dir().join(chain.as_str())
    }

    /// Cached metadata blob for one chain.
    pub fn metadata_path(&self, chain: &ChainName) -> PathBuf {
        self.chain_dir(chain).join("metadata.bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> DotPaths {
        DotPaths::new(PathBuf::from("/data/.polkadot"))
    }

    #[test]
    fn config_path() {
        assert_eq!(
            paths().config_path(),
            PathBuf::from("/data/.polkadot/config.toml")
        );
    }

    #[test]
    fn chain_paths() {
        let chain = ChainName::new("westend").unwrap();
        assert_eq!(
            paths().chain_dir(&chain),
            PathBuf::from("/data/.polkadot/chains/westend")
        );
        assert_eq!(
            paths().metadata_path(&chain),
            PathBuf::from("/data/.polkadot/chains/westend/metadata.bin")
        );
    }

    #[test]
    fn root_accessor() {
        assert_eq!(paths().root(), Path::new("/data/.polkadot"));
    }
}
