//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$DOT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/dot/config.toml`
//! 3. `<root>/config.toml` where root is `$DOT_HOME` or `~/.polkadot`
//!    (canonical write location)
//!
//! A missing file is not an error: the built-in default (a single
//! `polkadot` chain) is used until the first write.
//!
//! # Example
//!
//! ```no_run
//! use dotinspect::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! let (name, chain) = config.resolve_chain(None).unwrap();
//! println!("Using {} via {:?}", name, chain.rpc);
//! ```

pub mod schema;

pub use schema::{ChainConfig, ConfigFile, BUILTIN_CHAIN};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::DotPaths;
use crate::core::types::ChainName;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("Cannot remove the built-in \"{0}\" chain.")]
    BuiltinChain(&'static str),

    #[error("Unknown chain \"{name}\". Available chains: {available}")]
    UnknownChain { name: String, available: String },

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration file
    pub file: ConfigFile,
    /// Path the file was loaded from (if any)
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. A missing file yields the built-in default.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_existing() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    fn find_existing() -> Option<PathBuf> {
        // 1. $DOT_CONFIG
        if let Ok(path) = std::env::var("DOT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. $XDG_CONFIG_HOME/dot/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("dot/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. <root>/config.toml
        let path = DotPaths::from_env()?.config_path();
        path.exists().then_some(path)
    }

    /// Path of the file this config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    /// Write the configuration back.
    ///
    /// Writes to the file it was loaded from, or to the canonical location
    /// if it came from defaults.
    pub fn save(&mut self) -> Result<PathBuf, ConfigError> {
        self.file.validate()?;
        let path = match &self.loaded_from {
            Some(path) => path.clone(),
            None => DotPaths::from_env()
                .ok_or(ConfigError::NoHomeDir)?
                .config_path(),
        };
        write_config_atomic(&path, &self.file)?;
        self.loaded_from = Some(path.clone());
        Ok(path)
    }

    /// Pick the chain named by `--chain`, or the configured default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownChain` listing the available chains.
    pub fn resolve_chain(
        &self,
        flag: Option<&str>,
    ) -> Result<(ChainName, ChainConfig), ConfigError> {
        let name = flag.unwrap_or(&self.file.default_chain);
        let chain = self
            .file
            .chains
            .get(name)
            .ok_or_else(|| ConfigError::UnknownChain {
                name: name.to_string(),
                available: self.chain_names().join(", "),
            })?;
        let name = ChainName::new(name).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        Ok((name, chain.clone()))
    }

    /// Names of all configured chains.
    pub fn chain_names(&self) -> Vec<&str> {
        self.file.chains.keys().map(String::as_str).collect()
    }

    /// Whether a chain is configured.
    pub fn has_chain(&self, name: &ChainName) -> bool {
        self.file.chains.contains_key(name.as_str())
    }

    /// Add or replace a chain entry.
    pub fn upsert_chain(&mut self, name: &ChainName, chain: ChainConfig) -> Result<(), ConfigError> {
        chain.validate(name.as_str())?;
        self.file.chains.insert(name.to_string(), chain);
        Ok(())
    }

    /// Remove a chain entry.
    ///
    /// Returns `true` if the default chain was reset to the built-in chain.
    pub fn remove_chain(&mut self, name: &ChainName) -> Result<bool, ConfigError> {
        if name.as_str() == BUILTIN_CHAIN {
            return Err(ConfigError::BuiltinChain(BUILTIN_CHAIN));
        }
        if self.file.chains.remove(name.as_str()).is_none() {
            return Err(ConfigError::UnknownChain {
                name: name.to_string(),
                available: self.chain_names().join(", "),
            });
        }
        if self.file.default_chain == name.as_str() {
            self.file.default_chain = BUILTIN_CHAIN.to_string();
            return Ok(true);
        }
        Ok(false)
    }

    /// Set the default chain.
    pub fn set_default(&mut self, name: &ChainName) -> Result<(), ConfigError> {
        if !self.has_chain(name) {
            return Err(ConfigError::UnknownChain {
                name: name.to_string(),
                available: self.chain_names().join(", "),
            });
        }
        self.file.default_chain = name.to_string();
        Ok(())
    }

    /// Name of the default chain.
    pub fn default_chain(&self) -> &str {
        &self.file.default_chain
    }
}

/// Write a config file atomically.
fn write_config_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    // Write to temp file in same directory (for atomic rename)
    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
