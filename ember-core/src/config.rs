/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::ConfigError;

/// Configuration for the Ember runtime
///
/// Loaded from `config.toml` in the XDG `ember` configuration directory.
/// Every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmberConfig {
    /// Port queue configuration
    pub ports: PortsConfig,
    /// Snapshot encoding and decoding
    pub snapshot: SnapshotConfig,
    /// Actor lifecycle behavior
    pub lifecycle: LifecycleConfig,
    /// Tracing output
    pub logging: LoggingConfig,
}

/// Port queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortsConfig {
    /// Capacity of ports created without an explicit one; `0` means unbounded
    pub default_capacity: usize,
}

/// Snapshot configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Fail a restore when the snapshot carries fields the actor does not manage
    pub reject_unknown_fields: bool,
}

/// Lifecycle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Close capability handles still open after `will_migrate` or `will_end`
    pub close_leaked_capabilities: bool,
}

/// Tracing output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Directory for the log file; defaults to `ember/logs` under the XDG data home
    pub directory: Option<PathBuf>,
    /// File name inside `directory`
    pub file_name: String,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self { default_capacity: 5 }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            close_leaked_capabilities: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "ember.log".to_string(),
        }
    }
}

impl EmberConfig {
    /// Load configuration from XDG-compliant locations
    ///
    /// Looks for `$XDG_CONFIG_HOME/ember/config.toml`, then the XDG fallbacks.
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// logged and also yields the defaults.
    pub fn load() -> Self {
        let xdg_dirs = match xdg::BaseDirectories::with_prefix("ember") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        match xdg_dirs.find_config_file("config.toml") {
            Some(path) => Self::load_from(&path).unwrap_or_else(|e| {
                error!(error = ?e, "{e}, using defaults");
                Self::default()
            }),
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading configuration from: {}", path.display());
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&config_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn parse(config_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(config_str)
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: EmberConfig = EmberConfig::load();
}
