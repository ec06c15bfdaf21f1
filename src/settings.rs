//! Server settings loaded from `nodeshell.toml`.
//!
//! Settings are layered: file values first, then CLI flags on top.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 4000
//! command_file = "command.json"
//!
//! [dispatch]
//! max_register_wait_ms = 10000
//! verify_targets = false
//!
//! [nodes]
//! ue = ["imsi-306956963543741"]
//! gnb = ["MSSIM-gnb-001-01-1"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::directory::NodeSeed;
use crate::dispatch::DispatchOptions;
use crate::dispatch::special::DEFAULT_MAX_REGISTER_WAIT_MS;

pub const DEFAULT_PORT: u16 = 4000;
pub const SETTINGS_FILE: &str = "nodeshell.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_command_file")]
    pub command_file: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_command_file() -> PathBuf {
    PathBuf::from("command.json")
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            command_file: default_command_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSection {
    #[serde(default = "default_max_register_wait_ms")]
    pub max_register_wait_ms: u64,
    #[serde(default)]
    pub verify_targets: bool,
}

fn default_max_register_wait_ms() -> u64 {
    DEFAULT_MAX_REGISTER_WAIT_MS
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            max_register_wait_ms: default_max_register_wait_ms(),
            verify_targets: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub dispatch: DispatchSection,
    #[serde(default)]
    pub nodes: NodeSeed,
}

impl ServerSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse nodeshell.toml")
    }

    /// Load from `path` if given, else from `./nodeshell.toml` when present,
    /// else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(SETTINGS_FILE);
                if local.exists() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            max_register_wait: Duration::from_millis(self.dispatch.max_register_wait_ms),
            verify_targets: self.dispatch.verify_targets,
        }
    }
}
