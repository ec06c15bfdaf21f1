//! Typed error hierarchy for nodeshell.
//!
//! Two enums cover the library:
//! - `ConfigError`: command configuration that cannot be served (fatal at startup)
//! - `DispatchError`: structural request errors (unknown node type, missing command)
//!
//! Command-resolution failures are not errors: they are folded into the
//! textual response like any other shell output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a command configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read command config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} command config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Command with an empty name declared for node type {node_type}")]
    EmptyCommandName { node_type: String },

    #[error("Command '{name}' is declared more than once for node type {node_type}")]
    DuplicateCommand { node_type: String, name: String },

    #[error("Command '{command}' for node type {node_type} declares more than one default subcommand")]
    DuplicateDefault { node_type: String, command: String },
}

/// Errors surfaced to callers as structured failures rather than text.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid node type '{0}'")]
    UnknownNodeType(String),

    #[error("Command '{name}' not found for node type {node_type}")]
    CommandNotFound { node_type: String, name: String },

    #[error("No target node given")]
    NoTargets,

    #[error("Node '{identity}' does not exist for node type {node_type}")]
    UnknownNode { node_type: String, identity: String },
}
