//! Command configuration data model.
//!
//! The wire shape mirrors the JSON documents operators already keep:
//!
//! ```json
//! {
//!   "ue":  { "commands": [ { "name": "register", "help": "...", "defaultUsage": "...",
//!                            "subcommands": [ { "name": "default", "help": "...", "response": "..." } ] } ] },
//!   "gnb": { "commands": [] }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::DispatchError;

/// Reserved subcommand name that matches when no literal subcommand does.
pub const DEFAULT_SUBCOMMAND: &str = "default";

/// The two fleet categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// User equipment
    Ue,
    /// Base station (gNodeB)
    Gnb,
}

impl NodeType {
    pub const ALL: [NodeType; 2] = [NodeType::Ue, NodeType::Gnb];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Ue => "ue",
            NodeType::Gnb => "gnb",
        }
    }

    /// Human-readable label used by the connect handshake and the shell banner.
    pub fn label(&self) -> &'static str {
        match self {
            NodeType::Ue => "User Equipment",
            NodeType::Gnb => "gNodeB",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ue" => Ok(NodeType::Ue),
            "gnb" => Ok(NodeType::Gnb),
            _ => Err(DispatchError::UnknownNodeType(s.to_string())),
        }
    }
}

/// A subcommand and the response template it renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcommandSpec {
    pub name: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub response: String,
}

impl SubcommandSpec {
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SUBCOMMAND
    }
}

/// A top-level command available on one node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    pub name: String,
    #[serde(default)]
    pub help: String,
    /// Printed when the command is invoked without arguments
    #[serde(default)]
    pub default_usage: String,
    #[serde(default)]
    pub subcommands: Vec<SubcommandSpec>,
}

impl CommandSpec {
    /// First subcommand whose name equals `name` literally.
    pub fn literal(&self, name: &str) -> Option<&SubcommandSpec> {
        self.subcommands.iter().find(|s| s.name == name)
    }

    /// The catch-all subcommand, if declared.
    pub fn default_subcommand(&self) -> Option<&SubcommandSpec> {
        self.subcommands.iter().find(|s| s.is_default())
    }
}

/// Commands declared for one node type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCommands {
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

/// The complete command configuration for both node types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default)]
    pub ue: NodeCommands,
    #[serde(default)]
    pub gnb: NodeCommands,
}

impl CommandConfig {
    pub fn commands(&self, node_type: NodeType) -> &[CommandSpec] {
        match node_type {
            NodeType::Ue => &self.ue.commands,
            NodeType::Gnb => &self.gnb.commands,
        }
    }
}
