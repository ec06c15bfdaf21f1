//! Validated, indexed command configuration.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::errors::{ConfigError, DispatchError};
use crate::spec::model::{CommandConfig, CommandSpec, NodeType};

/// Command declarations for both node types, validated and indexed by name.
///
/// A registry is immutable once built. Reloading produces a new registry;
/// nothing is ever merged into an existing one.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    config: CommandConfig,
    index: HashMap<NodeType, HashMap<String, usize>>,
}

impl CommandRegistry {
    /// Validate a parsed configuration and index it.
    pub fn from_config(config: CommandConfig) -> Result<Self, ConfigError> {
        let mut index = HashMap::new();
        for node_type in NodeType::ALL {
            index.insert(node_type, validate(node_type, config.commands(node_type))?);
        }
        Ok(Self { config, index })
    }

    /// Load a configuration file. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::parse_yaml(&content),
            _ => Self::parse_json(&content),
        }
    }

    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            format: "JSON",
            message: e.to_string(),
        })?;
        Self::from_config(config)
    }

    pub fn parse_yaml(content: &str) -> Result<Self, ConfigError> {
        let config = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            format: "YAML",
            message: e.to_string(),
        })?;
        Self::from_config(config)
    }

    /// Commands for a node type in declaration order.
    pub fn commands_for(&self, node_type: NodeType) -> &[CommandSpec] {
        self.config.commands(node_type)
    }

    pub fn lookup(&self, node_type: NodeType, name: &str) -> Result<&CommandSpec, DispatchError> {
        self.index
            .get(&node_type)
            .and_then(|names| names.get(name))
            .map(|&i| &self.config.commands(node_type)[i])
            .ok_or_else(|| DispatchError::CommandNotFound {
                node_type: node_type.to_string(),
                name: name.to_string(),
            })
    }

    pub fn config(&self) -> &CommandConfig {
        &self.config
    }
}

fn validate(
    node_type: NodeType,
    commands: &[CommandSpec],
) -> Result<HashMap<String, usize>, ConfigError> {
    let mut names = HashMap::with_capacity(commands.len());

    for (i, command) in commands.iter().enumerate() {
        if command.name.trim().is_empty() {
            return Err(ConfigError::EmptyCommandName {
                node_type: node_type.to_string(),
            });
        }
        if names.insert(command.name.clone(), i).is_some() {
            return Err(ConfigError::DuplicateCommand {
                node_type: node_type.to_string(),
                name: command.name.clone(),
            });
        }

        let defaults = command.subcommands.iter().filter(|s| s.is_default()).count();
        if defaults > 1 {
            return Err(ConfigError::DuplicateDefault {
                node_type: node_type.to_string(),
                command: command.name.clone(),
            });
        }

        if command.subcommands.is_empty() {
            tracing::warn!(
                node_type = %node_type,
                command = %command.name,
                "command declares no subcommands; only usage and specialized handling apply"
            );
        }

        let mut seen = HashSet::new();
        for sub in &command.subcommands {
            if !seen.insert(sub.name.as_str()) {
                tracing::warn!(
                    node_type = %node_type,
                    command = %command.name,
                    subcommand = %sub.name,
                    "duplicate subcommand; the first declaration wins"
                );
            }
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ue": { "commands": [
            { "name": "register", "help": "Register the UE", "defaultUsage": "register <amf>",
              "subcommands": [
                { "name": "default", "help": "any", "response": "Registered ${nodeName} with args ${arg1}" }
              ] },
            { "name": "deregister", "help": "Deregister", "defaultUsage": "deregister now",
              "subcommands": [ { "name": "now", "help": "", "response": "Bye from ${nodeName}" } ] }
        ] },
        "gnb": { "commands": [
            { "name": "status", "help": "Status", "defaultUsage": "status <what>",
              "subcommands": [ { "name": "cells", "help": "", "response": "2 cells" } ] }
        ] }
    }"#;

    #[test]
    fn parses_and_preserves_declaration_order() {
        let registry = CommandRegistry::parse_json(SAMPLE).unwrap();
        let names: Vec<_> = registry
            .commands_for(NodeType::Ue)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["register", "deregister"]);
        assert_eq!(registry.commands_for(NodeType::Gnb).len(), 1);
    }

    #[test]
    fn lookup_is_scoped_per_node_type() {
        let registry = CommandRegistry::parse_json(SAMPLE).unwrap();
        assert_eq!(
            registry.lookup(NodeType::Gnb, "status").unwrap().help,
            "Status"
        );
        let err = registry.lookup(NodeType::Ue, "status").unwrap_err();
        assert!(matches!(err, DispatchError::CommandNotFound { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = CommandRegistry::parse_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "JSON", .. }));
    }

    #[test]
    fn rejects_duplicate_command_names() {
        let json = r#"{"gnb":{"commands":[{"name":"status"},{"name":"status"}]}}"#;
        let err = CommandRegistry::parse_json(json).unwrap_err();
        match err {
            ConfigError::DuplicateCommand { node_type, name } => {
                assert_eq!(node_type, "gnb");
                assert_eq!(name, "status");
            }
            other => panic!("Expected DuplicateCommand, got {other:?}"),
        }
    }

    #[test]
    fn same_name_allowed_across_node_types() {
        let json = r#"{"ue":{"commands":[{"name":"status"}]},"gnb":{"commands":[{"name":"status"}]}}"#;
        assert!(CommandRegistry::parse_json(json).is_ok());
    }

    #[test]
    fn rejects_two_default_subcommands() {
        let json = r#"{"ue":{"commands":[{"name":"ping","subcommands":[
            {"name":"default","response":"a"},{"name":"default","response":"b"}]}]}}"#;
        let err = CommandRegistry::parse_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateDefault { command, .. } if command == "ping"));
    }

    #[test]
    fn rejects_empty_command_name() {
        let json = r#"{"ue":{"commands":[{"name":"  "}]}}"#;
        let err = CommandRegistry::parse_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCommandName { .. }));
    }

    #[test]
    fn parses_yaml_source() {
        let yaml = r#"
ue:
  commands:
    - name: attach
      help: Attach to the network
      defaultUsage: attach <apn>
      subcommands:
        - name: default
          response: "${nodeName} attached"
gnb:
  commands: []
"#;
        let registry = CommandRegistry::parse_yaml(yaml).unwrap();
        let attach = registry.lookup(NodeType::Ue, "attach").unwrap();
        assert_eq!(attach.default_usage, "attach <apn>");
        assert!(attach.default_subcommand().is_some());
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("command.json");
        std::fs::write(&json_path, SAMPLE).unwrap();
        assert!(CommandRegistry::load(&json_path).is_ok());

        let yaml_path = dir.path().join("command.yml");
        std::fs::write(&yaml_path, "ue:\n  commands: []\n").unwrap();
        assert!(CommandRegistry::load(&yaml_path).is_ok());
    }

    #[test]
    fn bundled_demo_config_is_valid() {
        let registry = CommandRegistry::parse_json(include_str!("../../demos/command.json")).unwrap();
        assert!(registry.lookup(NodeType::Ue, "register").is_ok());
        assert!(registry.lookup(NodeType::Gnb, "status").is_ok());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CommandRegistry::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn reloading_replaces_instead_of_merging() {
        let first = CommandRegistry::parse_json(SAMPLE).unwrap();
        assert!(first.lookup(NodeType::Ue, "register").is_ok());

        let second =
            CommandRegistry::parse_json(r#"{"ue":{"commands":[{"name":"detach"}]}}"#).unwrap();
        assert!(second.lookup(NodeType::Ue, "register").is_err());
        assert!(second.lookup(NodeType::Gnb, "status").is_err());
        assert!(second.lookup(NodeType::Ue, "detach").is_ok());
    }
}
