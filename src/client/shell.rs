//! Interactive shell front-end.
//!
//! The shell knows command names only so it can offer `help` and reject
//! typos locally. Every recognised line is forwarded verbatim (re-joined on
//! single spaces) to the server together with the connected identities;
//! resolution happens server-side.

use std::io::{BufRead, ErrorKind};

use anyhow::{Context, Result};
use console::{Term, style};
use dialoguer::Input;

use crate::client::api::ApiClient;
use crate::server::api::CommandSummary;
use crate::spec::{CommandRegistry, NodeType};

pub const PROMPT: &str = ">>>";

/// What to do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Nothing,
    Help,
    Exit,
    Forward(String),
    Unknown(String),
}

pub struct Shell {
    node_type: NodeType,
    targets: Vec<String>,
    commands: Vec<CommandSummary>,
}

impl Shell {
    pub fn new(node_type: NodeType, targets: Vec<String>, commands: Vec<CommandSummary>) -> Self {
        Self {
            node_type,
            targets,
            commands,
        }
    }

    /// Command summaries from a local config file instead of the server.
    pub fn commands_from_file(path: &std::path::Path, node_type: NodeType) -> Result<Vec<CommandSummary>> {
        let registry = CommandRegistry::load(path)
            .with_context(|| format!("Error loading commands from {}", path.display()))?;
        Ok(registry
            .commands_for(node_type)
            .iter()
            .map(|c| CommandSummary {
                name: c.name.clone(),
                help: c.help.clone(),
                default_usage: c.default_usage.clone(),
            })
            .collect())
    }

    pub fn banner(&self) -> Vec<String> {
        let kind = match self.node_type {
            NodeType::Ue => "UE(s)",
            NodeType::Gnb => "gNodeB(s)",
        };
        vec![
            format!("Connected to {}: {}", kind, self.targets.join(", ")),
            "Type 'help' for available commands".to_string(),
        ]
    }

    pub fn help_text(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|c| c.name.len())
            .chain(["exit".len()])
            .max()
            .unwrap_or(0);

        let mut lines = vec!["Commands:".to_string()];
        for command in &self.commands {
            lines.push(format!("  {:width$}  {}", command.name, command.help));
        }
        lines.push(format!("  {:width$}  {}", "help", "display help"));
        lines.push(format!("  {:width$}  {}", "exit", "exit the program"));
        lines.join("\n")
    }

    pub fn interpret(&self, line: &str) -> ShellAction {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = tokens.first() else {
            return ShellAction::Nothing;
        };
        match first {
            "help" => ShellAction::Help,
            "exit" | "quit" => ShellAction::Exit,
            name if self.commands.iter().any(|c| c.name == name) => {
                ShellAction::Forward(tokens.join(" "))
            }
            name => ShellAction::Unknown(name.to_string()),
        }
    }

    /// Read-eval-print loop until `exit` or end of input.
    pub async fn run(&self, client: &ApiClient) -> Result<()> {
        for line in self.banner() {
            println!("{}", style(line).cyan());
        }

        let node_names = self.targets.join(" ");
        let interactive = Term::stdout().is_term();

        loop {
            let Some(line) = read_line(interactive).await? else {
                break;
            };

            match self.interpret(&line) {
                ShellAction::Nothing => {}
                ShellAction::Help => println!("{}", self.help_text()),
                ShellAction::Exit => break,
                ShellAction::Unknown(name) => {
                    println!("{}", style(format!("Unknown command: {name}")).red())
                }
                ShellAction::Forward(command) => {
                    match client.run_command(&command, self.node_type, &node_names).await {
                        Ok(response) => println!("{}", response.trim_end()),
                        Err(e) => println!("{}", style(format!("Error: {e:#}")).red()),
                    }
                }
            }
        }
        Ok(())
    }
}

/// Next input line, or `None` at end of input.
async fn read_line(interactive: bool) -> Result<Option<String>> {
    tokio::task::spawn_blocking(move || -> Result<Option<String>> {
        if interactive {
            match Input::<String>::new()
                .with_prompt(PROMPT)
                .allow_empty(true)
                .interact_text()
            {
                Ok(line) => Ok(Some(line)),
                Err(e) if is_end_of_input(&e) => Ok(None),
                Err(e) => Err(e).context("Failed to read from terminal"),
            }
        } else {
            let mut line = String::new();
            let read = std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read from stdin")?;
            Ok((read > 0).then_some(line))
        }
    })
    .await
    .context("Input reader task failed")?
}

/// Ctrl-C / Ctrl-D at the prompt end the session; other terminal errors don't.
fn is_end_of_input(err: &dialoguer::Error) -> bool {
    let dialoguer::Error::IO(io) = err;
    matches!(io.kind(), ErrorKind::Interrupted | ErrorKind::UnexpectedEof)
}
