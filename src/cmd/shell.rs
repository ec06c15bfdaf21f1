//! Command execution: `nodeshell run` and `nodeshell shell`.

use std::path::Path;

use anyhow::{Result, bail};
use nodeshell::client::port::resolve_port;
use nodeshell::client::{ApiClient, Shell};
use nodeshell::spec::NodeType;

pub async fn cmd_run(
    work_dir: &Path,
    node_type: NodeType,
    nodes: &str,
    command: &str,
    port: Option<u16>,
) -> Result<()> {
    let client = ApiClient::new(resolve_port(work_dir, port)?);
    let response = client.run_command(command, node_type, nodes).await?;
    println!("{}", response.trim_end());
    Ok(())
}

pub async fn cmd_shell(
    work_dir: &Path,
    node_type: NodeType,
    names: &str,
    config: Option<&Path>,
    port: Option<u16>,
) -> Result<()> {
    let client = ApiClient::new(resolve_port(work_dir, port)?);

    let targets: Vec<String> = names.split_whitespace().map(String::from).collect();
    if targets.is_empty() {
        bail!("No node names given");
    }

    let commands = match config {
        Some(path) => Shell::commands_from_file(path, node_type)?,
        None => client.list_commands(node_type).await?,
    };

    Shell::new(node_type, targets, commands).run(&client).await
}
