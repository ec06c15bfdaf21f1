//! Server queries: `nodeshell connect | dump | commands | check | reload`.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use nodeshell::client::ApiClient;
use nodeshell::client::port::{resolve_port, save_port};
use nodeshell::spec::NodeType;

pub async fn cmd_connect(work_dir: &Path, port: u16) -> Result<()> {
    let client = ApiClient::new(port);
    client
        .connect()
        .await
        .with_context(|| format!("Error connecting to server on port {port}"))?;
    save_port(work_dir, port)?;
    println!("Connected to port {} successfully", port);
    Ok(())
}

pub async fn cmd_dump(work_dir: &Path, port: Option<u16>) -> Result<()> {
    let client = ApiClient::new(resolve_port(work_dir, port)?);
    let dump = client.dump().await?;

    println!("{}", style("UEs:").bold());
    for ue in &dump.ue {
        println!("  {}", ue);
    }
    println!("{}", style("gNodeBs:").bold());
    for gnb in &dump.gnb {
        println!("  {}", gnb);
    }
    Ok(())
}

pub async fn cmd_commands(work_dir: &Path, node_type: NodeType, port: Option<u16>) -> Result<()> {
    let client = ApiClient::new(resolve_port(work_dir, port)?);
    let commands = client.list_commands(node_type).await?;

    if commands.is_empty() {
        println!("No commands configured for {}", node_type);
        return Ok(());
    }
    for command in commands {
        println!("{}  {}", style(&command.name).cyan(), command.help);
        if !command.default_usage.is_empty() {
            println!("    {}", style(&command.default_usage).dim());
        }
    }
    Ok(())
}

pub async fn cmd_check(
    work_dir: &Path,
    node_type: NodeType,
    node_name: &str,
    port: Option<u16>,
) -> Result<()> {
    let client = ApiClient::new(resolve_port(work_dir, port)?);
    if client.check_node(node_type, node_name).await? {
        println!("{} {} exists", node_type, node_name);
    } else {
        println!("{} {} does not exist", node_type, node_name);
    }
    Ok(())
}

pub async fn cmd_reload(work_dir: &Path, port: Option<u16>) -> Result<()> {
    let client = ApiClient::new(resolve_port(work_dir, port)?);
    let result = client.reload().await?;
    println!(
        "Reloaded: {} UE command(s), {} gNodeB command(s)",
        result["commands"]["ue"], result["commands"]["gnb"]
    );
    Ok(())
}
