use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use nodeshell::spec::NodeType;

mod cmd;

#[derive(Parser)]
#[command(name = "nodeshell")]
#[command(version, about = "Command shell for a simulated UE/gNodeB fleet")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Server port override shared by client commands.
#[derive(Args, Clone, Copy)]
pub struct PortArg {
    /// Server port (defaults to the port saved by `connect`)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Target nodes for the interactive shell; exactly one flag is required.
#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub struct ShellTarget {
    /// Connect to UE node(s), space separated
    #[arg(long)]
    pub ue: Option<String>,

    /// Connect to gNodeB node(s), space separated
    #[arg(long)]
    pub gnb: Option<String>,
}

impl ShellTarget {
    fn resolve(&self) -> (NodeType, &str) {
        match (&self.ue, &self.gnb) {
            (Some(names), _) => (NodeType::Ue, names.as_str()),
            (None, Some(names)) => (NodeType::Gnb, names.as_str()),
            (None, None) => unreachable!("clap requires one of --ue or --gnb"),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the command server
    Serve {
        /// Command configuration file (JSON or YAML)
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,

        /// Server settings file (defaults to ./nodeshell.toml when present)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Port to serve on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Reject commands naming unknown nodes
        #[arg(long)]
        verify_targets: bool,
    },
    /// Connect to a server and remember its port
    Connect {
        #[arg(short, long)]
        port: u16,
    },
    /// List all UEs and gNodeBs
    Dump {
        #[command(flatten)]
        port: PortArg,
    },
    /// List the commands available for a node type
    Commands {
        node_type: NodeType,
        #[command(flatten)]
        port: PortArg,
    },
    /// Check whether a node exists
    Check {
        node_type: NodeType,
        node_name: String,
        #[command(flatten)]
        port: PortArg,
    },
    /// Run a single command on one or more nodes
    Run {
        node_type: NodeType,
        /// Node identities, space separated
        nodes: String,
        /// Command line to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
        #[command(flatten)]
        port: PortArg,
    },
    /// Ask the server to reload its command configuration
    Reload {
        #[command(flatten)]
        port: PortArg,
    },
    /// Open an interactive shell on UE or gNodeB nodes
    Shell {
        #[command(flatten)]
        target: ShellTarget,

        /// Read command names from a local config file instead of the server
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,

        #[command(flatten)]
        port: PortArg,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    nodeshell::logging::init_logging(cli.verbose, cli.log_json)?;

    let work_dir = std::env::current_dir().context("Failed to get current directory")?;

    match &cli.command {
        Commands::Serve {
            config,
            settings,
            port,
            host,
            verify_targets,
        } => {
            cmd::cmd_serve(cmd::ServeOverrides {
                settings: settings.clone(),
                config: config.clone(),
                port: *port,
                host: host.clone(),
                verify_targets: *verify_targets,
            })
            .await?;
        }
        Commands::Connect { port } => cmd::cmd_connect(&work_dir, *port).await?,
        Commands::Dump { port } => cmd::cmd_dump(&work_dir, port.port).await?,
        Commands::Commands { node_type, port } => {
            cmd::cmd_commands(&work_dir, *node_type, port.port).await?
        }
        Commands::Check {
            node_type,
            node_name,
            port,
        } => cmd::cmd_check(&work_dir, *node_type, node_name, port.port).await?,
        Commands::Run {
            node_type,
            nodes,
            command,
            port,
        } => cmd::cmd_run(&work_dir, *node_type, nodes, &command.join(" "), port.port).await?,
        Commands::Reload { port } => cmd::cmd_reload(&work_dir, port.port).await?,
        Commands::Shell {
            target,
            config,
            port,
        } => {
            let (node_type, names) = target.resolve();
            cmd::cmd_shell(&work_dir, node_type, names, config.as_deref(), port.port).await?;
        }
    }

    Ok(())
}
