//! Command server: `nodeshell serve`.

use std::path::PathBuf;

use anyhow::Result;
use nodeshell::settings::ServerSettings;

/// CLI values layered on top of the settings file.
pub struct ServeOverrides {
    pub settings: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub port: Option<u16>,
    pub host: Option<String>,
    pub verify_targets: bool,
}

pub async fn cmd_serve(overrides: ServeOverrides) -> Result<()> {
    let mut settings = ServerSettings::load_or_default(overrides.settings.as_deref())?;

    if let Some(config) = overrides.config {
        settings.server.command_file = config;
    }
    if let Some(port) = overrides.port {
        settings.server.port = port;
    }
    if let Some(host) = overrides.host {
        settings.server.host = host;
    }
    if overrides.verify_targets {
        settings.dispatch.verify_targets = true;
    }

    nodeshell::server::start_server(settings).await
}
