//! Saved server port (`.port` in the working directory).

use std::path::Path;

use anyhow::{Context, Result, bail};

pub const PORT_FILE: &str = ".port";

pub const NOT_CONNECTED: &str = "Not connected to any port. Please use -p <port> first";

pub fn save_port(dir: &Path, port: u16) -> Result<()> {
    let path = dir.join(PORT_FILE);
    std::fs::write(&path, port.to_string())
        .with_context(|| format!("Error saving port to {}", path.display()))
}

/// Saved port, or `None` when missing, unreadable or zero.
pub fn load_port(dir: &Path) -> Option<u16> {
    let content = std::fs::read_to_string(dir.join(PORT_FILE)).ok()?;
    content.trim().parse::<u16>().ok().filter(|&p| p != 0)
}

/// An explicit port wins over the saved one.
pub fn resolve_port(dir: &Path, explicit: Option<u16>) -> Result<u16> {
    match explicit.filter(|&p| p != 0).or_else(|| load_port(dir)) {
        Some(port) => Ok(port),
        None => bail!(NOT_CONNECTED),
    }
}
