//! Operator-side collaborators: HTTP client, saved port and shell.

pub mod api;
pub mod port;
pub mod shell;

pub use api::{ApiClient, ConnectInfo};
pub use shell::{Shell, ShellAction};
