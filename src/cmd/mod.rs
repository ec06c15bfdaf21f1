//! CLI command implementations.
//!
//! | Module  | Commands handled                                 |
//! |---------|--------------------------------------------------|
//! | `serve` | `Serve`                                          |
//! | `fleet` | `Connect`, `Dump`, `Commands`, `Check`, `Reload` |
//! | `shell` | `Run`, `Shell`                                   |

pub mod fleet;
pub mod serve;
pub mod shell;

pub use fleet::{cmd_check, cmd_commands, cmd_connect, cmd_dump, cmd_reload};
pub use serve::{ServeOverrides, cmd_serve};
pub use shell::{cmd_run, cmd_shell};
