//! Declarative command specifications.
//!
//! | Module     | Responsibility                                         |
//! |------------|--------------------------------------------------------|
//! | `model`    | Serde types: `CommandConfig`, `CommandSpec`, `NodeType` |
//! | `registry` | Validation and lookup: `CommandRegistry`               |

pub mod model;
pub mod registry;

pub use model::{
    CommandConfig, CommandSpec, DEFAULT_SUBCOMMAND, NodeCommands, NodeType, SubcommandSpec,
};
pub use registry::CommandRegistry;
