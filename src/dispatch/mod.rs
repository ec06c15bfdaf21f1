//! Command dispatch: resolution, rendering and broadcast.
//!
//! ```text
//! command line ──> CommandTree::resolve ──> Resolution
//!                                              │ bind(target) per node
//!                                              v
//!                          BroadcastExecutor ──> ResolvedInvocation::execute
//!                                              │   (render / specialized hook)
//!                                              v
//!                                       AggregatedResponse
//! ```
//!
//! | Module      | Responsibility                                        |
//! |-------------|-------------------------------------------------------|
//! | `render`    | `${nodeName}` / `${argN}` substitution                 |
//! | `special`   | `SpecializedCommand` hook, `TimedRegistration`         |
//! | `tree`      | `CommandTree`, `Resolution`, `ResolvedInvocation`      |
//! | `broadcast` | `BroadcastExecutor`, `AggregatedResponse`              |
//! | `context`   | `DispatchContext` snapshot + atomic reload             |

pub mod broadcast;
pub mod context;
pub mod render;
pub mod special;
pub mod tree;

pub use broadcast::{AggregatedResponse, BroadcastExecutor};
pub use context::{DispatchContext, DispatchOptions, HookSet, Snapshot};
pub use render::render;
pub use special::{RegisterArgs, SpecializedCommand, TimedRegistration};
pub use tree::{CommandTree, Resolution, ResolutionKind, ResolvedInvocation};
