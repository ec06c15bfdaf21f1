//! Per-node-type command tree and resolution.
//!
//! The tree holds one handler per [`CommandSpec`]. Each handler is a closure
//! built by [`make_handler`] that owns its own `CommandSpec` clone (and the
//! specialized hook, if any). Handlers never share mutable state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::render::render;
use crate::dispatch::special::SpecializedCommand;
use crate::spec::{CommandSpec, NodeType};

type Handler = Box<dyn Fn(&[String]) -> Resolution + Send + Sync>;

/// Coarse classification of a resolution, stable for a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    Empty,
    Unknown,
    Usage,
    Literal,
    Default,
    Invalid,
    Specialized,
}

/// Outcome of resolving a command line, independent of the target node.
#[derive(Clone)]
pub enum Resolution {
    /// No tokens at all
    Empty,
    /// The first token names no command
    UnknownCommand(String),
    /// Command given without arguments
    Usage(String),
    /// A subcommand template to render with `args`
    Template {
        template: Arc<str>,
        args: Arc<[String]>,
        kind: ResolutionKind,
    },
    /// No literal or default subcommand matched
    Invalid { command: String },
    /// A specialized hook takes over
    Specialized {
        hook: Arc<dyn SpecializedCommand>,
        rest: Arc<[String]>,
    },
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Empty => f.write_str("Empty"),
            Resolution::UnknownCommand(name) => f.debug_tuple("UnknownCommand").field(name).finish(),
            Resolution::Usage(usage) => f.debug_tuple("Usage").field(usage).finish(),
            Resolution::Template { template, args, kind } => f
                .debug_struct("Template")
                .field("template", template)
                .field("args", args)
                .field("kind", kind)
                .finish(),
            Resolution::Invalid { command } => {
                f.debug_struct("Invalid").field("command", command).finish()
            }
            Resolution::Specialized { hook, rest } => f
                .debug_struct("Specialized")
                .field("hook", &hook.name())
                .field("rest", rest)
                .finish(),
        }
    }
}

impl Resolution {
    pub fn kind(&self) -> ResolutionKind {
        match self {
            Resolution::Empty => ResolutionKind::Empty,
            Resolution::UnknownCommand(_) => ResolutionKind::Unknown,
            Resolution::Usage(_) => ResolutionKind::Usage,
            Resolution::Template { kind, .. } => *kind,
            Resolution::Invalid { .. } => ResolutionKind::Invalid,
            Resolution::Specialized { .. } => ResolutionKind::Specialized,
        }
    }

    /// Pair this outcome with one target node.
    pub fn bind(&self, target: impl Into<String>) -> ResolvedInvocation {
        ResolvedInvocation {
            resolution: self.clone(),
            target: target.into(),
        }
    }
}

/// A resolution bound to a concrete target, ready to produce text.
#[derive(Debug, Clone)]
pub struct ResolvedInvocation {
    pub resolution: Resolution,
    pub target: String,
}

impl ResolvedInvocation {
    /// Produce the response text. Never fails; diagnostics are text too.
    pub async fn execute(&self) -> String {
        match &self.resolution {
            Resolution::Empty => "Empty command".to_string(),
            Resolution::UnknownCommand(name) => format!("Unknown command: {name}"),
            Resolution::Usage(usage) => usage.clone(),
            Resolution::Template { template, args, .. } => render(template, &self.target, args),
            Resolution::Invalid { command } => format!("Invalid subcommand for {command}"),
            Resolution::Specialized { hook, rest } => hook.execute(&self.target, rest).await,
        }
    }
}

/// Invocable commands for one node type.
pub struct CommandTree {
    node_type: NodeType,
    handlers: HashMap<String, Handler>,
}

impl CommandTree {
    /// Build a tree from command specs. A hook is attached to the command
    /// whose name it reports; hooks naming an undeclared command are skipped.
    pub fn build(
        node_type: NodeType,
        commands: &[CommandSpec],
        hooks: &[Arc<dyn SpecializedCommand>],
    ) -> Self {
        let mut handlers = HashMap::with_capacity(commands.len());
        for spec in commands {
            let hook = hooks.iter().find(|h| h.name() == spec.name).cloned();
            handlers.insert(spec.name.clone(), make_handler(spec.clone(), hook));
        }

        for hook in hooks {
            if !handlers.contains_key(hook.name()) {
                tracing::debug!(
                    node_type = %node_type,
                    hook = hook.name(),
                    "specialized hook has no matching command"
                );
            }
        }

        Self { node_type, handlers }
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Resolve `[commandName, ...rest]`.
    pub fn resolve(&self, line: &[String]) -> Resolution {
        let Some((name, rest)) = line.split_first() else {
            return Resolution::Empty;
        };
        match self.handlers.get(name) {
            Some(handler) => handler(rest),
            None => Resolution::UnknownCommand(name.clone()),
        }
    }

    /// Tokenize on whitespace and resolve.
    pub fn resolve_line(&self, line: &str) -> Resolution {
        self.resolve(&tokenize(line))
    }
}

pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

fn make_handler(spec: CommandSpec, hook: Option<Arc<dyn SpecializedCommand>>) -> Handler {
    Box::new(move |rest: &[String]| {
        if let Some(hook) = &hook {
            if hook.accepts(rest) {
                return Resolution::Specialized {
                    hook: Arc::clone(hook),
                    rest: rest.into(),
                };
            }
        }

        let Some(first) = rest.first() else {
            return Resolution::Usage(spec.default_usage.clone());
        };

        if let Some(sub) = spec.literal(first) {
            return Resolution::Template {
                template: sub.response.as_str().into(),
                args: rest.into(),
                kind: ResolutionKind::Literal,
            };
        }

        if let Some(sub) = spec.default_subcommand() {
            // The command name fills the subcommand slot, so `${arg1}` is the
            // first argument the caller typed.
            let args: Vec<String> = std::iter::once(spec.name.clone())
                .chain(rest.iter().cloned())
                .collect();
            return Resolution::Template {
                template: sub.response.as_str().into(),
                args: args.into(),
                kind: ResolutionKind::Default,
            };
        }

        Resolution::Invalid {
            command: spec.name.clone(),
        }
    })
}
