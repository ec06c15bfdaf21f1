//! The constructed dispatch context that every request runs against.
//!
//! Registry and command trees live in an immutable [`Snapshot`]. Requests
//! clone the current `Arc<Snapshot>` and release the lock before doing any
//! work; a reload builds a complete new snapshot and swaps the pointer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::directory::NodeDirectory;
use crate::dispatch::broadcast::{AggregatedResponse, BroadcastExecutor};
use crate::dispatch::special::{SpecializedCommand, TimedRegistration};
use crate::dispatch::tree::{CommandTree, tokenize};
use crate::errors::DispatchError;
use crate::spec::{CommandRegistry, NodeType};

/// Tunables for the dispatch context.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Upper bound for the timed `register` wait
    pub max_register_wait: Duration,
    /// Reject broadcasts naming identities absent from the directory
    pub verify_targets: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            max_register_wait: Duration::from_millis(
                crate::dispatch::special::DEFAULT_MAX_REGISTER_WAIT_MS,
            ),
            verify_targets: false,
        }
    }
}

/// Specialized hooks per node type.
#[derive(Clone, Default)]
pub struct HookSet {
    ue: Vec<Arc<dyn SpecializedCommand>>,
    gnb: Vec<Arc<dyn SpecializedCommand>>,
}

impl HookSet {
    /// Hooks every server starts with: timed `register` on UEs.
    pub fn standard(options: &DispatchOptions) -> Self {
        Self::default().with(
            NodeType::Ue,
            Arc::new(TimedRegistration::new(options.max_register_wait)),
        )
    }

    pub fn with(mut self, node_type: NodeType, hook: Arc<dyn SpecializedCommand>) -> Self {
        match node_type {
            NodeType::Ue => self.ue.push(hook),
            NodeType::Gnb => self.gnb.push(hook),
        }
        self
    }

    pub fn for_type(&self, node_type: NodeType) -> &[Arc<dyn SpecializedCommand>] {
        match node_type {
            NodeType::Ue => &self.ue,
            NodeType::Gnb => &self.gnb,
        }
    }
}

/// Registry plus the trees built from it.
pub struct Snapshot {
    registry: CommandRegistry,
    ue: CommandTree,
    gnb: CommandTree,
}

impl Snapshot {
    pub fn build(registry: CommandRegistry, hooks: &HookSet) -> Self {
        let ue = CommandTree::build(
            NodeType::Ue,
            registry.commands_for(NodeType::Ue),
            hooks.for_type(NodeType::Ue),
        );
        let gnb = CommandTree::build(
            NodeType::Gnb,
            registry.commands_for(NodeType::Gnb),
            hooks.for_type(NodeType::Gnb),
        );
        Self { registry, ue, gnb }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn tree(&self, node_type: NodeType) -> &CommandTree {
        match node_type {
            NodeType::Ue => &self.ue,
            NodeType::Gnb => &self.gnb,
        }
    }
}

pub struct DispatchContext {
    snapshot: RwLock<Arc<Snapshot>>,
    directory: Arc<dyn NodeDirectory>,
    hooks: HookSet,
    executor: BroadcastExecutor,
    options: DispatchOptions,
}

impl DispatchContext {
    /// Context with the standard hook set.
    pub fn new(
        registry: CommandRegistry,
        directory: Arc<dyn NodeDirectory>,
        options: DispatchOptions,
    ) -> Self {
        let hooks = HookSet::standard(&options);
        Self::with_hooks(registry, directory, options, hooks)
    }

    pub fn with_hooks(
        registry: CommandRegistry,
        directory: Arc<dyn NodeDirectory>,
        options: DispatchOptions,
        hooks: HookSet,
    ) -> Self {
        let snapshot = Arc::new(Snapshot::build(registry, &hooks));
        Self {
            snapshot: RwLock::new(snapshot),
            directory,
            hooks,
            executor: BroadcastExecutor::new(),
            options,
        }
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Replace the registry wholesale. In-flight requests keep the snapshot
    /// they started with.
    pub async fn reload(&self, registry: CommandRegistry) {
        let fresh = Arc::new(Snapshot::build(registry, &self.hooks));
        *self.snapshot.write().await = fresh;
        tracing::info!("command registry reloaded");
    }

    pub fn directory(&self) -> &Arc<dyn NodeDirectory> {
        &self.directory
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Resolve `command` once and run it against every identity in
    /// `node_names` (whitespace separated).
    pub async fn run_command(
        &self,
        node_type: NodeType,
        command: &str,
        node_names: &str,
    ) -> Result<AggregatedResponse, DispatchError> {
        let targets = tokenize(node_names);
        if targets.is_empty() {
            return Err(DispatchError::NoTargets);
        }

        if self.options.verify_targets {
            for target in &targets {
                if !self.directory.exists(node_type, target).await {
                    return Err(DispatchError::UnknownNode {
                        node_type: node_type.to_string(),
                        identity: target.clone(),
                    });
                }
            }
        }

        let snapshot = self.snapshot().await;
        let resolution = snapshot.tree(node_type).resolve_line(command);
        tracing::info!(
            node_type = %node_type,
            command,
            targets = targets.len(),
            kind = ?resolution.kind(),
            "dispatching command"
        );

        Ok(self.executor.run(&resolution, &targets).await)
    }
}
