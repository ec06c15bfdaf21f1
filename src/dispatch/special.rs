//! Specialized commands: behavior that bypasses subcommand/template resolution.
//!
//! A hook is attached to one command name of one node type when the tree is
//! built. For every invocation of that command the tree first asks the hook
//! whether it [`accepts`](SpecializedCommand::accepts) the arguments; if not,
//! ordinary resolution proceeds.

use std::time::Duration;

use async_trait::async_trait;

/// Default upper bound on the timed registration wait.
pub const DEFAULT_MAX_REGISTER_WAIT_MS: u64 = 10_000;

#[async_trait]
pub trait SpecializedCommand: Send + Sync {
    /// Command name the hook attaches to.
    fn name(&self) -> &str;

    /// Whether this hook handles `rest` (the arguments after the command name).
    fn accepts(&self, rest: &[String]) -> bool;

    /// Produce the response for one target node.
    async fn execute(&self, node: &str, rest: &[String]) -> String;
}

/// Parsed `register -h <ms> --amf <name>...` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterArgs {
    pub wait_ms: i64,
    pub amfs: Vec<String>,
}

impl RegisterArgs {
    /// Scan for `-h <ms>` and repeated `--amf <name>`. A later `-h` overrides
    /// an earlier one; an unparsable wait value is ignored and the token after
    /// `-h` is scanned as usual.
    pub fn parse(rest: &[String]) -> Self {
        let mut parsed = Self::default();
        let mut i = 0;
        while i < rest.len() {
            let next = rest.get(i + 1);
            match (rest[i].as_str(), next) {
                ("-h", Some(value)) => {
                    if let Ok(ms) = value.parse::<i64>() {
                        parsed.wait_ms = ms;
                        i += 1;
                    }
                }
                ("--amf", Some(amf)) => {
                    parsed.amfs.push(amf.clone());
                    i += 1;
                }
                _ => {}
            }
            i += 1;
        }
        parsed
    }

    pub fn is_timed(&self) -> bool {
        self.wait_ms > 0 && !self.amfs.is_empty()
    }
}

/// `register` for UEs with a wait time and target AMFs.
///
/// Really sleeps for the requested time, capped at `max_wait`.
#[derive(Debug, Clone)]
pub struct TimedRegistration {
    max_wait: Duration,
}

impl TimedRegistration {
    pub fn new(max_wait: Duration) -> Self {
        Self { max_wait }
    }

    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }
}

impl Default for TimedRegistration {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_MAX_REGISTER_WAIT_MS))
    }
}

#[async_trait]
impl SpecializedCommand for TimedRegistration {
    fn name(&self) -> &str {
        "register"
    }

    fn accepts(&self, rest: &[String]) -> bool {
        RegisterArgs::parse(rest).is_timed()
    }

    async fn execute(&self, node: &str, rest: &[String]) -> String {
        let args = RegisterArgs::parse(rest);
        let requested = Duration::from_millis(args.wait_ms.max(0) as u64);
        let cap_ms = self.max_wait.as_millis();

        let mut lines = vec![format!("Waiting ... {} mili seconds", args.wait_ms)];
        let wait = if requested > self.max_wait {
            lines.push(format!("Note: Wait time limited to {cap_ms} ms for API safety"));
            self.max_wait
        } else {
            requested
        };

        tracing::debug!(node, wait_ms = wait.as_millis() as u64, "timed registration");
        tokio::time::sleep(wait).await;

        lines.push(format!(
            "Done registration for UE {} to {}",
            node,
            args.amfs.join(" ")
        ));
        lines.join("\n")
    }
}
