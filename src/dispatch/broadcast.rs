//! Concurrent fan-out of one resolution to many target nodes.
//!
//! A single target is executed inline. Two or more targets each get their own
//! tokio task; the join handles are kept in target order, so the aggregated
//! output follows the caller's order no matter which task finishes first.

use futures::future::join_all;

use crate::dispatch::tree::Resolution;

/// Per-target responses in caller-specified order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedResponse {
    pub entries: Vec<(String, String)>,
}

impl AggregatedResponse {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render for display: a lone target yields its bare text. With several
    /// targets every output line, continuation lines included, is prefixed
    /// with `Node <id>: `.
    pub fn into_text(self) -> String {
        match self.entries.len() {
            0 => String::new(),
            1 => self.entries.into_iter().map(|(_, text)| text).collect(),
            _ => self
                .entries
                .into_iter()
                .flat_map(|(node, text)| {
                    text.split('\n')
                        .map(|line| format!("Node {node}: {line}"))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BroadcastExecutor;

impl BroadcastExecutor {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self, resolution: &Resolution, targets: &[String]) -> AggregatedResponse {
        if let [target] = targets {
            let text = resolution.bind(target.as_str()).execute().await;
            return AggregatedResponse {
                entries: vec![(target.clone(), text)],
            };
        }

        tracing::debug!(targets = targets.len(), kind = ?resolution.kind(), "broadcasting");

        let handles: Vec<_> = targets
            .iter()
            .map(|target| {
                let invocation = resolution.bind(target.as_str());
                tokio::spawn(async move { invocation.execute().await })
            })
            .collect();

        let results = join_all(handles).await;

        let entries = targets
            .iter()
            .zip(results)
            .map(|(target, result)| {
                let text = result.unwrap_or_else(|e| {
                    tracing::error!(node = %target, error = %e, "broadcast worker failed");
                    format!("<internal error: {e}>")
                });
                (target.clone(), text)
            })
            .collect();

        AggregatedResponse { entries }
    }
}
