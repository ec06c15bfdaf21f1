//! Known node identities per node type.
//!
//! [`NodeDirectory`] is the seam for a live registry; [`StaticDirectory`] is
//! the in-memory set seeded at startup.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::spec::NodeType;

#[async_trait]
pub trait NodeDirectory: Send + Sync {
    async fn exists(&self, node_type: NodeType, identity: &str) -> bool;

    /// All identities for a node type, in directory order.
    async fn list_all(&self, node_type: NodeType) -> Vec<String>;
}

/// Seed lists for [`StaticDirectory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSeed {
    #[serde(default)]
    pub ue: Vec<String>,
    #[serde(default)]
    pub gnb: Vec<String>,
}

impl Default for NodeSeed {
    fn default() -> Self {
        Self {
            ue: vec![
                "imsi-306956963543741".to_string(),
                "imsi-306950959944062".to_string(),
                "imsi-208937563328413".to_string(),
                "imsi-208931340068521".to_string(),
            ],
            gnb: vec![
                "MSSIM-gnb-001-01-1".to_string(),
                "MSSIM-gnb-002-01-1".to_string(),
                "MSSIM-gnb-003-02-1".to_string(),
                "MSSIM-gnb-003-03-2".to_string(),
            ],
        }
    }
}

/// Fixed in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    nodes: HashMap<NodeType, Vec<String>>,
}

impl StaticDirectory {
    pub fn new(seed: NodeSeed) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(NodeType::Ue, dedup(seed.ue));
        nodes.insert(NodeType::Gnb, dedup(seed.gnb));
        Self { nodes }
    }

    fn slice(&self, node_type: NodeType) -> &[String] {
        self.nodes.get(&node_type).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[async_trait]
impl NodeDirectory for StaticDirectory {
    async fn exists(&self, node_type: NodeType, identity: &str) -> bool {
        self.slice(node_type).iter().any(|id| id == identity)
    }

    async fn list_all(&self, node_type: NodeType) -> Vec<String> {
        self.slice(node_type).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_seed_lists_original_fleet() {
        let dir = StaticDirectory::new(NodeSeed::default());
        let ues = dir.list_all(NodeType::Ue).await;
        assert_eq!(ues.len(), 4);
        assert_eq!(ues[0], "imsi-306956963543741");
        assert_eq!(dir.list_all(NodeType::Gnb).await[3], "MSSIM-gnb-003-03-2");
    }

    #[tokio::test]
    async fn unknown_identity_does_not_exist() {
        let dir = StaticDirectory::new(NodeSeed::default());
        assert!(!dir.exists(NodeType::Ue, "imsi-unknown").await);
        assert!(dir.exists(NodeType::Ue, "imsi-208937563328413").await);
    }

    #[tokio::test]
    async fn identities_are_scoped_to_node_type() {
        let dir = StaticDirectory::new(NodeSeed::default());
        assert!(!dir.exists(NodeType::Gnb, "imsi-208937563328413").await);
    }

    #[tokio::test]
    async fn duplicate_seeds_collapse_preserving_order() {
        let dir = StaticDirectory::new(NodeSeed {
            ue: vec!["b".into(), "a".into(), "b".into()],
            gnb: vec![],
        });
        assert_eq!(dir.list_all(NodeType::Ue).await, vec!["b", "a"]);
        assert!(dir.list_all(NodeType::Gnb).await.is_empty());
    }
}
