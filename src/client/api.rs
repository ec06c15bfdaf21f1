//! HTTP client for the nodeshell server.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::server::api::{
    CommandList, CommandRequest, CommandResponse, CommandSummary, ExistsResponse, FleetDump,
    NodeList,
};
use crate::spec::NodeType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectInfo {
    pub status: String,
    #[serde(default)]
    pub objects: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Client for a server on the local host.
    pub fn new(port: u16) -> Self {
        Self::with_base_url(format!("http://127.0.0.1:{port}"))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn connect(&self) -> Result<ConnectInfo> {
        self.get(&["connect"]).await
    }

    pub async fn dump(&self) -> Result<FleetDump> {
        self.get(&["dump"]).await
    }

    pub async fn list_nodes(&self, node_type: NodeType) -> Result<Vec<String>> {
        let list: NodeList = self.get(&["dump", node_type.as_str()]).await?;
        Ok(list.nodes)
    }

    pub async fn list_commands(&self, node_type: NodeType) -> Result<Vec<CommandSummary>> {
        let list: CommandList = self.get(&["commands", node_type.as_str()]).await?;
        Ok(list.commands)
    }

    pub async fn check_node(&self, node_type: NodeType, name: &str) -> Result<bool> {
        let resp: ExistsResponse = self.get(&["check", node_type.as_str(), name]).await?;
        Ok(resp.exists)
    }

    /// Run `command` on `node_name` (one identity or several, space separated).
    pub async fn run_command(
        &self,
        command: &str,
        node_type: NodeType,
        node_name: &str,
    ) -> Result<String> {
        let request = CommandRequest {
            command: command.to_string(),
            node_type: node_type.to_string(),
            node_name: node_name.to_string(),
        };
        let resp = self
            .http
            .post(self.endpoint(&["command"])?)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to reach server at {}", self.base_url))?;
        let body: CommandResponse = decode(resp).await?;
        Ok(body.response)
    }

    pub async fn reload(&self) -> Result<serde_json::Value> {
        let resp = self
            .http
            .post(self.endpoint(&["reload"])?)
            .send()
            .await
            .with_context(|| format!("Failed to reach server at {}", self.base_url))?;
        decode(resp).await
    }

    /// URL for a route, one path segment per element. Each segment is
    /// percent-encoded, so identities containing `#`, `?` or `/` stay intact.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid server URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Server URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let resp = self
            .http
            .get(self.endpoint(segments)?)
            .send()
            .await
            .with_context(|| format!("Failed to reach server at {}", self.base_url))?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let bytes = resp.bytes().await.context("Failed to read server response")?;

    if !status.is_success() {
        match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(body) => bail!(body.error),
            Err(_) => bail!("Server returned {}", status),
        }
    }

    serde_json::from_slice(&bytes).context("Error decoding response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::with_base_url("http://localhost:4000/");
        assert_eq!(client.base_url(), "http://localhost:4000");
        assert_eq!(ApiClient::new(4100).base_url(), "http://127.0.0.1:4100");
    }

    #[test]
    fn endpoint_encodes_each_segment() {
        let client = ApiClient::new(4100);
        let url = client.endpoint(&["check", "ue", "imsi-1#ghost?x=1/y"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:4100/check/ue/imsi-1%23ghost%3Fx=1%2Fy");

        let prefixed = ApiClient::with_base_url("http://localhost:4000/api");
        assert_eq!(
            prefixed.endpoint(&["dump"]).unwrap().as_str(),
            "http://localhost:4000/api/dump"
        );
    }

    #[test]
    fn connect_info_tolerates_missing_objects() {
        let info: ConnectInfo = serde_json::from_str(r#"{"status":"Connected successfully"}"#).unwrap();
        assert!(info.objects.is_empty());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let client = ApiClient::new(9);
        let err = client.connect().await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to reach server"));
    }
}
