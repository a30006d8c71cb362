//! HTTP implementation of the backend contract
//!
//! Endpoints live under `/api/business/`. Every read wraps its payload
//! in a `responseData` envelope; writes answer with a small ack object
//! whose `message` carries rejection text (duplicates included).

use super::traits::{BusinessApi, RemoteError, RemoteResult};
use crate::charts::{ChartKind, ChartRow};
use crate::detail::{DetailQuery, DetailRow};
use crate::tree::{Level, Node, NodeId};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const TREE_PATH: &str = "/api/business/tree";
const CHART_PATH: &str = "/api/business/chart";
const CREATE_PATH: &str = "/api/business/project/info";
const DETAILS_PATH: &str = "/api/business/project/details/all";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Read envelope shared by the list endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "responseData")]
    response_data: Option<T>,
}

/// The chart endpoint nests its rows one level deeper.
#[derive(Debug, Deserialize)]
struct ChartPayload {
    #[serde(default)]
    data: Option<Vec<ChartRow>>,
}

/// Ack returned by the create endpoint.
#[derive(Debug, Deserialize)]
struct WriteAck {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// `BusinessApi` over HTTP.
pub struct HttpBusinessApi {
    client: Client,
    base_url: String,
}

impl HttpBusinessApi {
    /// Build a client against the given base URL (scheme + host, no
    /// trailing slash required).
    pub fn new(base_url: impl Into<String>) -> RemoteResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BusinessApi for HttpBusinessApi {
    async fn fetch_tree(&self) -> RemoteResult<Vec<Node>> {
        let envelope: Envelope<Vec<Node>> = self
            .client
            .get(self.url(TREE_PATH))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let nodes = envelope.response_data.unwrap_or_default();
        debug!(nodes = nodes.len(), "fetched tree snapshot");
        Ok(nodes)
    }

    async fn create_node(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<&NodeId>,
        uuid: Option<&str>,
    ) -> RemoteResult<()> {
        let mut params: Vec<(&str, String)> = vec![
            ("level", level.wire().to_string()),
            ("name", name.to_string()),
        ];
        if let Some(pid) = parent_id {
            params.push(("upid", pid.as_str().to_string()));
        }
        if let Some(uuid) = uuid {
            params.push(("uuid", uuid.to_string()));
        }

        let response = self
            .client
            .get(self.url(CREATE_PATH))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Rejected { message });
        }

        let ack: WriteAck = response.json().await?;
        if ack.success == Some(false) {
            return Err(RemoteError::Rejected {
                message: ack.message.unwrap_or_default(),
            });
        }
        Ok(())
    }

    async fn fetch_chart(&self, kind: ChartKind) -> RemoteResult<Vec<ChartRow>> {
        let envelope: Envelope<ChartPayload> = self
            .client
            .get(self.url(CHART_PATH))
            .query(&[("lx", kind.wire().to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope
            .response_data
            .and_then(|p| p.data)
            .unwrap_or_default())
    }

    async fn fetch_project_details(&self, query: &DetailQuery) -> RemoteResult<Vec<DetailRow>> {
        let envelope: Envelope<Vec<DetailRow>> = self
            .client
            .get(self.url(DETAILS_PATH))
            .query(&query.to_params())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.response_data.unwrap_or_default())
    }
}
