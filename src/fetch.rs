//! Remote fetcher: one authenticated POST per batch.
//!
//! Every failure is folded into a [`BatchResponse`] carrying the status that
//! was observed, so a bad batch never aborts the run.

use crate::query::QueryPayload;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::collections::HashMap;

/// Status recorded when no HTTP response was received at all.
pub const TRANSPORT_FAILURE: u16 = 0;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name: String,
    pub stargazer_count: u64,
    pub description: Option<String>,
    pub owner: Owner,
    pub repository_topics: TopicConnection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicConnection {
    #[serde(default)]
    pub nodes: Vec<TopicNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicNode {
    pub topic: Topic,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Topic {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<HashMap<String, Option<RepositoryNode>>>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// Outcome for a single repository of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryResult {
    Found {
        name: String,
        owner: String,
        stars: u64,
        description: String,
        topics: Vec<String>,
    },
    Missing {
        status: u16,
    },
}

/// What one batch request produced: the HTTP status and the repositories
/// that came back, keyed by alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResponse {
    pub status: u16,
    pub data: HashMap<String, RepositoryNode>,
}

impl BatchResponse {
    pub fn failed(status: u16) -> Self {
        Self {
            status,
            data: HashMap::new(),
        }
    }

    /// Parse a 200 response body. An unreadable body or a null `data`
    /// leaves the batch empty; GraphQL errors are only logged.
    pub fn from_body(index: usize, body: &[u8]) -> Self {
        let parsed: GraphQlResponse = match serde_json::from_slice(body) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("Batch {index}: unreadable response body: {err}");
                return Self::failed(200);
            }
        };
        for err in &parsed.errors {
            warn!("Batch {index}: {}", err.message);
        }
        let data = parsed
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(alias, node)| node.map(|node| (alias, node)))
            .collect();
        Self { status: 200, data }
    }

    /// Look up one alias. A member missing from a successful batch is
    /// reported as 404, otherwise the batch status is passed through.
    pub fn resolve(&self, alias: &str) -> RepositoryResult {
        match self.data.get(alias) {
            Some(node) => RepositoryResult::Found {
                name: node.name.clone(),
                owner: node.owner.login.clone(),
                stars: node.stargazer_count,
                description: node.description.clone().unwrap_or_default(),
                topics: node
                    .repository_topics
                    .nodes
                    .iter()
                    .map(|n| n.topic.name.clone())
                    .collect(),
            },
            None if self.status == 200 => RepositoryResult::Missing { status: 404 },
            None => RepositoryResult::Missing {
                status: self.status,
            },
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchFetcher: Send + Sync {
    /// Submit one combined query. Never fails: problems show up in the
    /// returned status.
    async fn fetch(&self, index: usize, payload: &QueryPayload) -> BatchResponse;
}

/// Fetcher for the GitHub GraphQL API.
pub struct GithubFetcher {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl GithubFetcher {
    pub fn new(endpoint: &str, token: &str) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(http, endpoint, token))
    }

    pub fn with_client(http: reqwest::Client, endpoint: &str, token: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl BatchFetcher for GithubFetcher {
    async fn fetch(&self, index: usize, payload: &QueryPayload) -> BatchResponse {
        let resp = match self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("bearer {}", self.token))
            .json(payload)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                warn!("Batch {index}: request failed: {err}");
                return BatchResponse::failed(TRANSPORT_FAILURE);
            }
        };

        let status = resp.status().as_u16();
        info!("Batch {index}: HTTP {status}");
        if status != 200 {
            warn!("Batch {index}: remote answered {status}, recording every member as failed");
            return BatchResponse::failed(status);
        }

        match resp.bytes().await {
            Ok(body) => BatchResponse::from_body(index, &body),
            Err(err) => {
                warn!("Batch {index}: failed to read response: {err}");
                BatchResponse::failed(TRANSPORT_FAILURE)
            }
        }
    }
}
