//! Inventory service session client
//!
//! [`InventoryClient`] is the per-run request context: it is created by
//! logging in with a [`ClientConfig`] and then carries the base URL, the
//! bearer token and the component type names to every call. Nothing here is
//! process-global; each tool creates exactly one client and passes it down.
//!
//! Endpoints used:
//! - `POST /machineAuthenticate` → bearer token (plain text)
//! - `POST /api/search/component/<type>` → `[{"componentUuid": ...}, ...]`
//! - `GET  /api/generateComponentUuid` → `"<id>"`
//! - `GET  /api/component/<id>` → `{"type": ..., "data": {...}, ...}`
//! - `POST /api/component/<id>` ← `{"type": ..., "data": {...}}`

use crate::config::{ClientConfig, ComponentTypes};
use crate::records::ComponentRecord;
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("sietch-qc/", env!("CARGO_PKG_VERSION"));

/// Which component collection to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Batch,
    Board,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Batch => f.write_str("batch"),
            ComponentKind::Board => f.write_str("board"),
        }
    }
}

/// Business key sent as the search body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchKey {
    #[serde(rename = "data.batchId")]
    pub batch_id: u32,
    #[serde(rename = "data.boardId", skip_serializing_if = "Option::is_none")]
    pub board_id: Option<u32>,
}

impl SearchKey {
    pub fn batch(batch_id: u32) -> Self {
        Self {
            batch_id,
            board_id: None,
        }
    }

    pub fn board(batch_id: u32, board_id: u32) -> Self {
        Self {
            batch_id,
            board_id: Some(board_id),
        }
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.board_id {
            Some(board) => write!(f, "batch ID {} board ID {}", self.batch_id, board),
            None => write!(f, "batch ID {}", self.batch_id),
        }
    }
}

/// One search result; other members of the hit are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub component_uuid: String,
}

/// Authenticated session against the inventory service
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: Url,
    component_types: ComponentTypes,
}

impl InventoryClient {
    /// Post the configured credentials and build a session around the token
    pub async fn login(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;

        let login_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        let response = login_client
            .post(endpoint(&base_url, &["machineAuthenticate"])?)
            .json(&config.auth)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(Error::Auth(body));
        }

        let token = body.trim();
        if token.is_empty() {
            return Err(Error::Auth("service returned an empty token".to_string()));
        }

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Auth(format!("unusable token: {}", e)))?;
        bearer.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        info!(url = %base_url, "Authenticated against inventory service");

        Ok(Self {
            http,
            base_url,
            component_types: config.component_types.clone(),
        })
    }

    /// Collection name for a component kind
    pub fn component_type(&self, kind: ComponentKind) -> &str {
        match kind {
            ComponentKind::Batch => &self.component_types.batch,
            ComponentKind::Board => &self.component_types.board,
        }
    }

    /// Search a collection by business key
    pub async fn search(&self, kind: ComponentKind, key: &SearchKey) -> Result<Vec<SearchHit>> {
        let url = endpoint(
            &self.base_url,
            &["api", "search", "component", self.component_type(kind)],
        )?;
        debug!(%kind, %key, "Searching components");

        let response = check(self.http.post(url).json(key).send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Unexpected search response for {}: {}", key, e)))
    }

    /// Search and require exactly one hit, returning its record id
    pub async fn find_unique(&self, kind: ComponentKind, key: &SearchKey) -> Result<String> {
        let mut hits = self.search(kind, key).await?;
        match hits.len() {
            0 => Err(Error::NotFound(format!("No {} found with {}", kind, key))),
            1 => Ok(hits.remove(0).component_uuid),
            n => Err(Error::Ambiguous(format!(
                "Multiple {}s ({}) exist with {}!",
                kind, n, key
            ))),
        }
    }

    /// Request a fresh record id
    pub async fn generate_component_uuid(&self) -> Result<String> {
        let url = endpoint(&self.base_url, &["api", "generateComponentUuid"])?;
        let response = check(self.http.get(url).send().await?).await?;
        let body = response.text().await?;
        let uuid: String = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Unexpected id response '{}': {}", body, e)))?;
        debug!(%uuid, "Generated component id");
        Ok(uuid)
    }

    /// Fetch a record, keeping only its `type` and `data`
    pub async fn fetch<D: DeserializeOwned>(&self, uuid: &str) -> Result<ComponentRecord<D>> {
        let url = endpoint(&self.base_url, &["api", "component", uuid])?;
        let response = check(self.http.get(url).send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Unexpected shape of record {}: {}", uuid, e)))
    }

    /// Create or replace a record
    pub async fn store<D: Serialize>(&self, uuid: &str, record: &ComponentRecord<D>) -> Result<()> {
        let url = endpoint(&self.base_url, &["api", "component", uuid])?;
        debug!(%uuid, component_type = %record.component_type, "Storing component");
        check(self.http.post(url).json(record).send().await?).await?;
        Ok(())
    }

    /// Browser link to a record, as encoded on labels
    pub fn record_url(&self, uuid: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), uuid)
    }
}

/// Turn a non-success response into [`Error::Transport`] with the body verbatim
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Transport {
        status: status.as_u16(),
        body,
    })
}

/// Append percent-encoded path segments to the base URL
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("Service url cannot be a base: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
