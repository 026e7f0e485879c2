//! HTTP client for the ArangoDB REST API

use crate::arango::{ArangoConfig, ArangoError, ArangoResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub struct ArangoClient {
    client: Client,
    config: ArangoConfig,
}

#[derive(Deserialize)]
struct CursorResponse {
    #[serde(default)]
    result: Vec<Value>,
    #[serde(rename = "hasMore", default)]
    has_more: bool,
    id: Option<String>,
}

#[derive(Deserialize)]
struct CollectionList {
    result: Vec<CollectionInfo>,
}

#[derive(Deserialize)]
struct CollectionInfo {
    name: String,
    /// 2 = document collection, 3 = edge collection
    #[serde(rename = "type", default)]
    kind: u8,
}

impl ArangoClient {
    /// Create a client without probing the server.
    pub fn new(config: &ArangoConfig) -> ArangoResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ArangoError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Create a client and verify the server is reachable. Startup fails fast
    /// when the database is down, rather than on the first user query.
    pub async fn connect(config: &ArangoConfig) -> ArangoResult<Self> {
        let this = Self::new(config)?;

        let url = format!("{}/_api/version", config.url);
        let resp = this
            .client
            .get(&url)
            .basic_auth(&config.username, Some(&config.password))
            .send()
            .await
            .map_err(|e| ArangoError::ConnectionError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ArangoError::ConnectionError(format!(
                "server returned {}",
                resp.status()
            )));
        }

        Ok(this)
    }

    fn db_url(&self, path: &str) -> String {
        format!("{}/_db/{}{}", self.config.url, self.config.database, path)
    }

    /// Execute an AQL query and drain the cursor, following `hasMore`
    /// continuations until all documents are collected.
    pub async fn execute_aql(&self, query: &str) -> ArangoResult<Vec<Value>> {
        #[derive(Serialize)]
        struct CursorRequest<'a> {
            query: &'a str,
            #[serde(rename = "batchSize")]
            batch_size: u32,
        }

        let url = self.db_url("/_api/cursor");
        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&CursorRequest {
                query,
                batch_size: 100,
            })
            .send()
            .await
            .map_err(|e| ArangoError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(ArangoError::ApiError(format!(
                "cursor returned {}: {}",
                status, error_text
            )));
        }

        let mut cursor: CursorResponse = resp
            .json()
            .await
            .map_err(|e| ArangoError::SerializationError(e.to_string()))?;

        let mut documents = cursor.result;
        while cursor.has_more {
            let id = match cursor.id.as_deref() {
                Some(id) => id,
                None => break,
            };
            let url = self.db_url(&format!("/_api/cursor/{}", id));
            let resp = self
                .client
                .put(&url)
                .basic_auth(&self.config.username, Some(&self.config.password))
                .send()
                .await
                .map_err(|e| ArangoError::NetworkError(e.to_string()))?;

            if !resp.status().is_success() {
                return Err(ArangoError::ApiError(format!(
                    "cursor continuation returned {}",
                    resp.status()
                )));
            }

            cursor = resp
                .json()
                .await
                .map_err(|e| ArangoError::SerializationError(e.to_string()))?;
            documents.append(&mut cursor.result);
        }

        Ok(documents)
    }

    /// Render a compact textual schema for the LLM prompt: every non-system
    /// collection with its kind and the top-level fields of one sampled
    /// document.
    pub async fn schema_summary(&self) -> ArangoResult<String> {
        let url = self.db_url("/_api/collection?excludeSystem=true");
        let resp = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| ArangoError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ArangoError::ApiError(format!(
                "collection listing returned {}",
                resp.status()
            )));
        }

        let list: CollectionList = resp
            .json()
            .await
            .map_err(|e| ArangoError::SerializationError(e.to_string()))?;

        let mut lines = Vec::new();
        for collection in &list.result {
            let kind = if collection.kind == 3 { "edge" } else { "document" };
            let sample = self
                .execute_aql(&format!("FOR doc IN {} LIMIT 1 RETURN doc", collection.name))
                .await?;

            let fields = sample
                .first()
                .and_then(|doc| doc.as_object())
                .map(|obj| obj.keys().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_else(|| "(empty)".to_string());

            lines.push(format!(
                "- {} ({} collection): fields {}",
                collection.name, kind, fields
            ));
        }

        Ok(lines.join("\n"))
    }
}
