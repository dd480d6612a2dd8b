//! PineconeIndex -- concrete [`KnowledgeIndex`] over a Pinecone serverless
//! index's `/query` endpoint.
//!
//! The index stores one vector per knowledge chunk with `filename` and
//! `text` metadata; matches missing the text metadata are skipped rather
//! than surfaced as empty chunks.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use aeroguide_core::answer::KnowledgeIndex;
use aeroguide_types::error::UpstreamError;
use aeroguide_types::llm::KnowledgeChunk;

use crate::http::{send_error, status_error};
use crate::retry::retry_with_backoff;

const SERVICE: &str = "pinecone";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Clone, Deserialize)]
struct QueryMatch {
    #[serde(default)]
    score: f32,
    metadata: Option<MatchMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
struct MatchMetadata {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// Pinecone serverless index client.
pub struct PineconeIndex {
    client: reqwest::Client,
    api_key: SecretString,
    host: String,
}

impl PineconeIndex {
    /// `host` is the index's full https host from the Pinecone console.
    pub fn new(api_key: SecretString, host: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            host: host.trim_end_matches('/').to_string(),
        }
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<KnowledgeChunk>, UpstreamError> {
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };
        let url = format!("{}/query", self.host);

        let response = self
            .client
            .post(&url)
            .header("Api-Key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| send_error(SERVICE, &err))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(SERVICE, status.as_u16(), error_body));
        }

        let parsed: QueryResponse =
            response
                .json()
                .await
                .map_err(|err| UpstreamError::Malformed {
                    service: SERVICE,
                    message: format!("failed to parse response: {err}"),
                })?;

        Ok(to_chunks(parsed))
    }
}

fn to_chunks(response: QueryResponse) -> Vec<KnowledgeChunk> {
    response
        .matches
        .into_iter()
        .filter_map(|m| {
            let metadata = m.metadata?;
            let text = metadata.text?;
            Some(KnowledgeChunk {
                filename: metadata.filename.unwrap_or_default(),
                text,
                score: m.score,
            })
        })
        .collect()
}

impl KnowledgeIndex for PineconeIndex {
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<KnowledgeChunk>, UpstreamError> {
        let chunks = retry_with_backoff(SERVICE, || self.query(vector, top_k)).await?;
        tracing::debug!(matches = chunks.len(), top_k, "pinecone query done");
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_shape() {
        let vector = vec![0.1_f32, 0.2];
        let body = QueryRequest {
            vector: &vector,
            top_k: 5,
            include_metadata: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["topK"], 5);
        assert_eq!(json["includeMetadata"], true);
        assert_eq!(json["vector"][1], 0.2_f32);
    }

    #[test]
    fn test_matches_map_to_chunks() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"matches":[
                {"score":0.91,"metadata":{"filename":"security.md","text":"liquids under 100ml"}},
                {"score":0.80,"metadata":{"filename":"security.md"}},
                {"score":0.75}
            ]}"#,
        )
        .unwrap();

        let chunks = to_chunks(response);
        // entries without text metadata are dropped
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].filename, "security.md");
        assert_eq!(chunks[0].text, "liquids under 100ml");
        assert!((chunks[0].score - 0.91).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_response_is_no_chunks() {
        let response: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(to_chunks(response).is_empty());
    }

    #[test]
    fn test_host_trailing_slash_is_trimmed() {
        let index = PineconeIndex::new(
            SecretString::from("test-key"),
            "https://idx.example.pinecone.io/".to_string(),
        );
        assert_eq!(index.host, "https://idx.example.pinecone.io");
    }
}
