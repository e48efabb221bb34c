//! HTTP client for the Podhaven CMS API.

use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::error::{assemble_error_message, CmsError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One successfully fetched page or document.
#[derive(Debug, Clone)]
pub struct CmsPage {
    /// Parsed response body. `Null` for empty bodies (e.g. 204 on delete).
    pub body: Value,
    pub status: u16,
    /// The `links.next` URL when the upstream reports a further page.
    pub next: Option<String>,
}

/// Client for the CMS REST API.
///
/// Every request carries the platform's two-secret authorization header.
/// No call panics or surfaces a raw `reqwest::Error`; all failures come
/// back as [`CmsError`].
pub struct CmsClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl CmsClient {
    /// # Arguments
    /// * `base_url` - Origin of the CMS API (e.g. "https://api.podhaven.com/api/v1")
    /// * `token` / `credential` - The two API secrets
    pub fn new(base_url: String, token: &str, credential: &str) -> Result<Self, CmsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CmsError::transport(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let auth_header = format!("Token token=\"{}\", credential=\"{}\"", token, credential);

        Ok(Self {
            client,
            base_url,
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<CmsPage, CmsError> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<CmsPage, CmsError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<CmsPage, CmsError> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<CmsPage, CmsError> {
        self.request(Method::DELETE, path, &[], None).await
    }

    /// Issue one request against the CMS.
    ///
    /// Status >= 400 becomes `CmsError::Upstream` with the raw payload and a
    /// message assembled from its error entries; anything that never produced
    /// a status becomes `CmsError::Transport`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<CmsPage, CmsError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("CMS request: {} {} {:?}", method, url, query);

        let mut builder = self
            .client
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header.as_str())
            .query(query);

        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CmsError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let raw_body = response
            .text()
            .await
            .map_err(|e| CmsError::transport(format!("Failed to read response body: {}", e)))?;

        let parsed: Value = if raw_body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw_body).unwrap_or(Value::Null)
        };

        if status >= 400 {
            let message = if parsed.is_null() {
                raw_body.trim().to_string()
            } else {
                assemble_error_message(&parsed, &raw_body)
            };
            return Err(CmsError::Upstream {
                status,
                message,
                payload: parsed,
            });
        }

        if !raw_body.trim().is_empty() && parsed.is_null() && raw_body.trim() != "null" {
            return Err(CmsError::transport(format!(
                "CMS returned a non-JSON body for {} (status {})",
                path, status
            )));
        }

        let next = parsed
            .get("links")
            .and_then(|links| links.get("next"))
            .and_then(Value::as_str)
            .map(|s| s.to_string());

        Ok(CmsPage {
            body: parsed,
            status,
            next,
        })
    }
}
