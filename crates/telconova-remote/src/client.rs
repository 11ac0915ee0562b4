// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for the remote dispatch API.
//!
//! Provides [`ApiClient`] which handles URL construction, the JSON content
//! type, bearer authentication from the shared [`TokenStore`], and routing
//! of every non-success status through the error normalizer.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use telconova_core::DispatchError;
use telconova_session::TokenStore;
use tracing::{debug, warn};

use crate::normalize;

/// HTTP client bound to one base address and one token store.
///
/// Each call issues exactly one request; there are no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        tokens: Arc<TokenStore>,
    ) -> Result<Self, DispatchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| DispatchError::Transport {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// `GET path?query` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DispatchError> {
        let response = self.send(Method::GET, path, query, None::<&()>).await?;
        decode_body(response, path).await
    }

    /// `POST path` with a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, DispatchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, &[], Some(body)).await?;
        decode_body(response, path).await
    }

    /// `POST path` for endpoints that acknowledge with a bare message.
    ///
    /// Accepts a JSON string, a `{message}` object, or raw text.
    pub async fn post_message<B>(&self, path: &str, body: &B) -> Result<String, DispatchError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::POST, path, &[], Some(body)).await?;
        let text = read_text(response).await?;
        Ok(acknowledgement_text(text))
    }

    /// `POST path` ignoring whatever the backend returns on success.
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), DispatchError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, &[], Some(body)).await?;
        Ok(())
    }

    /// `DELETE path` ignoring the success body.
    pub async fn delete_unit(&self, path: &str) -> Result<(), DispatchError> {
        self.send(Method::DELETE, path, &[], None::<&()>).await?;
        Ok(())
    }

    /// Sends one request and returns the response only if it succeeded.
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, DispatchError>
    where
        B: Serialize + ?Sized,
    {
        let mut url = reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| DispatchError::Config(format!("invalid request URL for {path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        let mut request = self.client.request(method.clone(), url);

        // A token that cannot be a header value is dropped so login still works.
        if let Some(header) = self.tokens.authorization_header() {
            match HeaderValue::from_str(&header) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    request = request.header(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored auth token is not a valid header value, sending unauthenticated"),
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| DispatchError::Transport {
            message: format!("{method} {path} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(%method, path, status = %status, "response received");

        if status.is_success() {
            return Ok(response);
        }

        let err = normalize::error_from_response(response).await;
        warn!(%method, path, status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }
}

async fn read_text(response: reqwest::Response) -> Result<String, DispatchError> {
    response.text().await.map_err(|e| DispatchError::Transport {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })
}

async fn decode_body<T: DeserializeOwned>(
    response: reqwest::Response,
    path: &str,
) -> Result<T, DispatchError> {
    let body = read_text(response).await?;
    serde_json::from_str(&body).map_err(|e| DispatchError::decode(path, e))
}

/// Extracts the human-readable part of an acknowledgement body.
fn acknowledgement_text(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => match map.get("message").and_then(|m| m.as_str()) {
            Some(message) => message.to_string(),
            None => body,
        },
        _ => body,
    }
}

/// Percent-encodes one path segment (an entity id).
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
