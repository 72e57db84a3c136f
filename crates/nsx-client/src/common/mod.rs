//! Common utilities for the NSX API client
//!
//! Provides the authenticated HTTP wrapper shared by every resource operation.

pub mod paging;

use crate::error::NsxError;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

/// HTTP client wrapper with basic authentication
pub struct HttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Build query string from parameters
    pub fn build_query_string(&self, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Map a non-success response onto an error, keeping the body verbatim
    async fn check(response: Response, method: &str, path: &str) -> Result<Response, NsxError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NsxError::Authentication(format!(
                "{} {} failed: {} - {}",
                method, path, status, body
            ))),
            StatusCode::NOT_FOUND => Err(NsxError::NotFound(format!(
                "{} {} - {}",
                method, path, body
            ))),
            _ => Err(NsxError::Api(format!(
                "{} {} failed: {} - {}",
                method, path, status, body
            ))),
        }
    }

    /// Make a GET request and decode the JSON body
    pub async fn get(&self, path: &str) -> Result<serde_json::Value, NsxError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(NsxError::Http)?;

        let response = Self::check(response, "GET", path).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            NsxError::UnexpectedResponse(format!(
                "error decoding response body: {} - Response (first 500 chars): {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Make a POST request and return the `Location` header of the new object
    pub async fn post_for_location(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, NsxError> {
        let url = self.build_url(path);
        debug!("POST {} with body: {}", url, serde_json::to_string_pretty(body).unwrap_or_default());

        let response = self.client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(NsxError::Http)?;

        let response = Self::check(response, "POST", path).await?;
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| NsxError::UnexpectedResponse(format!("POST {} returned no Location header", path)))
    }

    /// Make a PUT request; NSX answers configuration updates with 204
    pub async fn put(&self, path: &str, body: &serde_json::Value) -> Result<(), NsxError> {
        let url = self.build_url(path);
        debug!("PUT {} with body: {}", url, serde_json::to_string_pretty(body).unwrap_or_default());

        let response = self.client
            .put(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(NsxError::Http)?;

        Self::check(response, "PUT", path).await?;
        Ok(())
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), NsxError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let response = self.client
            .delete(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(NsxError::Http)?;

        Self::check(response, "DELETE", path).await?;
        Ok(())
    }
}
