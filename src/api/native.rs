// src/api/native.rs

use std::time::Duration;

use async_trait::async_trait;

use super::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// `reqwest`-backed transport with a shared connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        let mut req = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            Error::network(
                request.path.clone(),
                e.status().map(|s| s.as_u16()),
                format!("HTTP request failed: {}", e),
            )
            .caused_by(&e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            Error::network(
                request.path.clone(),
                Some(status),
                format!("Failed to read response body: {}", e),
            )
        })?;

        tracing::trace!(method = %request.method, url = %url, status, "HTTP exchange");

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..ApiConfig::default()
        };
        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000");
        assert_eq!(transport.url("/stocks/"), "http://localhost:8000/stocks/");
        assert_eq!(transport.url("recipes/3"), "http://localhost:8000/recipes/3");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..ApiConfig::default()
        };
        let transport = ReqwestTransport::new(&config).unwrap();
        let error = transport.send(ApiRequest::get("/stocks/")).await.unwrap_err();
        assert!(error.is_network());
    }
}
