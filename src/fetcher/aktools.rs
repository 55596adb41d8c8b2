use async_trait::async_trait;
use super::{DataSource, RawTable};
use anyhow::{Result, anyhow};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

/// Client for an AKTools server, which exposes akshare tables over HTTP.
pub struct AkToolsSource {
    base_url: String,
    client: Client,
}

impl AkToolsSource {
    pub fn new(base_url: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("MacroAnalyzer/1.0"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/api/public/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl DataSource for AkToolsSource {
    fn name(&self) -> &str {
        "aktools"
    }

    async fn fetch_table(&self, endpoint: &str) -> Result<RawTable> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%url, "requesting provider table");

        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("AKTools API Error: {} - Body: {}", status, error_text));
        }

        let json: Value = resp.json().await?;
        RawTable::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let source = AkToolsSource::new("http://127.0.0.1:8080/");
        assert_eq!(
            source.endpoint_url("macro_china_gdp"),
            "http://127.0.0.1:8080/api/public/macro_china_gdp"
        );
        assert_eq!(source.name(), "aktools");
    }
}
