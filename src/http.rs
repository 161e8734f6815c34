//! HTTP implementation of the dataset endpoint.
//!
//! Talks to the sales backend's two read operations:
//! `GET api/vendas/paginado` (Spring `Page` envelope) and
//! `GET api/vendas/buscar` (bare array, unordered). An empty response body
//! degrades to an empty result set rather than a parse error, matching the
//! backend's behavior on fresh databases.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::EndpointConfig;
use crate::endpoint::{DatasetEndpoint, WirePage, WireRow};
use crate::error::{GridError, Result};
use crate::types::SortDirection;

const PAGE_PATH: &str = "api/vendas/paginado";
const SEARCH_PATH: &str = "api/vendas/buscar";

pub struct HttpEndpoint {
    client: Client,
    base: Url,
}

impl HttpEndpoint {
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(GridError::Config(format!(
                "endpoint base URL '{}' cannot hold a path",
                config.base_url
            )));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, base })
    }

    fn page_url(
        &self,
        page_index: usize,
        page_size: usize,
        sort_key: &str,
        sort_dir: SortDirection,
    ) -> Result<Url> {
        let mut url = self.base.join(PAGE_PATH)?;
        url.query_pairs_mut()
            .append_pair("page", &page_index.to_string())
            .append_pair("size", &page_size.to_string())
            .append_pair("sortBy", sort_key)
            .append_pair("sortDir", sort_dir.as_param());
        Ok(url)
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.base.join(SEARCH_PATH)?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Parse a page response body. An empty body is a valid empty page, not a
/// parse error.
fn parse_page_body(body: &str) -> Result<WirePage> {
    if body.trim().is_empty() {
        return Ok(WirePage::default());
    }
    Ok(serde_json::from_str(body)?)
}

/// Parse a search response body. An empty body is a valid empty result set.
fn parse_search_body(body: &str) -> Result<Vec<WireRow>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(body)?)
}

impl DatasetEndpoint for HttpEndpoint {
    async fn list_page(
        &self,
        page_index: usize,
        page_size: usize,
        sort_key: &str,
        sort_dir: SortDirection,
    ) -> Result<WirePage> {
        let url = self.page_url(page_index, page_size, sort_key, sort_dir)?;
        let body = self.get_text(url).await?;
        parse_page_body(&body)
    }

    async fn search(&self, query: &str) -> Result<Vec<WireRow>> {
        let url = self.search_url(query)?;
        let body = self.get_text(url).await?;
        parse_search_body(&body)
    }
}
