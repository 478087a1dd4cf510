//! HTTP list endpoints
//!
//! [`ListEndpoint`] is the [`PageFetcher`] for one configured resource of a
//! JSON listing API shaped like
//! `{ "pageInfo": { "totalResults": n }, "items": [...], "nextPageToken": "..." }`.

use crate::config::{ApiConfig, Operation, ResourceConfig};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{Page, PageFetcher, MAX_RESULTS_PER_PAGE};
use crate::types::{JsonValue, QueryParams};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Query parameter carrying the continuation token
const PAGE_TOKEN_PARAM: &str = "pageToken";

/// Query parameter carrying the page size
const MAX_RESULTS_PARAM: &str = "maxResults";

/// Query parameter carrying the identifier list
const ID_PARAM: &str = "id";

/// Fetches pages of one resource over HTTP
#[derive(Debug, Clone)]
pub struct ListEndpoint {
    client: Arc<HttpClient>,
    name: String,
    resource: ResourceConfig,
}

impl ListEndpoint {
    /// Create an endpoint for a resource.
    ///
    /// The resource must support both `list` and `list_next`; anything less
    /// cannot be paged and is rejected here, before any request is sent.
    pub fn new(
        client: Arc<HttpClient>,
        name: impl Into<String>,
        resource: ResourceConfig,
    ) -> Result<Self> {
        let name = name.into();
        let missing: Vec<&str> = [
            (Operation::List, "list"),
            (Operation::ListNext, "list_next"),
        ]
        .into_iter()
        .filter(|(op, _)| !resource.supports(*op))
        .map(|(_, label)| label)
        .collect();

        if !missing.is_empty() {
            return Err(Error::contract(
                name,
                format!("missing operations: {}", missing.join(", ")),
            ));
        }
        if resource.path.trim().is_empty() {
            return Err(Error::contract(name, "no path configured"));
        }

        Ok(Self {
            client,
            name,
            resource,
        })
    }

    /// Create an endpoint for a named resource of an API config
    pub fn from_config(client: Arc<HttpClient>, config: &ApiConfig, name: &str) -> Result<Self> {
        let resource = config.resource(name)?.clone();
        Self::new(client, name, resource)
    }

    /// Resource name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the request for one page
    fn request(&self, params: &QueryParams, page_token: Option<&str>) -> RequestConfig {
        let mut request = RequestConfig::new();
        for (key, value) in self.resource.defaults.iter().chain(&params.params) {
            request = request.query(key, value);
        }
        if let Some(ids) = &params.ids {
            request = request.query(ID_PARAM, ids.join(","));
        }
        request = request.query(MAX_RESULTS_PARAM, MAX_RESULTS_PER_PAGE.to_string());
        if let Some(token) = page_token {
            request = request.query(PAGE_TOKEN_PARAM, token);
        }
        request
    }
}

#[async_trait]
impl PageFetcher for ListEndpoint {
    type Item = JsonValue;

    async fn fetch_page(
        &self,
        params: &QueryParams,
        page_token: Option<&str>,
    ) -> Result<Page<JsonValue>> {
        debug!(
            resource = %self.name,
            page_token = page_token.unwrap_or(""),
            ids = params.id_count().unwrap_or(0),
            "listing page"
        );

        self.client
            .get_json(&self.resource.path, self.request(params, page_token))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    Error::not_found(&self.name)
                } else {
                    e
                }
            })
    }
}
