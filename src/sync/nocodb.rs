//! NocoDB metadata client.
//!
//! Lists the tables of one NocoDB base:
//! `GET {base_url}/api/v2/meta/bases/{base_id}/tables` authenticated with the
//! `xc-token` header. The response body is `{"list": [table, ...]}`.

use super::descriptor::TableDescriptor;
use super::source::{SourceError, TableSource};
use crate::config::{NocoDbConfig, ServerConfig};
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

const TOKEN_HEADER: &str = "xc-token";

#[derive(Debug, Deserialize)]
struct TableListResponse {
    list: Vec<TableDescriptor>,
}

/// HTTP table source backed by the NocoDB meta API.
#[derive(Debug, Clone)]
pub struct NocoDbClient {
    http_client: Client,
    config: NocoDbConfig,
}

impl NocoDbClient {
    pub fn new(config: NocoDbConfig) -> Result<Self, SourceError> {
        config
            .validate()
            .map_err(|e| SourceError::configuration(e.to_string()))?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Client for the NocoDB section of a service configuration.
    ///
    /// Returns `Ok(None)` when the configuration has no NocoDB section, which
    /// means schema sync is disabled.
    pub fn from_server_config(config: &ServerConfig) -> Result<Option<Self>, SourceError> {
        match &config.nocodb {
            Some(nocodb) => Self::new(nocodb.clone()).map(Some),
            None => {
                debug!("No NocoDB configuration; schema sync disabled");
                Ok(None)
            }
        }
    }

    pub fn config(&self) -> &NocoDbConfig {
        &self.config
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::Timeout {
                url: url.to_string(),
                timeout: self.config.timeout,
            }
        } else {
            SourceError::Connection {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Parse a table listing body.
pub fn parse_table_list(body: &str) -> Result<Vec<TableDescriptor>, SourceError> {
    serde_json::from_str::<TableListResponse>(body)
        .map(|response| response.list)
        .map_err(|e| SourceError::malformed(e.to_string()))
}

impl TableSource for NocoDbClient {
    async fn fetch_tables(&self) -> Result<Vec<TableDescriptor>, SourceError> {
        let url = self.config.tables_url();
        debug!("Fetching NocoDB tables from: {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(TOKEN_HEADER, &self.config.token)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        if !status.is_success() {
            warn!("NocoDB tables API error: {} - {}", status, body);
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let tables = parse_table_list(&body)?;
        debug!("Fetched {} NocoDB tables", tables.len());
        Ok(tables)
    }
}
