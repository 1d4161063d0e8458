//! External table-metadata sources.

use super::descriptor::TableDescriptor;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Failure of a table source. Transport problems never escape as panics or
/// raw client errors; they all end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Could not reach {url}: {message}")]
    Connection { url: String, message: String },

    #[error("Table source returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed table listing: {message}")]
    Malformed { message: String },

    #[error("Table source misconfigured: {message}")]
    Configuration { message: String },
}

impl SourceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether retrying the same request might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Malformed { .. } | Self::Configuration { .. } => false,
        }
    }
}

/// Something that can list external tables.
pub trait TableSource: Send + Sync {
    fn fetch_tables(&self) -> impl Future<Output = Result<Vec<TableDescriptor>, SourceError>> + Send;
}

/// Fixed in-process table source.
#[derive(Debug, Clone, Default)]
pub struct StaticTableSource {
    tables: Vec<TableDescriptor>,
}

impl StaticTableSource {
    pub fn new(tables: impl IntoIterator<Item = TableDescriptor>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }
}

impl TableSource for StaticTableSource {
    async fn fetch_tables(&self) -> Result<Vec<TableDescriptor>, SourceError> {
        Ok(self.tables.clone())
    }
}
