//! Content lifecycle.
//!
//! Every write goes through the [`ValidationEngine`] first; only normalized
//! records reach the [`DocumentStore`]. Documents of a content type live in
//! their own collection (see [`ServerConfig::collection_for`]).

use super::context::RequestContext;
use super::document::{ContentDocument, ContentList, ContentTypeOverview};
use crate::config::{ConfigError, ServerConfig};
use crate::error::{ContentError, ContentResult};
use crate::schema::SchemaStore;
use crate::storage::{DocumentKey, DocumentStore};
use crate::validation::ValidationEngine;
use log::{debug, info, trace};
use serde_json::Value;

/// Create, read, update and delete content of runtime-defined types.
#[derive(Debug, Clone)]
pub struct ContentService<S: SchemaStore, D: DocumentStore> {
    engine: ValidationEngine<S>,
    documents: D,
    config: ServerConfig,
}

impl<S: SchemaStore, D: DocumentStore> ContentService<S, D> {
    pub fn new(schemas: S, documents: D) -> Self {
        Self::from_parts(schemas, documents, ServerConfig::default())
    }

    /// Build a service with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`ServerConfig::validate`] finds.
    pub fn with_config(schemas: S, documents: D, config: ServerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(schemas, documents, config))
    }

    fn from_parts(schemas: S, documents: D, config: ServerConfig) -> Self {
        Self {
            engine: ValidationEngine::with_config(schemas, config.validation.clone()),
            documents,
            config,
        }
    }

    pub fn engine(&self) -> &ValidationEngine<S> {
        &self.engine
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    fn key(&self, content_type: &str, id: &str) -> DocumentKey {
        DocumentKey::new(self.config.collection_for(content_type), id)
    }

    /// Validate `data` and store it as a new document.
    pub async fn create(
        &self,
        content_type: &str,
        data: &Value,
        context: &RequestContext,
    ) -> ContentResult<ContentDocument> {
        info!(
            "Creating {} content for '{}' (request: '{}')",
            content_type,
            context.subject(),
            context.request_id
        );

        let record = self.engine.validate(content_type, data).await?;
        let document = ContentDocument::new(content_type, record);

        self.documents
            .put(self.key(content_type, &document.id), document.to_value()?)
            .await?;

        debug!("Stored {} content '{}'", content_type, document.id);
        Ok(document)
    }

    /// All documents of an active content type, oldest first.
    pub async fn list(
        &self,
        content_type: &str,
        context: &RequestContext,
    ) -> ContentResult<ContentList> {
        debug!(
            "Listing {} content (request: '{}')",
            content_type, context.request_id
        );

        self.engine.resolve(content_type).await?;

        let collection = self.config.collection_for(content_type);
        let total = self.documents.count(&collection).await?;
        let mut results = self
            .documents
            .list(&collection, 0, total)
            .await?
            .into_iter()
            .map(|(_, value)| ContentDocument::from_value(value))
            .collect::<Result<Vec<_>, _>>()?;
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        Ok(ContentList {
            content_type: content_type.to_string(),
            count: results.len(),
            results,
        })
    }

    /// One document by id.
    pub async fn get(
        &self,
        content_type: &str,
        id: &str,
        context: &RequestContext,
    ) -> ContentResult<ContentDocument> {
        debug!(
            "Getting {} content '{}' (request: '{}')",
            content_type, id, context.request_id
        );

        match self.documents.get(self.key(content_type, id)).await? {
            Some(value) => Ok(ContentDocument::from_value(value)?),
            None => {
                trace!("Content {}/{} not found", content_type, id);
                Err(ContentError::content_not_found(content_type, id))
            }
        }
    }

    /// Validate `data` as a complete record and merge it into an existing document.
    ///
    /// Fields the new record does not carry keep their stored values.
    pub async fn update(
        &self,
        content_type: &str,
        id: &str,
        data: &Value,
        context: &RequestContext,
    ) -> ContentResult<ContentDocument> {
        info!(
            "Updating {} content '{}' for '{}' (request: '{}')",
            content_type,
            id,
            context.subject(),
            context.request_id
        );

        let mut document = self.get(content_type, id, context).await?;
        let record = self.engine.validate(content_type, data).await?;
        document.apply(record);

        self.documents
            .put(self.key(content_type, id), document.to_value()?)
            .await?;
        Ok(document)
    }

    pub async fn delete(
        &self,
        content_type: &str,
        id: &str,
        context: &RequestContext,
    ) -> ContentResult<()> {
        info!(
            "Deleting {} content '{}' for '{}' (request: '{}')",
            content_type,
            id,
            context.subject(),
            context.request_id
        );

        if self.documents.delete(self.key(content_type, id)).await? {
            Ok(())
        } else {
            Err(ContentError::content_not_found(content_type, id))
        }
    }

    /// Document counts for every active content type, ordered by name.
    pub async fn overview(&self, context: &RequestContext) -> ContentResult<Vec<ContentTypeOverview>> {
        debug!("Building content overview (request: '{}')", context.request_id);

        let schemas = self.engine.store().list_active_schemas().await?;
        let mut overview = Vec::with_capacity(schemas.len());
        for schema in schemas {
            let count = self
                .documents
                .count(&self.config.collection_for(&schema.name))
                .await?;
            overview.push(ContentTypeOverview {
                content_type: schema.name,
                display_name: schema.display_name,
                count,
            });
        }
        Ok(overview)
    }
}
