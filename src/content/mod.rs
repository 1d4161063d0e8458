//! Content instances of runtime-defined types.
//!
//! ```rust
//! use dynamic_content::content::{ContentService, RequestContext};
//! use dynamic_content::schema::{ContentTypeSchema, FieldDefinition, FieldType, InMemorySchemaStore};
//! use dynamic_content::storage::InMemoryDocumentStore;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = ContentTypeSchema::new("blog_post", "Blog Post")
//!     .with_field(FieldDefinition::new("title", "Title", FieldType::Text).required());
//! let service = ContentService::new(
//!     InMemorySchemaStore::with_schemas([schema]),
//!     InMemoryDocumentStore::new(),
//! );
//!
//! let ctx = RequestContext::with_generated_id();
//! let post = service.create("blog_post", &json!({"title": "Hello"}), &ctx).await?;
//! assert_eq!(service.get("blog_post", &post.id, &ctx).await?.id, post.id);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod document;
pub mod service;

pub use context::RequestContext;
pub use document::{ContentDocument, ContentList, ContentTypeOverview};
pub use service::ContentService;
