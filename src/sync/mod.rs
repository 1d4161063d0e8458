//! Schema synchronisation from external table metadata.
//!
//! - [`TableSource`] lists tables; [`NocoDbClient`] talks to the NocoDB meta API
//! - [`SchemaMerger`] turns the listing into new content type schemas
//!
//! ```rust
//! use dynamic_content::schema::InMemorySchemaStore;
//! use dynamic_content::sync::{SchemaMerger, StaticTableSource, TableDescriptor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let merger = SchemaMerger::new(InMemorySchemaStore::new());
//! let source = StaticTableSource::new([TableDescriptor::new("orders").with_title("Orders")]);
//!
//! assert_eq!(merger.sync(&source).await?, 1);
//! assert_eq!(merger.sync(&source).await?, 0);
//! # Ok(())
//! # }
//! ```

pub mod descriptor;
pub mod merge;
pub mod nocodb;
pub mod source;

pub use descriptor::TableDescriptor;
pub use merge::SchemaMerger;
pub use nocodb::NocoDbClient;
pub use source::{SourceError, StaticTableSource, TableSource};
