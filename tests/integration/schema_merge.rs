//! Schema merge from external table metadata.

use crate::common::{fixtures, init_logging};
use dynamic_content::schema::{ContentTypeSchema, InMemorySchemaStore, SchemaStore, SchemaStoreError};
use dynamic_content::sync::nocodb::parse_table_list;
use dynamic_content::sync::{SchemaMerger, SourceError, StaticTableSource, TableDescriptor, TableSource};
use dynamic_content::MergeError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

fn descriptors(names: &[&str]) -> Vec<TableDescriptor> {
    names.iter().map(|n| TableDescriptor::new(*n)).collect()
}

/// Source that fails with a fixed error.
struct BrokenSource(SourceError);

impl TableSource for BrokenSource {
    async fn fetch_tables(&self) -> Result<Vec<TableDescriptor>, SourceError> {
        Err(self.0.clone())
    }
}

/// Store that lets a rival writer claim a name right after the merge takes
/// its snapshot of existing names.
struct RacingStore {
    inner: InMemorySchemaStore,
    rival: ContentTypeSchema,
    raced: AtomicBool,
}

impl RacingStore {
    fn new(inner: InMemorySchemaStore, rival_name: &str) -> Self {
        Self {
            inner,
            rival: ContentTypeSchema::new(rival_name, "Rival"),
            raced: AtomicBool::new(false),
        }
    }
}

impl SchemaStore for RacingStore {
    async fn get_active_schema(&self, name: &str) -> Result<Option<ContentTypeSchema>, SchemaStoreError> {
        self.inner.get_active_schema(name).await
    }

    async fn list_active_schemas(&self) -> Result<Vec<ContentTypeSchema>, SchemaStoreError> {
        self.inner.list_active_schemas().await
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, SchemaStoreError> {
        self.inner.exists_by_name(name).await
    }

    async fn existing_names(&self) -> Result<HashSet<String>, SchemaStoreError> {
        let snapshot = self.inner.existing_names().await?;
        if !self.raced.swap(true, Ordering::SeqCst) {
            self.inner.create(self.rival.clone()).await?;
        }
        Ok(snapshot)
    }

    async fn bulk_create(&self, schemas: Vec<ContentTypeSchema>) -> Result<usize, SchemaStoreError> {
        self.inner.bulk_create(schemas).await
    }

    async fn create(&self, schema: ContentTypeSchema) -> Result<ContentTypeSchema, SchemaStoreError> {
        self.inner.create(schema).await
    }

    async fn get(&self, name: &str) -> Result<Option<ContentTypeSchema>, SchemaStoreError> {
        self.inner.get(name).await
    }

    async fn update(&self, schema: ContentTypeSchema) -> Result<ContentTypeSchema, SchemaStoreError> {
        self.inner.update(schema).await
    }

    async fn delete(&self, name: &str) -> Result<bool, SchemaStoreError> {
        self.inner.delete(name).await
    }
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    init_logging();
    let merger = SchemaMerger::new(InMemorySchemaStore::new());
    let tables = descriptors(&["orders", "customers", "invoices"]);

    let first = merger.merge_external_tables(&tables).await.unwrap();
    let second = merger.merge_external_tables(&tables).await.unwrap();

    assert_eq!(first, 3);
    assert_eq!(second, 0);
    assert_eq!(merger.store().list_active_schemas().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_merge_keeps_existing_schemas_untouched() {
    init_logging();
    let store = InMemorySchemaStore::with_schemas([fixtures::blog_post_schema()]);
    let merger = SchemaMerger::new(store.clone());

    let created = merger
        .merge_external_tables(&descriptors(&["blog_post", "orders"]))
        .await
        .unwrap();
    assert_eq!(created, 1);

    let blog_post = store.get("blog_post").await.unwrap().unwrap();
    assert_eq!(blog_post.fields.len(), 2);

    let orders = store.get_active_schema("orders").await.unwrap().unwrap();
    assert!(orders.fields.is_empty());
}

#[tokio::test]
async fn test_sync_from_nocodb_payload() {
    init_logging();
    let store = InMemorySchemaStore::with_schemas([fixtures::blog_post_schema()]);
    let merger = SchemaMerger::new(store.clone());

    let tables = parse_table_list(&fixtures::nocodb_tables_payload().to_string()).unwrap();
    let created = merger.sync(&StaticTableSource::new(tables)).await.unwrap();
    assert_eq!(created, 2);

    let people = store.get("people_directory").await.unwrap().unwrap();
    assert_eq!(people.display_name, "People");
    assert!(store.exists_by_name("nc_orders").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_merges_never_duplicate() {
    init_logging();
    let store = InMemorySchemaStore::new();
    let a = SchemaMerger::new(store.clone());
    let b = SchemaMerger::new(store.clone());
    let tables = descriptors(&["orders", "customers"]);

    let (first, second) = futures::join!(
        a.merge_external_tables(&tables),
        b.merge_external_tables(&tables)
    );

    // Whichever run gets its snapshot second sees the names or loses the batch whole.
    let created: usize = [&first, &second]
        .iter()
        .map(|r| match r {
            Ok(n) => *n,
            Err(MergeError::Conflict { .. }) => 0,
            Err(other) => panic!("unexpected merge error: {}", other),
        })
        .sum();
    assert_eq!(created, 2);
    assert_eq!(store.len().await, 2);

    // A rerun after the race converges without error.
    assert_eq!(a.merge_external_tables(&tables).await.unwrap(), 0);
}

#[tokio::test]
async fn test_name_claimed_after_snapshot_aborts_whole_batch() {
    init_logging();
    let inner = InMemorySchemaStore::new();
    let merger = SchemaMerger::new(RacingStore::new(inner.clone(), "orders"));
    let tables = descriptors(&["customers", "orders", "invoices"]);

    let error = merger.merge_external_tables(&tables).await.unwrap_err();
    assert!(matches!(error, MergeError::Conflict { ref name } if name == "orders"));

    // only the rival's schema was written
    let names = inner.existing_names().await.unwrap();
    assert_eq!(names, HashSet::from(["orders".to_string()]));
    assert_eq!(inner.get("orders").await.unwrap().unwrap().display_name, "Rival");

    // the next run sees the rival and creates the rest
    assert_eq!(merger.merge_external_tables(&tables).await.unwrap(), 2);
    assert_eq!(inner.len().await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_merges_converge() {
    init_logging();
    let store = InMemorySchemaStore::new();
    let tables = descriptors(&["a_table", "b_table", "c_table", "d_table"]);

    let runs = (0..8).map(|_| {
        let merger = SchemaMerger::new(store.clone());
        let tables = tables.clone();
        tokio::spawn(async move { merger.merge_external_tables(&tables).await })
    });
    let results = futures::future::join_all(runs).await;

    for result in results {
        match result.unwrap() {
            Ok(_) | Err(MergeError::Conflict { .. }) => {}
            Err(other) => panic!("unexpected merge error: {}", other),
        }
    }

    let names = store.existing_names().await.unwrap();
    assert_eq!(names.len(), 4);
}

#[tokio::test]
async fn test_failing_source_leaves_store_unchanged() {
    init_logging();
    let store = InMemorySchemaStore::with_schemas([fixtures::blog_post_schema()]);
    let merger = SchemaMerger::new(store.clone());

    let failures = [
        SourceError::Timeout {
            url: "https://noco.example.com/api/v2/meta/bases/b/tables".into(),
            timeout: Duration::from_secs(30),
        },
        SourceError::Status {
            status: 500,
            body: "internal".into(),
        },
        SourceError::malformed("expected value at line 1 column 1"),
    ];

    for failure in failures {
        let error = merger.sync(&BrokenSource(failure.clone())).await.unwrap_err();
        assert!(matches!(error, MergeError::Source(ref e) if *e == failure));
        assert_eq!(store.len().await, 1);
    }
}
