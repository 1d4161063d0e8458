//! Content service on in-memory stores.

use crate::common::{expect_validation_errors, fixtures, init_logging};
use dynamic_content::schema::{FieldDefinition, FieldType, InMemorySchemaStore, SchemaStore};
use dynamic_content::storage::{DocumentKey, DocumentStore, InMemoryDocumentStore};
use dynamic_content::{ConfigError, ContentError, ContentService, RequestContext, ServerConfig};
use serde_json::json;

type Service = ContentService<InMemorySchemaStore, InMemoryDocumentStore>;

fn setup() -> (Service, InMemorySchemaStore, InMemoryDocumentStore) {
    init_logging();
    let schemas = InMemorySchemaStore::with_schemas([
        fixtures::blog_post_schema(),
        fixtures::every_type_schema(),
    ]);
    let documents = InMemoryDocumentStore::new();
    let service = ContentService::new(schemas.clone(), documents.clone());
    (service, schemas, documents)
}

#[tokio::test]
async fn test_full_lifecycle() {
    let (service, _, documents) = setup();
    let ctx = RequestContext::with_generated_id();

    let created = service
        .create("blog_post", &json!({"title": "Hello", "views": "3"}), &ctx)
        .await
        .unwrap();
    assert_eq!(created.content_type, "blog_post");
    assert_eq!(created.get("views"), Some(&json!(3.0)));

    let stored = documents
        .get(DocumentKey::new("blog_post", &created.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["id"], json!(created.id));
    assert_eq!(stored["title"], "Hello");

    let updated = service
        .update("blog_post", &created.id, &json!({"title": "Hello again"}), &ctx)
        .await
        .unwrap();
    assert_eq!(updated.get("title"), Some(&json!("Hello again")));
    // default re-applied by full validation
    assert_eq!(updated.get("views"), Some(&json!(0.0)));
    assert!(updated.updated_at >= created.updated_at);

    service.delete("blog_post", &created.id, &ctx).await.unwrap();
    assert!(matches!(
        service.get("blog_post", &created.id, &ctx).await,
        Err(ContentError::ContentNotFound { .. })
    ));
}

#[tokio::test]
async fn test_rejected_content_never_reaches_store() {
    let (service, _, documents) = setup();
    let ctx = RequestContext::with_generated_id();

    let errors = expect_validation_errors(
        service
            .create("profile", &json!({"age": "old", "email": "x"}), &ctx)
            .await,
    );
    assert_eq!(errors.field_names(), vec!["age", "email"]);
    assert_eq!(documents.stats().await.total_documents, 0);
}

#[tokio::test]
async fn test_schema_changes_apply_to_new_writes() {
    let (service, schemas, _) = setup();
    let ctx = RequestContext::with_generated_id();

    service
        .create("blog_post", &json!({"title": "Before"}), &ctx)
        .await
        .unwrap();

    let stricter = fixtures::blog_post_schema()
        .with_field(FieldDefinition::new("author", "Author", FieldType::Email).required());
    schemas.update(stricter).await.unwrap();

    let errors = expect_validation_errors(
        service
            .create("blog_post", &json!({"title": "After"}), &ctx)
            .await,
    );
    assert_eq!(errors.field_names(), vec!["author"]);

    // existing documents stay listed
    assert_eq!(service.list("blog_post", &ctx).await.unwrap().count, 1);
}

#[tokio::test]
async fn test_deactivated_type_rejects_writes_and_leaves_overview() {
    let (service, schemas, _) = setup();
    let ctx = RequestContext::with_generated_id();

    service
        .create("blog_post", &json!({"title": "Hello"}), &ctx)
        .await
        .unwrap();

    let overview = service.overview(&ctx).await.unwrap();
    let names: Vec<_> = overview.iter().map(|o| o.content_type.as_str()).collect();
    assert_eq!(names, vec!["blog_post", "profile"]);
    assert_eq!(overview[0].count, 1);
    assert_eq!(overview[1].count, 0);

    schemas
        .update(fixtures::blog_post_schema().inactive())
        .await
        .unwrap();

    let error = service
        .create("blog_post", &json!({"title": "Hello"}), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.status_code(), 404);

    let overview = service.overview(&ctx).await.unwrap();
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].content_type, "profile");
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (service, _, _) = setup();
    let ctx = RequestContext::with_generated_id();

    let creates = (0..20).map(|i| {
        let service = service.clone();
        let ctx = ctx.clone();
        async move {
            service
                .create("blog_post", &json!({ "title": format!("Post {}", i) }), &ctx)
                .await
        }
    });
    let results = futures::future::join_all(creates).await;

    let mut ids: Vec<String> = results.into_iter().map(|r| r.unwrap().id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert_eq!(service.list("blog_post", &ctx).await.unwrap().count, 20);
}

#[tokio::test]
async fn test_prefixed_collections() {
    init_logging();
    let config = ServerConfig {
        documents_collection_prefix: "cms_".into(),
        ..Default::default()
    };
    assert!(config.validate().is_ok());

    let documents = InMemoryDocumentStore::new();
    let service = ContentService::with_config(
        InMemorySchemaStore::with_schemas([fixtures::blog_post_schema()]),
        documents.clone(),
        config,
    )
    .unwrap();
    let ctx = RequestContext::with_generated_id();

    let created = service
        .create("blog_post", &json!({"title": "Hello"}), &ctx)
        .await
        .unwrap();

    assert!(
        documents
            .exists(DocumentKey::new("cms_blog_post", &created.id))
            .await
            .unwrap()
    );
    assert!(
        !documents
            .exists(DocumentKey::new("blog_post", &created.id))
            .await
            .unwrap()
    );
}

#[test]
fn test_invalid_prefix_refuses_to_build_service() {
    let config = ServerConfig {
        documents_collection_prefix: "cms-".into(),
        ..Default::default()
    };
    let result = ContentService::with_config(
        InMemorySchemaStore::new(),
        InMemoryDocumentStore::new(),
        config,
    );
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}
