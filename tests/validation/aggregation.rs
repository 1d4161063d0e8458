//! Error aggregation and schema resolution through the engine.

use super::*;
use crate::common::{expect_validation_errors, init_logging};
use dynamic_content::schema::{FieldType, InMemorySchemaStore};
use dynamic_content::validation::{DefaultPolicy, ValidationConfig, ValidationEngine};
use dynamic_content::{ContentError, FieldErrorKind};
use serde_json::{Value, json};

fn engine() -> ValidationEngine<InMemorySchemaStore> {
    init_logging();
    ValidationEngine::new(InMemorySchemaStore::with_schemas([
        fixtures::blog_post_schema(),
        fixtures::contact_schema(),
        fixtures::every_type_schema(),
    ]))
}

#[tokio::test]
async fn test_empty_record_reports_every_required_field() {
    let errors = expect_validation_errors(engine().validate("contact", &json!({})).await);

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.field_names(), vec!["name", "age"]);
    assert_eq!(
        errors.to_json(),
        json!({"name": "Name is required", "age": "Age is required"})
    );
}

#[tokio::test]
async fn test_mixed_failures_are_all_reported() {
    let errors = expect_validation_errors(
        engine()
            .validate(
                "profile",
                &json!({
                    "name": "ok",
                    "age": "old",
                    "email": "nope",
                    "plan": "enterprise",
                    "subscribed": "maybe"
                }),
            )
            .await,
    );

    assert_eq!(errors.field_names(), vec!["age", "email", "plan"]);
    assert!(matches!(
        errors.get("plan").map(|e| &e.kind),
        Some(FieldErrorKind::NotAChoice { allowed }) if allowed == &vec!["free".to_string(), "pro".to_string()]
    ));
}

#[tokio::test]
async fn test_error_set_serializes_as_field_map() {
    let errors = expect_validation_errors(
        engine()
            .validate("contact", &json!({"name": "Ana", "age": "x"}))
            .await,
    );
    let serialized = serde_json::to_value(&errors).unwrap();
    assert_eq!(
        serialized,
        json!({"age": "Invalid value for Age: 'x' is not a number"})
    );
}

#[tokio::test]
async fn test_blog_post_scenario() {
    let record = engine()
        .validate("blog_post", &json!({"title": "Hello"}))
        .await
        .unwrap();
    assert_eq!(Value::from(record), json!({"title": "Hello", "views": 0.0}));

    let verbatim = ValidationEngine::with_config(
        InMemorySchemaStore::with_schemas([fixtures::blog_post_schema()]),
        ValidationConfig {
            default_policy: DefaultPolicy::Verbatim,
        },
    );
    let record = verbatim
        .validate("blog_post", &json!({"title": "Hello"}))
        .await
        .unwrap();
    assert_eq!(Value::from(record), json!({"title": "Hello", "views": "0"}));
}

#[tokio::test]
async fn test_supplied_value_wins_over_default() {
    let record = engine()
        .validate("blog_post", &json!({"title": "Hello", "views": 7}))
        .await
        .unwrap();
    assert_eq!(record.get("views"), Some(&json!(7.0)));
}

#[tokio::test]
async fn test_request_level_errors() {
    let engine = engine();

    let error = engine.validate("unknown", &json!({})).await.unwrap_err();
    assert!(matches!(error, ContentError::SchemaNotFound { ref name } if name == "unknown"));
    assert_eq!(error.status_code(), 404);

    let error = engine.validate("blog_post", &json!("title")).await.unwrap_err();
    assert!(matches!(error, ContentError::InvalidRequest { .. }));
    assert_eq!(error.status_code(), 400);
}

#[tokio::test]
async fn test_inactive_schema_cannot_validate() {
    let schema = SchemaBuilder::new("archived")
        .field("note", FieldType::Text)
        .inactive()
        .build();
    let engine = ValidationEngine::new(InMemorySchemaStore::with_schemas([schema]));

    assert!(matches!(
        engine.validate("archived", &json!({"note": "x"})).await,
        Err(ContentError::SchemaNotFound { .. })
    ));
}

#[test]
fn test_errors_follow_order_attribute_not_declaration() {
    use dynamic_content::schema::{ContentTypeSchema, FieldDefinition};
    use dynamic_content::validation::validate_record;

    let schema = ContentTypeSchema::new("contact", "Contact")
        .with_field(FieldDefinition::new("name", "Name", FieldType::Text).required().with_order(2))
        .with_field(FieldDefinition::new("age", "Age", FieldType::Number).required().with_order(1));

    let errors = validate_record(&schema, &serde_json::Map::new(), &ValidationConfig::default())
        .unwrap_err();
    assert_eq!(errors.field_names(), vec!["age", "name"]);
}
