//! Authenticated callers driving content operations.

use crate::common::{fixtures, init_logging};
use dynamic_content::schema::InMemorySchemaStore;
use dynamic_content::storage::InMemoryDocumentStore;
use dynamic_content::{
    AuthProvider, AuthenticationError, ContentService, Credentials, Principal, RequestContext,
    StaticTokenAuthenticator,
};
use serde_json::json;

async fn authenticator() -> StaticTokenAuthenticator {
    let auth = StaticTokenAuthenticator::new();
    auth.register_token("editor-token", Principal::user("editor@example.com"))
        .await;
    auth.register_token("admin-token", Principal::admin("admin@example.com"))
        .await;
    auth
}

#[tokio::test]
async fn test_header_to_content_write() {
    init_logging();
    let auth = authenticator().await;
    let service = ContentService::new(
        InMemorySchemaStore::with_schemas([fixtures::blog_post_schema()]),
        InMemoryDocumentStore::new(),
    );

    let credentials = Credentials::from_authorization_header(Some("Bearer editor-token"));
    let principal = auth.authenticate(credentials).await.unwrap();
    assert!(!principal.is_admin());

    let ctx = RequestContext::authenticated(principal);
    assert_eq!(ctx.subject(), "editor@example.com");

    let created = service
        .create("blog_post", &json!({"title": "Signed"}), &ctx)
        .await
        .unwrap();
    assert_eq!(created.get("title"), Some(&json!("Signed")));
}

#[tokio::test]
async fn test_rejected_credentials() {
    let auth = authenticator().await;

    assert_eq!(
        auth.authenticate(Credentials::from_authorization_header(None))
            .await,
        Err(AuthenticationError::MissingCredential)
    );
    assert_eq!(
        auth.authenticate(Credentials::bearer("admin-token-typo"))
            .await,
        Err(AuthenticationError::InvalidCredential)
    );

    auth.revoke_token("admin-token").await;
    assert_eq!(
        auth.authenticate(Credentials::bearer("admin-token")).await,
        Err(AuthenticationError::CredentialRevoked)
    );
}

#[tokio::test]
async fn test_admin_principal() {
    let auth = authenticator().await;
    let principal = auth
        .authenticate(Credentials::bearer("admin-token"))
        .await
        .unwrap();
    assert!(principal.is_admin());
    assert_eq!(principal.subject(), "admin@example.com");
}
