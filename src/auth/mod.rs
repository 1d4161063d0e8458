//! Authentication of callers.
//!
//! [`AuthProvider`] turns presented [`Credentials`] into a [`Principal`]. The
//! bundled [`StaticTokenAuthenticator`] keeps a fixed set of API tokens; only
//! SHA-256 digests of the tokens are held in memory.
//!
//! # Example Usage
//!
//! ```rust
//! use dynamic_content::auth::{AuthProvider, Credentials, Principal, StaticTokenAuthenticator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = StaticTokenAuthenticator::new();
//! auth.register_token("api-key-123", Principal::admin("ops@example.com")).await;
//!
//! let principal = auth.authenticate(Credentials::bearer("api-key-123")).await?;
//! assert!(principal.is_admin());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use log::debug;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// What a caller presents.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No credentials supplied
    Anonymous,
    /// Bearer API token
    Bearer(String),
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Parse an `Authorization` header value (`Bearer <token>` or `Token <token>`).
    pub fn from_authorization_header(header: Option<&str>) -> Self {
        let Some(header) = header.map(str::trim) else {
            return Self::Anonymous;
        };
        match header.split_once(' ') {
            Some((scheme, token))
                if (scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("token"))
                    && !token.trim().is_empty() =>
            {
                Self::Bearer(token.trim().to_string())
            }
            _ => Self::Anonymous,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "Anonymous"),
            Self::Bearer(_) => write!(f, "Bearer(<redacted>)"),
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    admin: bool,
    authenticated_at: Option<DateTime<Utc>>,
}

impl Principal {
    /// A caller that may read and write content.
    pub fn user(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            admin: false,
            authenticated_at: None,
        }
    }

    /// A caller that may also manage schemas and run schema sync.
    pub fn admin(subject: impl Into<String>) -> Self {
        Self {
            admin: true,
            ..Self::user(subject)
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Set when the principal was produced by an [`AuthProvider`].
    pub fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("No credentials provided")]
    MissingCredential,
    #[error("Invalid credential provided")]
    InvalidCredential,
    #[error("Credential has been revoked")]
    CredentialRevoked,
}

/// Authenticates callers.
pub trait AuthProvider: Send + Sync {
    fn authenticate(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<Principal, AuthenticationError>> + Send;
}

fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fixed set of API tokens.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthenticator {
    // digest -> principal
    tokens: Arc<RwLock<HashMap<String, Principal>>>,
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl StaticTokenAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register_token(&self, token: &str, principal: Principal) {
        let digest = token_digest(token);
        self.revoked.write().await.remove(&digest);
        self.tokens.write().await.insert(digest, principal);
    }

    /// Revoke a token. Returns `false` if it was never registered.
    pub async fn revoke_token(&self, token: &str) -> bool {
        let digest = token_digest(token);
        if self.tokens.write().await.remove(&digest).is_none() {
            return false;
        }
        self.revoked.write().await.insert(digest);
        true
    }
}

impl AuthProvider for StaticTokenAuthenticator {
    async fn authenticate(&self, credentials: Credentials) -> Result<Principal, AuthenticationError> {
        let token = match credentials {
            Credentials::Anonymous => return Err(AuthenticationError::MissingCredential),
            Credentials::Bearer(token) => token,
        };

        let digest = token_digest(&token);
        if let Some(principal) = self.tokens.read().await.get(&digest) {
            debug!("Authenticated '{}'", principal.subject);
            return Ok(Principal {
                authenticated_at: Some(Utc::now()),
                ..principal.clone()
            });
        }

        if self.revoked.read().await.contains(&digest) {
            Err(AuthenticationError::CredentialRevoked)
        } else {
            Err(AuthenticationError::InvalidCredential)
        }
    }
}
