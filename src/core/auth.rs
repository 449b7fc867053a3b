//! Admin authentication
//!
//! The storefront never issues tokens. Admin requests carry an HS256 bearer
//! JWT signed with the shared secret; its claims must mark the caller as an
//! admin (`role = "admin"` or `isAdmin = true`) and `exp` is enforced.
//!
//! All admin routes sit behind one [`AuthGuard`] layer, which resolves an
//! [`AuthContext`] and turns away anyone who is not an admin.

use crate::core::error::{RequestError, StoreError};
use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Who is calling
#[derive(Debug, Clone, PartialEq)]
pub enum AuthContext {
    /// Valid token with admin rights
    Admin { subject: String },

    /// Valid token without admin rights
    Authenticated { subject: String },

    /// No credentials
    Anonymous,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::Admin { .. })
    }

    pub fn subject(&self) -> Option<&str> {
        match self {
            AuthContext::Admin { subject } | AuthContext::Authenticated { subject } => {
                Some(subject)
            }
            AuthContext::Anonymous => None,
        }
    }
}

fn rejection(context: &AuthContext) -> StoreError {
    match context {
        AuthContext::Anonymous => unauthorized("missing bearer token"),
        _ => RequestError::Forbidden {
            message: "admin access required".to_string(),
        }
        .into(),
    }
}

/// Resolves the caller from request headers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Anonymous` when no credentials are present; an error when they are invalid
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, StoreError>;
}

/// Treats every caller as anonymous
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> Result<AuthContext, StoreError> {
        Ok(AuthContext::Anonymous)
    }
}

/// Claims read from admin tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    pub exp: i64,
}

impl AdminClaims {
    pub fn grants_admin(&self) -> bool {
        self.is_admin == Some(true) || self.role.as_deref() == Some("admin")
    }

    fn subject(&self) -> String {
        self.sub
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Verifies HS256 bearer tokens against a shared secret
pub struct JwtAuthProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthProvider {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, StoreError> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let value = value.to_str().map_err(|_| unauthorized("malformed authorization header"))?;
        let (scheme, token) = value
            .split_once(' ')
            .ok_or_else(|| unauthorized("expected a bearer token"))?;
        if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
            return Err(unauthorized("expected a bearer token"));
        }
        Ok(Some(token.trim()))
    }
}

fn unauthorized(message: &str) -> StoreError {
    RequestError::Unauthorized {
        message: message.to_string(),
    }
    .into()
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, StoreError> {
        let Some(token) = Self::bearer_token(headers)? else {
            return Ok(AuthContext::Anonymous);
        };

        let data = decode::<AdminClaims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            unauthorized("invalid or expired token")
        })?;

        let claims = data.claims;
        let subject = claims.subject();
        Ok(if claims.grants_admin() {
            AuthContext::Admin { subject }
        } else {
            AuthContext::Authenticated { subject }
        })
    }
}

/// State of the admin guard middleware
#[derive(Clone)]
pub struct AuthGuard {
    provider: Arc<dyn AuthProvider>,
}

impl AuthGuard {
    pub fn admin(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }
}

/// Middleware letting only admin callers through
///
/// ```rust,ignore
/// let admin = admin_routes.route_layer(middleware::from_fn_with_state(
///     AuthGuard::admin(provider),
///     enforce,
/// ));
/// ```
pub async fn enforce(
    State(guard): State<AuthGuard>,
    req: Request,
    next: Next,
) -> Result<Response, StoreError> {
    let context = guard.provider.extract_context(req.headers()).await?;

    if !context.is_admin() {
        tracing::debug!(subject = ?context.subject(), "request rejected by admin guard");
        return Err(rejection(&context));
    }

    Ok(next.run(req).await)
}
