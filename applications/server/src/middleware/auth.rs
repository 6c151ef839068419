/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Extension type to store the authenticated user id in the request.
/// Can be used as an extractor in handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.0
    }
}

/// Middleware that extracts and verifies the token from the
/// Authorization header.
///
/// An absent, malformed or unverifiable token maps to the
/// `Unauthenticated` error; the ownership decision stays with the
/// handlers, which know which playlist is being touched.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::Unauthenticated("Missing Auth".to_string()))?;

    let user_id = auth_service.verify_token(auth_header).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        e
    })?;

    // Insert user id into request extensions
    request.extensions_mut().insert(AuthenticatedUser(user_id));

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Unauthenticated("Missing Auth".to_string()))
    }
}
