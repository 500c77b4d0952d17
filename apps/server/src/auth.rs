//! Actor resolution from trusted gateway headers.
//!
//! Session handling lives in the gateway in front of this service. It forwards
//! the authenticated identity as headers, which are taken verbatim and turned
//! into an [`ActorContext`] stored in the request extensions.

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use ajo_core::authorization::{ActorContext, Role};

use crate::error::ApiError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
pub const ACTOR_BUSINESSES_HEADER: &str = "x-actor-businesses";
pub const ACTIVE_BUSINESS_HEADER: &str = "x-active-business";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub fn actor_from_headers(headers: &HeaderMap) -> Result<ActorContext, ApiError> {
    let user_id = header(headers, ACTOR_ID_HEADER)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {} header", ACTOR_ID_HEADER)))?;
    let role: Role = header(headers, ACTOR_ROLE_HEADER)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {} header", ACTOR_ROLE_HEADER)))?
        .parse()
        .map_err(|_| ApiError::Unauthorized("unknown actor role".to_string()))?;
    let business_ids = header(headers, ACTOR_BUSINESSES_HEADER)
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();
    let active_business_id = header(headers, ACTIVE_BUSINESS_HEADER).map(str::to_string);

    Ok(ActorContext {
        user_id: user_id.to_string(),
        role,
        business_ids,
        active_business_id,
    })
}

/// Rejects requests without an actor and exposes the actor to handlers.
pub async fn require_actor(mut request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let actor = actor_from_headers(request.headers())?;
    tracing::debug!(user_id = %actor.user_id, role = %actor.role, "Resolved actor");
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}
