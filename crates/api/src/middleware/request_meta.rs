//! Audit metadata extractor.
//!
//! There is no authentication layer. The acting user is whatever the client
//! names in the optional `X-User-Id` header.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use kpi_core::types::DbId;
use kpi_db::models::audit::AuditContext;

use crate::error::AppError;

/// Header carrying the acting user's id.
pub const ACTOR_HEADER: &str = "x-user-id";

/// Who is making the request and from where, for audit log rows.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta(pub AuditContext);

impl<S> FromRequestParts<S> for RequestMeta
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor_id = match header_str(parts, ACTOR_HEADER) {
            Some(raw) => Some(raw.trim().parse::<DbId>().map_err(|_| {
                AppError::BadRequest(format!("{ACTOR_HEADER} must be a numeric user id"))
            })?),
            None => None,
        };

        Ok(RequestMeta(AuditContext {
            actor_id,
            ip_address: client_ip(parts),
            user_agent: header_str(parts, USER_AGENT.as_str()).map(str::to_string),
        }))
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}

/// First hop of `X-Forwarded-For`, then `X-Real-IP`, then the socket peer.
fn client_ip(parts: &Parts) -> Option<String> {
    if let Some(forwarded) = header_str(parts, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty()) {
            return Some(first.to_string());
        }
    }
    if let Some(real_ip) = header_str(parts, "x-real-ip") {
        return Some(real_ip.trim().to_string());
    }
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> Result<RequestMeta, AppError> {
        let (mut parts, _) = request.into_parts();
        RequestMeta::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_actor_agent_and_first_forwarded_hop() {
        let request = Request::builder()
            .header(ACTOR_HEADER, "7")
            .header("user-agent", "curl/8.0")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .header("x-real-ip", "10.0.0.2")
            .body(())
            .unwrap();

        let RequestMeta(ctx) = extract(request).await.unwrap();
        assert_eq!(ctx.actor_id, Some(7));
        assert_eq!(ctx.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(ctx.ip_address.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn falls_back_to_real_ip_then_peer_address() {
        let request = Request::builder()
            .header("x-real-ip", "10.0.0.2")
            .body(())
            .unwrap();
        let RequestMeta(ctx) = extract(request).await.unwrap();
        assert_eq!(ctx.ip_address.as_deref(), Some("10.0.0.2"));

        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
        let RequestMeta(ctx) = extract(request).await.unwrap();
        assert_eq!(ctx.ip_address.as_deref(), Some("127.0.0.1"));
        assert_eq!(ctx.actor_id, None);
    }

    #[tokio::test]
    async fn non_numeric_actor_is_rejected() {
        let request = Request::builder()
            .header(ACTOR_HEADER, "admin")
            .body(())
            .unwrap();
        assert_matches!(extract(request).await, Err(AppError::BadRequest(_)));
    }
}
