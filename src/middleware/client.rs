use std::{convert::Infallible, net::SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};

/// Caller details recorded with reviews and visits. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientMeta {
    fn from_parts(parts: &Parts) -> Self {
        // The first hop of X-Forwarded-For is the client when running behind a proxy.
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            ip_address: forwarded.or(peer),
            user_agent,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn prefers_forwarded_address() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header(header::USER_AGENT, "curl/8.0")
            .body(())
            .unwrap();
        let (parts, _) = request.into_parts();
        let meta = ClientMeta::from_parts(&parts);
        assert_eq!(meta.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(meta.user_agent.as_deref(), Some("curl/8.0"));
    }

    #[test]
    fn missing_headers_yield_none() {
        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        let meta = ClientMeta::from_parts(&parts);
        assert!(meta.ip_address.is_none());
        assert!(meta.user_agent.is_none());
    }
}
