//! Per-client-IP request quota for the authentication routes.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use governor::{DefaultKeyedRateLimiter, RateLimiter};
use inkpost_config::RateLimitConfig;
use inkpost_core::AppError;
use tracing::{debug, warn};

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Shared keyed limiter; clones count against the same quota.
#[derive(Clone)]
pub struct IpRateLimit {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    trust_proxy_headers: bool,
}

impl IpRateLimit {
    /// `None` when rate limiting is disabled.
    pub fn from_config(config: &RateLimitConfig) -> Option<Self> {
        config.auth_quota().map(|quota| Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            trust_proxy_headers: config.trust_proxy_headers,
        })
    }

    /// Number of client keys currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Forgets clients whose quota has fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Prunes on a fixed interval until every handle to the limiter is gone.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_pruner(&self) {
        let limiter = Arc::downgrade(&self.limiter);
        let trust_proxy_headers = self.trust_proxy_headers;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PRUNE_INTERVAL);
            interval.tick().await;

            loop {
                interval.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    break;
                };

                let limit = IpRateLimit {
                    limiter,
                    trust_proxy_headers,
                };
                limit.prune();
                debug!(clients = limit.tracked_clients(), "Pruned rate limiter state");
            }
        });
    }

    /// The key this limiter charges `req` against.
    pub fn key_for(&self, req: &Request) -> IpAddr {
        client_ip(req, self.trust_proxy_headers)
    }
}

pub async fn limit_by_ip(
    State(limit): State<IpRateLimit>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = limit.key_for(&req);

    if limit.limiter.check_key(&ip).is_err() {
        warn!(client_ip = %ip, path = %req.uri().path(), "Rate limit exceeded");
        return Err(AppError::too_many_requests(
            "Too many requests, please try again later.",
        ));
    }

    Ok(next.run(req).await)
}

/// Resolves the client address.
///
/// Proxy headers are consulted only when `trust_proxy_headers` is set;
/// otherwise the peer address is authoritative.
pub fn client_ip(req: &Request, trust_proxy_headers: bool) -> IpAddr {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let resolved = if trust_proxy_headers {
        forwarded_ip(req.headers()).or(peer)
    } else {
        peer
    };

    resolved.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header_ip = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|value| value.trim().parse::<IpAddr>().ok())
    };

    header_ip("x-forwarded-for").or_else(|| header_ip("x-real-ip"))
}
