use axum::{body::Body, extract::ConnectInfo};
use governor::{clock::QuantaInstant, middleware::NoOpMiddleware};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, errors::GovernorError, governor::GovernorConfigBuilder,
    key_extractor::KeyExtractor,
};

pub const DEFAULT_REQUESTS_PER_MINUTE: u64 = 60;

pub type RateLimitLayer = GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body>;

/// Keys the limiter by peer address; requests without connection info
/// (in-process tests) share the loopback bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientIpKeyExtractor;

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<B>(&self, req: &axum::http::Request<B>) -> Result<Self::Key, GovernorError> {
        Ok(req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)))
    }
}

/// Limiter for the sign-in and assistant routes, sized by
/// `RATE_LIMIT_PER_MINUTE`.
pub fn rate_limit_layer() -> anyhow::Result<RateLimitLayer> {
    let rate_limit = env::var("RATE_LIMIT_PER_MINUTE")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_REQUESTS_PER_MINUTE);

    custom_rate_limit_layer(rate_limit)
}

pub fn custom_rate_limit_layer(requests_per_minute: u64) -> anyhow::Result<RateLimitLayer> {
    let requests_per_minute = requests_per_minute.clamp(1, 60_000);
    let quota_duration_ms = 60_000 / requests_per_minute;

    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(quota_duration_ms)
            .burst_size(requests_per_minute as u32)
            .key_extractor(ClientIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Failed to finish governor config"))?,
    );

    Ok(GovernorLayer::new(config))
}
