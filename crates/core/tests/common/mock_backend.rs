//! Wiremock setups for the backend endpoints.

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MARKET_RESEARCH: &str = "/api/market-research";
pub const CONTENT_PLANNING: &str = "/api/content-planning";
pub const VIDEO_PRODUCTION: &str = "/api/video-production";
pub const PODCAST_PRODUCTION: &str = "/api/podcast-production";

/// Answer POSTs to `route` with `status` and a JSON body, and expect
/// exactly `times` calls.
#[allow(dead_code)]
pub async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Expect no calls at all to `route`.
#[allow(dead_code)]
pub async fn mount_never(server: &MockServer, route: &str) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// Bodies of every request the server received on `route`.
#[allow(dead_code)]
pub async fn request_bodies(server: &MockServer, route: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == route)
        .filter_map(|request| serde_json::from_slice(&request.body).ok())
        .collect()
}
