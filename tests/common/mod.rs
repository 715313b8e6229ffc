//! Helpers shared by the integration tests.

#![allow(dead_code)]

// std
use std::{sync::Arc, time::Duration as StdDuration};
// crates.io
use httpmock::MockServer;
use time::OffsetDateTime;
// self
use spotify_token_broker::{
	auth::{CachedToken, ClientCredentials, TokenPayload},
	flows::{Broker, ReqwestBroker},
	http::ReqwestHttpClient,
	provider::ProviderDescriptor,
	reqwest::{Client, redirect::Policy},
	store::TokenCache,
	url::Url,
};

pub const CLIENT_ID: &str = "client-id-under-test";
pub const CLIENT_SECRET: &str = "s3cr3t-value-under-test";
/// `Basic base64("client-id-under-test:s3cr3t-value-under-test")`.
pub const BASIC_AUTHORIZATION: &str =
	"Basic Y2xpZW50LWlkLXVuZGVyLXRlc3Q6czNjcjN0LXZhbHVlLXVuZGVyLXRlc3Q=";
pub const ENCODED_CREDENTIALS: &str = "Y2xpZW50LWlkLXVuZGVyLXRlc3Q6czNjcjN0LXZhbHVlLXVuZGVyLXRlc3Q=";

/// Reqwest transport with a short timeout suitable for talking to `httpmock`.
pub fn test_reqwest_http_client(timeout: StdDuration) -> ReqwestHttpClient {
	let client = Client::builder()
		.redirect(Policy::none())
		.timeout(timeout)
		.build()
		.expect("Failed to build Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Descriptor pointing at the mock server's `/api/token`.
pub fn test_descriptor(server: &MockServer) -> ProviderDescriptor {
	ProviderDescriptor::builder("mock-spotify")
		.display_name("Spotify")
		.token_endpoint(
			Url::parse(&server.url("/api/token")).expect("Mock token endpoint should parse."),
		)
		.build()
		.expect("Mock provider descriptor should build.")
}

/// Broker wired to the mock server with a shared cache handle.
pub fn build_reqwest_test_broker(
	server: &MockServer,
	credentials: ClientCredentials,
) -> (ReqwestBroker, Arc<TokenCache>) {
	let cache = Arc::new(TokenCache::default());
	let broker = Broker::with_http_client(
		test_descriptor(server),
		credentials,
		Arc::new(test_reqwest_http_client(StdDuration::from_secs(5))),
	)
	.with_cache(cache.clone());

	(broker, cache)
}

/// Complete credentials used by most tests.
pub fn credentials() -> ClientCredentials {
	ClientCredentials::new(CLIENT_ID, CLIENT_SECRET)
}

/// Cache record holding `access` that goes stale at `expires_at`.
pub fn cached_token(access: &str, expires_at: OffsetDateTime) -> CachedToken {
	let body = format!("{{\"access_token\":\"{access}\",\"token_type\":\"Bearer\",\"expires_in\":3600}}");
	let payload = TokenPayload::parse(body.as_bytes()).expect("Fixture payload should parse.");

	CachedToken::new(payload, expires_at)
}
