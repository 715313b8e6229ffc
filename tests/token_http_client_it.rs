mod common;

// std
use std::{
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration as StdDuration,
};
// crates.io
use httpmock::prelude::*;
use parking_lot::Mutex;
// self
use common::*;
use spotify_token_broker::{
	auth::TokenSecret,
	config::BrokerConfig,
	error::{Error, UpstreamError},
	flows::{Broker, ReqwestBroker},
	http::{TokenHttpClient, TokenHttpFuture, TokenHttpRequest, TokenHttpResponse},
	provider::ProviderDescriptor,
	url::Url,
};

#[derive(Debug)]
struct ConnectionReset;
impl Display for ConnectionReset {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Connection reset by peer.")
	}
}
impl std::error::Error for ConnectionReset {}

#[derive(Default)]
struct FlakyHttpClient {
	calls: AtomicUsize,
	seen_authorization: Mutex<Option<String>>,
}
impl TokenHttpClient for FlakyHttpClient {
	fn post_form(&self, request: TokenHttpRequest) -> TokenHttpFuture<'_> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		*self.seen_authorization.lock() = Some(request.authorization.expose().to_owned());

		Box::pin(async move { Err::<TokenHttpResponse, _>(UpstreamError::network(ConnectionReset)) })
	}
}

fn configured_broker(token_url: &str) -> ReqwestBroker {
	let config = BrokerConfig::from_lookup(|name| match name {
		"SPOTIFY_CLIENT_ID" => Some(CLIENT_ID.into()),
		"SPOTIFY_CLIENT_SECRET" => Some(CLIENT_SECRET.into()),
		"SPOTIFY_TOKEN_URL" => Some(token_url.into()),
		"UPSTREAM_TIMEOUT_SECS" => Some("1".into()),
		_ => None,
	})
	.expect("Test configuration should load.");

	ReqwestBroker::from_config(&config).expect("Configured broker should build.")
}

fn request(url: &str) -> TokenHttpRequest {
	TokenHttpRequest::client_credentials(
		Url::parse(url).expect("Test URL should parse."),
		TokenSecret::new(BASIC_AUTHORIZATION),
	)
}

#[tokio::test]
async fn reqwest_client_returns_error_statuses_as_responses() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/token")
				.header("authorization", BASIC_AUTHORIZATION)
				.body("grant_type=client_credentials");
			then.status(503).body("maintenance");
		})
		.await;
	let client = test_reqwest_http_client(StdDuration::from_secs(5));
	let response = client
		.post_form(request(&server.url("/api/token")))
		.await
		.expect("Non-2xx statuses should still produce a response.");

	assert_eq!(response.status, 503);
	assert_eq!(response.body, b"maintenance");
	assert!(!response.is_success());

	mock.assert_async().await;
}

#[tokio::test]
async fn reqwest_client_maps_timeouts() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200).body("{}").delay(StdDuration::from_millis(500));
		})
		.await;
	let client = test_reqwest_http_client(StdDuration::from_millis(50));
	let err = client
		.post_form(request(&server.url("/api/token")))
		.await
		.expect_err("Slow responses should time out.");

	assert!(matches!(err, UpstreamError::Timeout));
}

#[tokio::test]
async fn reqwest_client_maps_connection_failures() {
	let client = test_reqwest_http_client(StdDuration::from_secs(5));
	let err = client
		.post_form(request("http://127.0.0.1:1/api/token"))
		.await
		.expect_err("Nothing listens on port 1.");

	assert!(matches!(err, UpstreamError::Network { .. }));
	assert!(!format!("{err:?}").contains(ENCODED_CREDENTIALS));
}

#[tokio::test]
async fn custom_transport_failures_surface_as_upstream_errors() {
	let http_client = Arc::new(FlakyHttpClient::default());
	let descriptor = ProviderDescriptor::spotify().expect("Spotify preset should build.");
	let broker = Broker::with_http_client(descriptor, credentials(), http_client.clone());
	let err = broker.get_token().await.expect_err("Transport failure should propagate.");

	assert!(matches!(err, Error::Upstream(UpstreamError::Network { .. })));
	assert_eq!(err.to_string(), "Network error occurred while calling the token endpoint.");
	assert_eq!(http_client.seen_authorization.lock().as_deref(), Some(BASIC_AUTHORIZATION));
	assert!(broker.cached_expiry().is_none());

	broker.get_token().await.expect_err("Failures are not cached; the transport is retried.");

	assert_eq!(http_client.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn configured_broker_applies_the_upstream_timeout() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200)
				.body(r#"{"access_token":"late","expires_in":3600}"#)
				.delay(StdDuration::from_secs(3));
		})
		.await;
	let broker = configured_broker(&server.url("/api/token"));
	let err = tokio::time::timeout(StdDuration::from_secs(2), broker.get_token())
		.await
		.expect("The configured timeout should fire before the outer one.")
		.expect_err("Slow provider should time out.");

	assert!(matches!(err, Error::Upstream(UpstreamError::Timeout)));
	assert!(broker.cached_expiry().is_none());
}

#[tokio::test]
async fn configured_broker_does_not_follow_redirects() {
	let server = MockServer::start_async().await;
	let redirect = server
		.mock_async(|when, then| {
			when.method(POST).path("/moved");
			then.status(302).header("location", "/api/token");
		})
		.await;
	let target = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200).body(r#"{"access_token":"redirected","expires_in":3600}"#);
		})
		.await;
	let broker = configured_broker(&server.url("/moved"));
	let err = broker.get_token().await.expect_err("Redirects should surface as an error status.");

	assert!(matches!(err, Error::Upstream(UpstreamError::Status { status: 302, .. })));

	redirect.assert_calls_async(1).await;
	target.assert_calls_async(0).await;
}
