//! Transport primitives for token endpoint calls.
//!
//! The module exposes [`TokenHttpClient`] alongside [`TokenHttpRequest`] and
//! [`TokenHttpResponse`] so the broker can run against reqwest in production and against
//! in-process fakes in tests. Implementations own the mapping from their transport errors into
//! [`UpstreamError`] and must never render the `Authorization` value into those errors.

// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
// self
use crate::{_prelude::*, auth::TokenSecret, error::UpstreamError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Future returned by [`TokenHttpClient::post_form`].
pub type TokenHttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TokenHttpResponse, UpstreamError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of posting a token request.
///
/// The trait is the broker's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single transport can be shared behind `Arc` by every request
/// the HTTP layer serves.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Posts a form-encoded token request and returns the raw response.
	///
	/// Non-success statuses are returned as responses; only failures to obtain a response at
	/// all (DNS, TCP, TLS, timeouts, body reads) are reported as [`UpstreamError`].
	fn post_form(&self, request: TokenHttpRequest) -> TokenHttpFuture<'_>;
}

/// Form-encoded token request addressed to a provider's token endpoint.
#[derive(Clone, Debug)]
pub struct TokenHttpRequest {
	/// Token endpoint URL.
	pub url: Url,
	/// Full `Authorization` header value. Redacted in `Debug` output.
	pub authorization: TokenSecret,
	/// `application/x-www-form-urlencoded` body.
	pub body: String,
}
impl TokenHttpRequest {
	/// Content type sent with every token request.
	pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

	/// Builds a `grant_type=client_credentials` request.
	pub fn client_credentials(url: Url, authorization: TokenSecret) -> Self {
		let body = url::form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", "client_credentials")
			.finish();

		Self { url, authorization, body }
	}
}

/// Status + body captured from the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenHttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl TokenHttpResponse {
	/// Returns `true` for `2xx` statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token
/// endpoints return results directly instead of delegating to another URI.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with redirects disabled and the provided request timeout.
	pub fn new(timeout: std::time::Duration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.timeout(timeout)
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	fn post_form(&self, request: TokenHttpRequest) -> TokenHttpFuture<'_> {
		Box::pin(async move {
			let mut authorization = HeaderValue::from_str(request.authorization.expose())
				.map_err(|_| UpstreamError::network(InvalidAuthorizationHeader))?;

			authorization.set_sensitive(true);

			let response = self
				.0
				.post(request.url)
				.header(AUTHORIZATION, authorization)
				.header(CONTENT_TYPE, TokenHttpRequest::CONTENT_TYPE)
				.body(request.body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(TokenHttpResponse { status, body })
		})
	}
}

/// Raised when the encoded credential cannot be carried in a header.
#[cfg(feature = "reqwest")]
#[derive(Debug, ThisError)]
#[error("Authorization header contains characters that are not valid in HTTP headers.")]
struct InvalidAuthorizationHeader;
