//! Broker-level error types shared across configuration, transport, and flows.
//!
//! Every message rendered from these types is safe to log: none of them carry the client
//! secret or the encoded `Authorization` credential.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; surfaced to HTTP callers as `500`.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The upstream token endpoint could not supply a token; surfaced as `502`.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
}
impl Error {
	/// Returns `true` when the error stems from local configuration.
	pub fn is_config(&self) -> bool {
		matches!(self, Self::Config(_))
	}

	/// Returns `true` when the error stems from the upstream provider.
	pub fn is_upstream(&self) -> bool {
		matches!(self, Self::Upstream(_))
	}
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier or secret is absent or empty.
	#[error("Client credentials are missing: {missing}.")]
	MissingCredentials {
		/// Which half of the credential pair is absent.
		missing: &'static str,
	},
	/// Token endpoint cannot be parsed.
	#[error("Token endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
	/// A setting could not be parsed.
	#[error("Setting `{name}` has an invalid value `{value}`.")]
	InvalidSetting {
		/// Environment variable name.
		name: &'static str,
		/// Raw value that failed to parse.
		value: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures to obtain a token from the upstream provider.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete before the transport timeout.
	#[error("Request timed out while calling the token endpoint.")]
	Timeout,
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint returned HTTP {status}{}.", oauth_suffix(.oauth_error))]
	Status {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// OAuth `error` code from the response body, when present.
		oauth_error: Option<String>,
	},
	/// Token endpoint responded with a body that is not a JSON object.
	#[error("Token endpoint returned malformed JSON at `{path}`.")]
	TokenResponseParse {
		/// JSON path at which parsing failed.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Token endpoint responded with JSON that lacks a string `access_token`.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
}
impl UpstreamError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// HTTP status attached to the failure, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
impl From<serde_path_to_error::Error<serde_json::Error>> for UpstreamError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::TokenResponseParse { path, source: e.into_inner() }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for UpstreamError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e.without_url()) }
	}
}

fn oauth_suffix(oauth_error: &Option<String>) -> String {
	oauth_error.as_deref().map(|code| format!(" ({code})")).unwrap_or_default()
}
