//! Client credential pair used for the `client_credentials` grant.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// OAuth 2.0 client identifier + secret loaded once at startup.
///
/// Either half may be absent so a misconfigured process can still boot and report the problem
/// on the first token request. Empty strings are treated as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientCredentials {
	client_id: Option<String>,
	client_secret: Option<TokenSecret>,
}
impl ClientCredentials {
	/// Creates a complete credential pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self::from_parts(Some(client_id.into()), Some(client_secret.into()))
	}

	/// Creates a credential pair from optional halves, discarding empty values.
	pub fn from_parts(client_id: Option<String>, client_secret: Option<String>) -> Self {
		Self {
			client_id: client_id.filter(|value| !value.is_empty()),
			client_secret: client_secret.filter(|value| !value.is_empty()).map(TokenSecret::new),
		}
	}

	/// Client identifier, if configured.
	pub fn client_id(&self) -> Option<&str> {
		self.client_id.as_deref()
	}

	/// Returns `true` when both halves are present.
	pub fn is_complete(&self) -> bool {
		self.client_id.is_some() && self.client_secret.is_some()
	}

	/// Fails with [`ConfigError::MissingCredentials`] unless both halves are present.
	pub fn ensure_complete(&self) -> Result<(), ConfigError> {
		self.parts().map(|_| ())
	}

	/// Builds the `Authorization` header value: `Basic base64(client_id:client_secret)`.
	///
	/// The value embeds the secret, so it stays wrapped in [`TokenSecret`].
	pub fn basic_authorization(&self) -> Result<TokenSecret, ConfigError> {
		let (id, secret) = self.parts()?;
		let encoded = STANDARD.encode(format!("{id}:{}", secret.expose()));

		Ok(TokenSecret::new(format!("Basic {encoded}")))
	}

	fn parts(&self) -> Result<(&str, &TokenSecret), ConfigError> {
		match (self.client_id.as_deref(), self.client_secret.as_ref()) {
			(Some(id), Some(secret)) => Ok((id, secret)),
			(None, Some(_)) => Err(ConfigError::MissingCredentials { missing: "client id" }),
			(Some(_), None) => Err(ConfigError::MissingCredentials { missing: "client secret" }),
			(None, None) =>
				Err(ConfigError::MissingCredentials { missing: "client id and client secret" }),
		}
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.finish()
	}
}
