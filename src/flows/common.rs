//! Shared helpers for flow implementations (response classification, expiry math).

// self
use crate::{
	_prelude::*,
	auth::TokenPayload,
	error::UpstreamError,
	http::TokenHttpResponse,
	provider::ProviderQuirks,
};

/// Computes when a freshly issued payload goes stale:
/// `issued_at + expires_in - expiry_buffer`, falling back to the provider's default validity
/// when `expires_in` is absent or not a number.
pub fn stale_instant(
	payload: &TokenPayload,
	issued_at: OffsetDateTime,
	quirks: &ProviderQuirks,
) -> OffsetDateTime {
	let validity = payload.expires_in().unwrap_or(quirks.default_expires_in);

	issued_at.saturating_add(validity).saturating_sub(quirks.expiry_buffer)
}

/// Converts a raw token endpoint response into a payload or an [`UpstreamError`].
pub(crate) fn parse_token_response(
	response: TokenHttpResponse,
) -> Result<TokenPayload, UpstreamError> {
	if !response.is_success() {
		return Err(UpstreamError::Status {
			status: response.status,
			oauth_error: oauth_error_code(&response.body),
		});
	}

	TokenPayload::parse(&response.body)
}

/// Extracts the RFC 6749 `error` code from an error body.
///
/// Only short codes made of visible ASCII survive so arbitrary response text never reaches
/// error messages.
fn oauth_error_code(body: &[u8]) -> Option<String> {
	#[derive(Deserialize)]
	struct ErrorBody {
		error: String,
	}

	let ErrorBody { error } = serde_json::from_slice(body).ok()?;

	(!error.is_empty() && error.len() <= 64 && error.bytes().all(|b| b.is_ascii_graphic()))
		.then_some(error)
}
