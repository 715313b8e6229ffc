//! Provider descriptor data structures shared by flows and the HTTP layer.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Provider-specific quirk toggles.
pub mod quirks;

pub use builder::*;
pub use quirks::*;

// self
use crate::_prelude::*;

/// Spotify Accounts token endpoint.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderDescriptor {
	/// Descriptor identifier used in logs.
	pub id: String,
	/// Human-facing provider name used in HTTP error details.
	pub display_name: String,
	/// Token endpoint for the `client_credentials` grant.
	pub token_endpoint: Url,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: impl Into<String>) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Descriptor for the Spotify Accounts service.
	pub fn spotify() -> Result<Self, ProviderDescriptorError> {
		let token_endpoint = Url::parse(SPOTIFY_TOKEN_URL)
			.map_err(|source| ProviderDescriptorError::InvalidEndpoint { source })?;

		Self::builder("spotify").display_name("Spotify").token_endpoint(token_endpoint).build()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn spotify_preset_targets_accounts_service() {
		let descriptor = ProviderDescriptor::spotify().expect("Spotify preset should build.");

		assert_eq!(descriptor.token_endpoint.as_str(), SPOTIFY_TOKEN_URL);
		assert_eq!(descriptor.display_name, "Spotify");
		assert_eq!(descriptor.quirks, ProviderQuirks::default());
	}
}
