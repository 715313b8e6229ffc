//! Token flow orchestration built around a single cached token.

pub mod common;

mod client_credentials;

pub use common::*;

// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	http::TokenHttpClient,
	provider::ProviderDescriptor,
	store::TokenCache,
};
#[cfg(feature = "reqwest")]
use crate::{config::BrokerConfig, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Broker specialized for the crate's default reqwest transport.
pub type ReqwestBroker = Broker<ReqwestHttpClient>;

/// Serves access tokens for one provider + credential pair from a single-slot cache.
///
/// The broker owns the HTTP client, provider descriptor, credentials, and cache so the HTTP
/// layer only needs a shared handle. Cloning a broker shares the cache and the refresh guard,
/// which keeps the single-slot and single-flight guarantees across clones.
pub struct Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Provider descriptor that defines the token endpoint and quirks.
	pub descriptor: ProviderDescriptor,
	/// Client credentials exchanged for access tokens.
	pub credentials: ClientCredentials,
	/// Single-slot cache holding the most recent token.
	pub cache: Arc<TokenCache>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		credentials: ClientCredentials,
		http_client: Arc<C>,
	) -> Self {
		Self {
			http_client,
			descriptor,
			credentials,
			cache: Default::default(),
			refresh_guard: Arc::new(AsyncMutex::new(())),
		}
	}

	/// Replaces the cache, e.g. to share or pre-populate it.
	pub fn with_cache(mut self, cache: Arc<TokenCache>) -> Self {
		self.cache = cache;

		self
	}

	/// Stale instant of the cached token, if one is present.
	pub fn cached_expiry(&self) -> Option<OffsetDateTime> {
		self.cache.snapshot().map(|token| token.expires_at)
	}
}
#[cfg(feature = "reqwest")]
impl Broker<ReqwestHttpClient> {
	/// Creates a broker from process configuration, applying the upstream timeout.
	pub fn from_config(config: &BrokerConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::new(config.upstream_timeout)?;

		Ok(Self::with_http_client(
			config.descriptor.clone(),
			config.credentials.clone(),
			Arc::new(http_client),
		))
	}
}
impl<C> Clone for Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			descriptor: self.descriptor.clone(),
			credentials: self.credentials.clone(),
			cache: self.cache.clone(),
			refresh_guard: self.refresh_guard.clone(),
		}
	}
}
impl<C> Debug for Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("descriptor", &self.descriptor)
			.field("credentials", &self.credentials)
			.field("cached_expiry", &self.cached_expiry())
			.finish()
	}
}
