//! Process configuration loaded once from the environment.
//!
//! | Variable                 | Default                                   |
//! |--------------------------|-------------------------------------------|
//! | `SPOTIFY_CLIENT_ID`      | unset (reported on the first token call)  |
//! | `SPOTIFY_CLIENT_SECRET`  | unset (reported on the first token call)  |
//! | `SPOTIFY_TOKEN_URL`      | `https://accounts.spotify.com/api/token`  |
//! | `HOST`                   | `0.0.0.0`                                 |
//! | `PORT`                   | `8000`                                    |
//! | `UPSTREAM_TIMEOUT_SECS`  | `10`                                      |
//! | `SERVICE_NAME`           | `Spotify Token Proxy`                     |

// std
use std::{
	net::{IpAddr, Ipv4Addr, SocketAddr},
	time::Duration as StdDuration,
};
// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	error::ConfigError,
	provider::ProviderDescriptor,
};

/// Settings for the broker and the HTTP server that fronts it.
#[derive(Clone, Debug)]
pub struct BrokerConfig {
	/// Client credential pair; may be incomplete.
	pub credentials: ClientCredentials,
	/// Provider descriptor (token endpoint + quirks).
	pub descriptor: ProviderDescriptor,
	/// Socket the HTTP server binds to.
	pub bind: SocketAddr,
	/// Request timeout applied to token endpoint calls.
	pub upstream_timeout: StdDuration,
	/// Name reported by the health endpoint.
	pub service_name: String,
}
impl BrokerConfig {
	/// Client identifier variable.
	pub const CLIENT_ID_VAR: &'static str = "SPOTIFY_CLIENT_ID";
	/// Client secret variable.
	pub const CLIENT_SECRET_VAR: &'static str = "SPOTIFY_CLIENT_SECRET";
	/// Token endpoint override variable.
	pub const TOKEN_URL_VAR: &'static str = "SPOTIFY_TOKEN_URL";
	/// Bind host variable.
	pub const HOST_VAR: &'static str = "HOST";
	/// Bind port variable.
	pub const PORT_VAR: &'static str = "PORT";
	/// Upstream timeout variable, in whole seconds.
	pub const UPSTREAM_TIMEOUT_VAR: &'static str = "UPSTREAM_TIMEOUT_SECS";
	/// Health endpoint service name variable.
	pub const SERVICE_NAME_VAR: &'static str = "SERVICE_NAME";

	const DEFAULT_PORT: u16 = 8000;
	const DEFAULT_SERVICE_NAME: &'static str = "Spotify Token Proxy";
	const DEFAULT_UPSTREAM_TIMEOUT: StdDuration = StdDuration::from_secs(10);

	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`, which maps a variable name to its value.
	///
	/// Missing credentials are not an error here; they surface as
	/// [`ConfigError::MissingCredentials`] on the first token request.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let credentials =
			ClientCredentials::from_parts(lookup(Self::CLIENT_ID_VAR), lookup(Self::CLIENT_SECRET_VAR));
		let descriptor = match non_empty(lookup(Self::TOKEN_URL_VAR)) {
			Some(raw) => {
				let token_endpoint =
					Url::parse(&raw).map_err(|source| ConfigError::InvalidEndpoint { source })?;

				ProviderDescriptor::builder("spotify")
					.display_name("Spotify")
					.token_endpoint(token_endpoint)
					.build()?
			},
			None => ProviderDescriptor::spotify()?,
		};
		let host = match non_empty(lookup(Self::HOST_VAR)) {
			Some(raw) => raw
				.parse::<IpAddr>()
				.map_err(|_| ConfigError::InvalidSetting { name: Self::HOST_VAR, value: raw })?,
			None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
		};
		let port = parse_or(lookup(Self::PORT_VAR), Self::PORT_VAR, Self::DEFAULT_PORT)?;
		let upstream_timeout = match non_empty(lookup(Self::UPSTREAM_TIMEOUT_VAR)) {
			Some(raw) => match raw.parse::<u64>() {
				Ok(secs) if secs > 0 => StdDuration::from_secs(secs),
				_ =>
					return Err(ConfigError::InvalidSetting {
						name: Self::UPSTREAM_TIMEOUT_VAR,
						value: raw,
					}),
			},
			None => Self::DEFAULT_UPSTREAM_TIMEOUT,
		};
		let service_name = non_empty(lookup(Self::SERVICE_NAME_VAR))
			.unwrap_or_else(|| Self::DEFAULT_SERVICE_NAME.into());

		Ok(Self {
			credentials,
			descriptor,
			bind: SocketAddr::new(host, port),
			upstream_timeout,
			service_name,
		})
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.map(|raw| raw.trim().to_owned()).filter(|raw| !raw.is_empty())
}

fn parse_or<T>(value: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
	T: std::str::FromStr,
{
	match non_empty(value) {
		Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidSetting { name, value: raw }),
		None => Ok(default),
	}
}
