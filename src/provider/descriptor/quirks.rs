// self
use crate::_prelude::*;

/// Provider-specific quirks that influence how cached tokens age.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderQuirks {
	/// Subtracted from the provider-declared validity before a token is considered stale.
	pub expiry_buffer: Duration,
	/// Validity assumed when the response omits `expires_in` or it is not a number.
	pub default_expires_in: Duration,
}
impl ProviderQuirks {
	const DEFAULT_EXPIRES_IN: Duration = Duration::seconds(3_600);
	const DEFAULT_EXPIRY_BUFFER: Duration = Duration::seconds(60);
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self {
			expiry_buffer: Self::DEFAULT_EXPIRY_BUFFER,
			default_expires_in: Self::DEFAULT_EXPIRES_IN,
		}
	}
}
