//! Auth-domain models: client credentials and the token records the broker caches.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::{record::*, secret::*};
