//! Token payload, cache record, and secret wrappers.

pub mod record;
pub mod secret;
