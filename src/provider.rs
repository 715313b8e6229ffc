//! Provider-facing descriptors.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering the token endpoint
//! (HTTPS-only outside loopback), the human-facing provider name, and quirks controlling how
//! cached tokens age.

pub mod descriptor;

pub use descriptor::*;
