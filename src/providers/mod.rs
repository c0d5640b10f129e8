//! Provider implementations of [`crate::core::provider::DNSProvider`].

pub mod dynu;
