//! Provider-agnostic record model and the provider trait.

pub mod name;
pub mod provider;
pub mod record;
