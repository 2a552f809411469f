//! Name scoping: per-document exports and local scopes, plus the provider
//! that resolves qualified names through them.

pub mod compute;
pub mod provider;

pub use compute::{compute_exports, compute_local_scopes, compute_scopes, ScopeIndex};
pub use provider::{ScopeProvider, SharedExports};
