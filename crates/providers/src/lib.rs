//! Provider adapters for the upstream video and image generation APIs.
//!
//! [`registry::ProviderRegistry`] owns one adapter per
//! [`ProviderKind`](ocgen_core::provider::ProviderKind). Each adapter
//! validates and prices through `ocgen-core`, maps the request to its
//! provider's wire body, and talks to the API through a shared
//! [`client::KieClient`].

pub mod adapter;
pub mod callback;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod mappers;
pub mod registry;

pub use adapter::{KieAdapter, RequestMapper, GenerationProvider};
pub use error::ProviderError;
pub use registry::{ProviderLookup, ProviderRegistry};
