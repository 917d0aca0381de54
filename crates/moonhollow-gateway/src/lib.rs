//! Moonhollow Gateway — uniform access to language-model providers.
//!
//! The capability is a single trait: given an ordered transcript, produce a
//! reply string. Providers form a closed set of tagged variants selected by
//! [`provider::ProviderKind`] at construction time; each variant applies its
//! own transcript-shaping before calling out. The gateway never retries —
//! retry policy, if any, belongs to the caller.

pub mod config;
pub mod factory;
pub mod json_repair;
pub mod model;
pub mod provider;
pub mod squash;

mod anthropic;
mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;
