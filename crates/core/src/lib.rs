//! # SVES Core
//!
//! Domain types, traits, and error definitions for the Simic Virtual Expert
//! System. This crate performs **no I/O**; it defines the domain model that
//! the provider, agent and CLI crates implement against.
//!
//! ## Design Philosophy
//!
//! Every LLM backend is reached through the [`Provider`] trait defined here.
//! Implementations live in `sves-providers`. This enables:
//! - Swapping backends via configuration
//! - Easy testing with scripted providers
//! - Clean dependency graph (all crates depend inward on core)

pub mod backend;
pub mod error;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use backend::BackendKind;
pub use error::ProviderError;
pub use message::{Conversation, ConversationId, Message, Role, assemble_turns};
pub use provider::Provider;
