//! The SVES answer pipeline.
//!
//! Every question follows the same path:
//!
//! 1. **Receive** a question for a [`Session`]
//! 2. **Probe** the active backend; stop early if it is down
//! 3. **Build context**: system prompt (persona + knowledge base) + recent history
//! 4. **Send to LLM** via the session's provider, exactly once
//! 5. **Record** the exchange only if an answer came back
//!
//! Failures reach the caller as a classified [`RespondError`].

pub mod knowledge;
pub mod prompt;
pub mod responder;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use knowledge::knowledge_base;
pub use prompt::build_system_prompt;
pub use responder::{RespondError, respond};
pub use session::{ConnectionStatus, Session, SessionError};
