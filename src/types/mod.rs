//! Transcript and streaming types shared by providers, agents and tools.

pub mod generation;
pub mod message;
pub mod stream;

pub use generation::{FinishReason, GenerationSettings};
pub use message::*;
pub use stream::*;
