//! External text and speech provider clients.
//!
//! Implements the provider interfaces from `playlet_core::generation`:
//! chat completion (OpenAI-compatible and Anthropic, routed by an
//! explicit precedence list) and ElevenLabs speech synthesis. Every
//! client takes its configuration struct at construction; nothing in
//! this crate reads the process environment.

pub mod chat;
pub mod config;
pub mod tts;

pub use chat::ChatRouter;
pub use tts::ElevenLabsTts;
