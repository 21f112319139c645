//! Interview feedback service: retrieves a voice-interview transcript,
//! prompts a language model for structured coaching feedback, and normalizes
//! the result into a fixed markdown layout.

pub mod config;
pub mod errors;
pub mod feedback;
pub mod llm_client;
pub mod routes;
pub mod state;
pub mod transcript;
