//! Domain models and DTOs for the chat API.

pub mod chat;
pub mod intent;
pub mod session;
