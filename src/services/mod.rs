//! Chatbot logic: catalog, classification, sentiment, replies, and sessions.

pub mod catalog;
pub mod chatbot;
pub mod extraction;
pub mod intent;
pub mod quick_replies;
pub mod responder;
pub mod sentiment;
pub mod session_store;
