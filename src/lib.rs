//! Enumerate Confluent Cloud resources and turn them into import descriptors
//!
//! - [`confluent`] - Retryable transport, client factory and pagination
//! - [`resource`] - Resource kinds, generators and descriptors
//! - [`config`] - Persisted user configuration
//! - [`output`] - Import document rendering

pub mod config;
pub mod confluent;
pub mod output;
pub mod resource;
