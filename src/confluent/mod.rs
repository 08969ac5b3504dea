//! Confluent Cloud API interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - Cloud API key credentials
//! - [`client`] - Client factory and per-service list calls
//! - [`http`] - Retryable HTTP transport with exponential backoff
//! - [`pagination`] - Page token extraction and the list-all-pages loop
//!
//! # Example
//!
//! ```ignore
//! use ccimport::confluent::{client::{ClientFactory, IAM_V2}, auth::Credentials, http::RetryPolicy};
//!
//! async fn example(key: String, secret: String) -> anyhow::Result<()> {
//!     let factory = ClientFactory::new("https://api.confluent.cloud", RetryPolicy::default(), Credentials::new(Some(key), Some(secret)))?;
//!     let page = factory.client(&IAM_V2).list_page::<serde_json::Value>("service-accounts", 99, None).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod pagination;
