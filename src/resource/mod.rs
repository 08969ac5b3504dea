//! Resource abstraction layer
//!
//! # Architecture
//!
//! - [`registry`] - Static table of enumerable resource kinds
//! - [`generator`] - List-all-pages collection and mapping per kind
//! - [`descriptor`] - The descriptor handed to the import framework

pub mod descriptor;
pub mod generator;
pub mod registry;

pub use descriptor::ResourceDescriptor;
pub use generator::{init_all_resources, init_resources};
pub use registry::*;
