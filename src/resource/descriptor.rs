//! Resource Descriptor
//!
//! Generic handle for one discovered remote resource, as consumed by the
//! import framework.

use serde::{Deserialize, Serialize};

/// (id, label, type, provider, dependencies) tuple for one remote resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    id: String,
    label: String,
    #[serde(rename = "type")]
    resource_type: String,
    provider: String,
    #[serde(default)]
    dependencies: Vec<String>,
}

impl ResourceDescriptor {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        resource_type: impl Into<String>,
        provider: impl Into<String>,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            resource_type: resource_type.into(),
            provider: provider.into(),
            dependencies,
        }
    }

    /// Descriptor without dependencies
    pub fn simple(
        id: impl Into<String>,
        label: impl Into<String>,
        resource_type: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self::new(id, label, resource_type, provider, Vec::new())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}
