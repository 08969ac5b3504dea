//! Resource Registry
//!
//! Static table of the resource kinds that can be enumerated, with the API
//! collection each one is listed from.

use crate::confluent::client::{ApiService, IAM_V2, ORG_V2};
use anyhow::{bail, Result};

/// Provider tag stamped on every descriptor
pub const PROVIDER: &str = "confluent";

/// Resource kinds with a dedicated item shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ServiceAccount,
    ApiKey,
    Environment,
}

/// Resource definition
#[derive(Debug)]
pub struct ResourceDef {
    pub kind: ResourceKind,
    /// Name used on the command line and in the config file
    pub key: &'static str,
    pub display_name: &'static str,
    /// Type tag of the emitted descriptors
    pub resource_type: &'static str,
    pub service: &'static ApiService,
    pub collection: &'static str,
    /// Documented upper bound of `page_size` for the collection
    pub max_page_size: u32,
}

impl ResourceDef {
    /// Requested page size: one below the documented maximum
    pub fn page_size(&self) -> u32 {
        self.max_page_size.saturating_sub(1).max(1)
    }
}

static RESOURCES: &[ResourceDef] = &[
    // https://docs.confluent.io/cloud/current/api.html#operation/listIamV2ServiceAccounts
    ResourceDef {
        kind: ResourceKind::ServiceAccount,
        key: "service_account",
        display_name: "Service Accounts",
        resource_type: "confluent_service_account",
        service: &IAM_V2,
        collection: "service-accounts",
        max_page_size: 100,
    },
    // https://docs.confluent.io/cloud/current/api.html#operation/listIamV2ApiKeys
    ResourceDef {
        kind: ResourceKind::ApiKey,
        key: "api_key",
        display_name: "API Keys",
        resource_type: "confluent_api_key",
        service: &IAM_V2,
        collection: "api-keys",
        max_page_size: 100,
    },
    // https://docs.confluent.io/cloud/current/api.html#operation/listOrgV2Environments
    ResourceDef {
        kind: ResourceKind::Environment,
        key: "environment",
        display_name: "Environments",
        resource_type: "confluent_environment",
        service: &ORG_V2,
        collection: "environments",
        max_page_size: 100,
    },
];

/// All known resource definitions
pub fn all_resources() -> &'static [ResourceDef] {
    RESOURCES
}

/// Look up a resource definition by key
pub fn get_resource(key: &str) -> Option<&'static ResourceDef> {
    all_resources().iter().find(|r| r.key == key)
}

/// Valid resource keys
pub fn resource_keys() -> Vec<&'static str> {
    all_resources().iter().map(|r| r.key).collect()
}

/// Resolve requested keys to definitions, keeping request order.
/// An empty request selects every resource; repeated keys are collapsed.
pub fn resolve_resources(keys: &[String]) -> Result<Vec<&'static ResourceDef>> {
    if keys.is_empty() {
        return Ok(all_resources().iter().collect());
    }

    let mut selected: Vec<&'static ResourceDef> = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(def) = get_resource(key.trim()) else {
            bail!(
                "Unknown resource: {} (valid: {})",
                key,
                resource_keys().join(", ")
            );
        };
        if !selected.iter().any(|s| s.kind == def.kind) {
            selected.push(def);
        }
    }
    Ok(selected)
}
