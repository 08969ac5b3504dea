//! Resource Generators
//!
//! Lists every item of a resource kind across all pages and maps each item to
//! a [`ResourceDescriptor`].

use super::descriptor::ResourceDescriptor;
use super::registry::{ResourceDef, ResourceKind, PROVIDER};
use crate::confluent::client::ClientFactory;
use crate::confluent::pagination::collect_all_pages;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// An item of a list response that can be turned into a descriptor
pub trait ListItem: DeserializeOwned {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

/// IAM v2 service account
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ListItem for ServiceAccount {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }
}

/// Reference to the principal owning a key
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectReference {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySpec {
    #[serde(default)]
    pub owner: Option<ObjectReference>,
}

/// IAM v2 API key, labelled by the id of its owner
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    pub id: String,
    #[serde(default)]
    pub spec: Option<ApiKeySpec>,
}

impl ListItem for ApiKey {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        self.spec
            .as_ref()
            .and_then(|spec| spec.owner.as_ref())
            .and_then(|owner| owner.id.as_deref())
            .unwrap_or("")
    }
}

/// Org v2 environment
#[derive(Debug, Clone, Deserialize)]
pub struct Environment {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ListItem for Environment {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }
}

/// Map items to descriptors, one per item, in order
pub fn create_resources<T: ListItem>(def: &ResourceDef, items: &[T]) -> Vec<ResourceDescriptor> {
    items
        .iter()
        .map(|item| ResourceDescriptor::simple(item.id(), item.label(), def.resource_type, PROVIDER))
        .collect()
}

/// List every item of `def` across all pages
pub async fn collect_items<T: ListItem>(
    factory: &ClientFactory,
    def: &ResourceDef,
) -> Result<Vec<T>> {
    let client = factory.client(def.service);
    let client = &client;
    let collection = def.collection;
    let page_size = def.page_size();

    collect_all_pages(move |page_token| async move {
        client
            .list_page::<T>(collection, page_size, page_token.as_deref())
            .await
    })
    .await
}

async fn generate<T: ListItem>(
    factory: &ClientFactory,
    def: &ResourceDef,
) -> Result<Vec<ResourceDescriptor>> {
    let items = collect_items::<T>(factory, def).await?;
    Ok(create_resources(def, &items))
}

/// Enumerate one resource kind
pub async fn init_resources(
    factory: &ClientFactory,
    def: &ResourceDef,
) -> Result<Vec<ResourceDescriptor>> {
    tracing::info!("Listing {}", def.display_name);

    let resources = match def.kind {
        ResourceKind::ServiceAccount => generate::<ServiceAccount>(factory, def).await,
        ResourceKind::ApiKey => generate::<ApiKey>(factory, def).await,
        ResourceKind::Environment => generate::<Environment>(factory, def).await,
    }
    .with_context(|| format!("error reading {}", def.display_name))?;

    tracing::info!("Found {} {}", resources.len(), def.display_name);
    Ok(resources)
}

/// Enumerate several resource kinds, one after another
pub async fn init_all_resources(
    factory: &ClientFactory,
    defs: &[&ResourceDef],
) -> Result<Vec<ResourceDescriptor>> {
    let mut all = Vec::new();
    for def in defs {
        all.extend(init_resources(factory, def).await?);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confluent::pagination::ListPage;
    use crate::resource::registry::get_resource;
    use serde_json::json;

    #[test]
    fn test_service_accounts_map_to_display_name() {
        let items: Vec<ServiceAccount> = serde_json::from_value(json!([
            {"id": "sa-111", "display_name": "ci-bot", "description": "CI"},
            {"id": "sa-222", "display_name": "etl"}
        ]))
        .unwrap();

        let def = get_resource("service_account").unwrap();
        let resources = create_resources(def, &items);

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id(), "sa-111");
        assert_eq!(resources[0].label(), "ci-bot");
        assert_eq!(resources[1].label(), "etl");
        assert!(resources
            .iter()
            .all(|r| r.resource_type() == "confluent_service_account" && r.provider() == "confluent"));
        assert!(resources.iter().all(|r| r.dependencies().is_empty()));
    }

    #[test]
    fn test_api_keys_map_to_owner_id() {
        let items: Vec<ApiKey> = serde_json::from_value(json!([
            {
                "id": "ABCDEFGH",
                "spec": {
                    "display_name": "deploy key",
                    "owner": {"id": "sa-111", "kind": "ServiceAccount"},
                    "resource": {"id": "lkc-1", "kind": "Cluster"}
                }
            },
            {"id": "ORPHAN01"}
        ]))
        .unwrap();

        let def = get_resource("api_key").unwrap();
        let resources = create_resources(def, &items);

        assert_eq!(resources[0].label(), "sa-111");
        assert_eq!(resources[0].resource_type(), "confluent_api_key");
        assert_eq!(resources[1].id(), "ORPHAN01");
        assert_eq!(resources[1].label(), "");
    }

    #[test]
    fn test_environments_map_to_display_name() {
        let items: Vec<Environment> =
            serde_json::from_value(json!([{"id": "env-a1", "display_name": "prod"}])).unwrap();
        let def = get_resource("environment").unwrap();
        let resources = create_resources(def, &items);
        assert_eq!(resources[0].label(), "prod");
        assert_eq!(resources[0].resource_type(), "confluent_environment");
    }

    #[test]
    fn test_null_fields_are_tolerated() {
        let sa_page: ListPage<ServiceAccount> = serde_json::from_str(
            r#"{"data":[{"id":"sa-1","display_name":"ci","description":null},{"id":"sa-2","display_name":null}]}"#,
        )
        .unwrap();
        let def = get_resource("service_account").unwrap();
        let resources = create_resources(def, &sa_page.data);
        assert_eq!(resources[0].label(), "ci");
        assert_eq!(resources[1].label(), "");

        let key_page: ListPage<ApiKey> = serde_json::from_str(
            r#"{"data":[
                {"id":"K1","spec":{"display_name":null,"owner":{"id":"sa-1","kind":null},"resource":null}},
                {"id":"K2","spec":{"owner":null}},
                {"id":"K3","spec":null},
                {"id":"K4","spec":{"owner":{"id":null}}}
            ],"metadata":{"next":null,"total_size":null}}"#,
        )
        .unwrap();
        let def = get_resource("api_key").unwrap();
        let labels: Vec<String> = create_resources(def, &key_page.data)
            .iter()
            .map(|r| r.label().to_string())
            .collect();
        assert_eq!(labels, vec!["sa-1", "", "", ""]);
    }

    #[test]
    fn test_no_items_no_resources() {
        let def = get_resource("service_account").unwrap();
        assert!(create_resources::<ServiceAccount>(def, &[]).is_empty());
    }
}
