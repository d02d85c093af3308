//! ResourceFlavor views
//!
//! The detail view joins three collections: the flavor itself, the
//! ClusterQueues whose resource groups name it, and the Nodes labelled as
//! eligible for it.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FetchResult;
use crate::kube::{ListQuery, ObjectRef, ResourceClient};
use crate::models::{Conventions, Resource, ResourceKind};

/// One row of the flavor list: the full object plus `name` and `details`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceFlavorSummary {
    #[serde(flatten)]
    pub object: Map<String, Value>,
    pub name: String,
    pub details: Value,
}

impl ResourceFlavorSummary {
    pub fn from_resource(flavor: Resource) -> Self {
        let name = flavor.name().unwrap_or_default().to_string();
        let details = flavor.path(&["spec"]).cloned().unwrap_or(Value::Null);
        let mut object = flavor.into_object();
        object.remove("name");
        object.remove("details");

        Self {
            object,
            name,
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuota {
    pub resource: Value,
    pub nominal_quota: Value,
}

/// Quotas a single ClusterQueue grants under one flavor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorQueueQuota {
    pub queue_name: String,
    pub quota: Vec<ResourceQuota>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlavorNode {
    pub name: String,
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceFlavorDetail {
    #[serde(flatten)]
    pub object: Map<String, Value>,
    pub name: String,
    pub details: Value,
    pub queues: Vec<FlavorQueueQuota>,
    pub nodes: Vec<FlavorNode>,
}

/// Quotas `queue` assigns to `flavor`, across every resource group naming it
///
/// Returns `None` when no group references the flavor.
pub fn queue_quota_for_flavor(queue: &Resource, flavor: &str) -> Option<FlavorQueueQuota> {
    let mut referenced = false;
    let mut quota = Vec::new();

    let groups = queue.array_at(&["spec", "resourceGroups"]).unwrap_or_default();
    let flavors = groups
        .iter()
        .filter_map(|group| group.get("flavors").and_then(Value::as_array))
        .flatten()
        .filter(|f| f.get("name").and_then(Value::as_str) == Some(flavor));

    for entry in flavors {
        referenced = true;
        let resources = entry
            .get("resources")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for resource in resources.iter().filter(|r| r.is_object()) {
            quota.push(ResourceQuota {
                resource: resource.get("name").cloned().unwrap_or(Value::Null),
                nominal_quota: resource.get("nominalQuota").cloned().unwrap_or(Value::Null),
            });
        }
    }

    referenced.then(|| FlavorQueueQuota {
        queue_name: queue.name().unwrap_or_default().to_string(),
        quota,
    })
}

pub async fn list_resource_flavors(
    client: &dyn ResourceClient,
) -> FetchResult<Vec<ResourceFlavorSummary>> {
    let flavors = client
        .list(&ListQuery::all(ResourceKind::ResourceFlavor))
        .await
        .map_err(|e| e.context("error fetching resource flavors"))?;

    Ok(flavors
        .into_iter()
        .map(ResourceFlavorSummary::from_resource)
        .collect())
}

/// Fetch one flavor with the queues using it and the nodes eligible for it
pub async fn resource_flavor_detail(
    client: &dyn ResourceClient,
    conventions: &Conventions,
    name: &str,
) -> FetchResult<ResourceFlavorDetail> {
    let flavor = client
        .get(&ObjectRef::cluster(ResourceKind::ResourceFlavor, name))
        .await
        .map_err(|e| e.context(format!("error fetching resource flavor {}", name)))?;

    let cluster_queues = client
        .list(&ListQuery::all(ResourceKind::ClusterQueue))
        .await
        .map_err(|e| e.context(format!("error fetching queues using flavor {}", name)))?;

    let nodes = client
        .list(&ListQuery::all(ResourceKind::Node))
        .await
        .map_err(|e| e.context(format!("error fetching nodes for flavor {}", name)))?;

    let queues = cluster_queues
        .iter()
        .filter_map(|queue| queue_quota_for_flavor(queue, name))
        .collect();

    let nodes = nodes
        .iter()
        .filter(|node| conventions.node_matches_flavor(node, name))
        .map(|node| FlavorNode {
            name: node.name().unwrap_or_default().to_string(),
            labels: node.labels(),
        })
        .collect();

    let summary = ResourceFlavorSummary::from_resource(flavor);
    let mut object = summary.object;
    object.remove("queues");
    object.remove("nodes");

    Ok(ResourceFlavorDetail {
        object,
        name: summary.name,
        details: summary.details,
        queues,
        nodes,
    })
}
