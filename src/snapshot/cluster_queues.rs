//! ClusterQueue views: the flattened list and the per-queue detail with its
//! attached LocalQueues.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FetchError, FetchResult};
use crate::kube::{ListQuery, ObjectRef, ResourceClient};
use crate::models::{Resource, ResourceKind};

use super::local_queues::references_cluster_queue;

/// One row of the cluster-queue list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterQueueSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,
    pub resource_groups: Vec<Value>,
    pub admitted_workloads: i64,
    pub pending_workloads: i64,
    pub reserving_workloads: i64,
    pub flavors: Vec<String>,
}

impl ClusterQueueSummary {
    /// Project a ClusterQueue, defaulting anything absent or malformed
    pub fn from_resource(queue: &Resource) -> Self {
        let resource_groups = queue
            .array_at(&["spec", "resourceGroups"])
            .map(<[Value]>::to_vec)
            .unwrap_or_default();
        let flavors = flavor_names(&resource_groups);
        let counter = |field: &str| queue.i64_at(&["status", field]).unwrap_or(0);

        Self {
            name: queue.name().unwrap_or_default().to_string(),
            cohort: queue.str_at(&["spec", "cohort"]).map(str::to_string),
            admitted_workloads: counter("admittedWorkloads"),
            pending_workloads: counter("pendingWorkloads"),
            reserving_workloads: counter("reservingWorkloads"),
            resource_groups,
            flavors,
        }
    }
}

/// Flatten resourceGroups[].flavors[].name into one ordered list
///
/// Entries that are not objects or have no string name are skipped.
pub fn flavor_names(resource_groups: &[Value]) -> Vec<String> {
    resource_groups
        .iter()
        .filter_map(|group| group.get("flavors").and_then(Value::as_array))
        .flatten()
        .filter_map(|flavor| flavor.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// A LocalQueue attached to a ClusterQueue detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueUsage {
    pub namespace: String,
    pub name: String,
    pub reservation: Value,
    pub usage: Value,
}

impl QueueUsage {
    pub fn from_resource(local_queue: &Resource) -> Self {
        Self {
            namespace: local_queue.namespace().unwrap_or_default().to_string(),
            name: local_queue.name().unwrap_or_default().to_string(),
            reservation: local_queue
                .path(&["status", "flavorsReservation"])
                .cloned()
                .unwrap_or(Value::Null),
            usage: local_queue
                .path(&["status", "flavorUsage"])
                .cloned()
                .unwrap_or(Value::Null),
        }
    }
}

/// The ClusterQueue document with the LocalQueues pointing at it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterQueueDetail {
    #[serde(flatten)]
    pub object: Map<String, Value>,
    pub queues: Vec<QueueUsage>,
}

/// List all ClusterQueues for the overview table
pub async fn list_cluster_queues(
    client: &dyn ResourceClient,
) -> FetchResult<Vec<ClusterQueueSummary>> {
    let queues = client
        .list(&ListQuery::all(ResourceKind::ClusterQueue))
        .await
        .map_err(|e| e.context("error fetching cluster queues"))?;

    Ok(queues.iter().map(ClusterQueueSummary::from_resource).collect())
}

/// Fetch one ClusterQueue and attach the LocalQueues that reference it
///
/// Fails if the queue itself or the LocalQueue list cannot be fetched.
pub async fn cluster_queue_detail(
    client: &dyn ResourceClient,
    name: &str,
) -> FetchResult<ClusterQueueDetail> {
    let queue = client
        .get(&ObjectRef::cluster(ResourceKind::ClusterQueue, name))
        .await
        .map_err(|e| e.context(format!("error fetching cluster queue {}", name)))?;

    let local_queues = client
        .list(&ListQuery::all(ResourceKind::LocalQueue))
        .await
        .map_err(|e: FetchError| e.context("error fetching local queues"))?;

    let queues = local_queues
        .iter()
        .filter(|lq| references_cluster_queue(lq, name))
        .map(QueueUsage::from_resource)
        .collect();

    let mut object = queue.into_object();
    object.remove("queues");

    Ok(ClusterQueueDetail { object, queues })
}
