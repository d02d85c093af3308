//! LocalQueue views

use serde::Serialize;
use serde_json::Value;

use crate::error::FetchResult;
use crate::kube::{ListQuery, ObjectRef, ResourceClient};
use crate::models::{Resource, ResourceKind};

use super::workloads::WorkloadDocument;

/// True if the LocalQueue's spec.clusterQueue names `cluster_queue`
pub fn references_cluster_queue(local_queue: &Resource, cluster_queue: &str) -> bool {
    local_queue.str_at(&["spec", "clusterQueue"]) == Some(cluster_queue)
}

/// One row of the local-queue list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalQueueSummary {
    pub name: String,
    pub namespace: String,
    pub cluster_queue: Option<String>,
    pub admitted_workloads: i64,
    pub pending_workloads: i64,
    pub reserving_workloads: i64,
    pub reservation: Value,
    pub usage: Value,
}

impl LocalQueueSummary {
    pub fn from_resource(queue: &Resource) -> Self {
        let counter = |field: &str| queue.i64_at(&["status", field]).unwrap_or(0);
        let status_field = |field: &str| {
            queue
                .path(&["status", field])
                .cloned()
                .unwrap_or(Value::Null)
        };

        Self {
            name: queue.name().unwrap_or_default().to_string(),
            namespace: queue.namespace().unwrap_or_default().to_string(),
            cluster_queue: queue.str_at(&["spec", "clusterQueue"]).map(str::to_string),
            admitted_workloads: counter("admittedWorkloads"),
            pending_workloads: counter("pendingWorkloads"),
            reserving_workloads: counter("reservingWorkloads"),
            reservation: status_field("flavorsReservation"),
            usage: status_field("flavorUsage"),
        }
    }
}

/// List all LocalQueues across namespaces
pub async fn list_local_queues(client: &dyn ResourceClient) -> FetchResult<Vec<LocalQueueSummary>> {
    let queues = client
        .list(&ListQuery::all(ResourceKind::LocalQueue))
        .await
        .map_err(|e| e.context("error fetching local queues"))?;

    Ok(queues.iter().map(LocalQueueSummary::from_resource).collect())
}

/// Fetch one LocalQueue as stored in the cluster
pub async fn local_queue_detail(
    client: &dyn ResourceClient,
    namespace: &str,
    name: &str,
) -> FetchResult<Value> {
    let queue = client
        .get(&ObjectRef::namespaced(ResourceKind::LocalQueue, namespace, name))
        .await
        .map_err(|e| e.context(format!("error fetching local queue {}/{}", namespace, name)))?;

    Ok(queue.into_value())
}

/// Workloads in `namespace` submitted to the LocalQueue `name`
pub async fn local_queue_workloads(
    client: &dyn ResourceClient,
    namespace: &str,
    name: &str,
) -> FetchResult<Vec<WorkloadDocument>> {
    let workloads = client
        .list(&ListQuery::all(ResourceKind::Workload).in_namespace(namespace))
        .await
        .map_err(|e| e.context(format!("error fetching workloads in namespace {}", namespace)))?;

    Ok(workloads
        .into_iter()
        .filter(|wl| wl.str_at(&["spec", "queueName"]) == Some(name))
        .map(WorkloadDocument::from_resource)
        .collect())
}
