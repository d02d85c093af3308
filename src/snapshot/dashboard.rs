//! Composite dashboard: every list view in one frame

use serde::Serialize;

use crate::error::FetchResult;
use crate::kube::ResourceClient;
use crate::models::Conventions;

use super::cluster_queues::{ClusterQueueSummary, list_cluster_queues};
use super::local_queues::{LocalQueueSummary, list_local_queues};
use super::resource_flavors::{ResourceFlavorSummary, list_resource_flavors};
use super::workloads::{WorkloadSummary, aggregate_workloads};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub flavors: Vec<ResourceFlavorSummary>,
    pub cluster_queues: Vec<ClusterQueueSummary>,
    pub queues: Vec<LocalQueueSummary>,
    pub workloads: Vec<WorkloadSummary>,
}

fn or_empty<T>(section: &str, result: FetchResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(section, error = %e, "Dashboard section unavailable, sending empty list");
        Vec::new()
    })
}

/// Build all sections concurrently; a failed section degrades to `[]`
pub async fn build_dashboard(
    client: &dyn ResourceClient,
    conventions: &Conventions,
) -> FetchResult<Dashboard> {
    let (flavors, cluster_queues, queues, workloads) = tokio::join!(
        list_resource_flavors(client),
        list_cluster_queues(client),
        list_local_queues(client),
        aggregate_workloads(client, conventions),
    );

    Ok(Dashboard {
        flavors: or_empty("flavors", flavors),
        cluster_queues: or_empty("clusterQueues", cluster_queues),
        queues: or_empty("queues", queues),
        workloads: or_empty("workloads", workloads),
    })
}
