//! Snapshot builders
//!
//! Each view a client can subscribe to maps to one builder. A builder reads
//! the cluster through a [`ResourceClient`] and produces a serializable
//! document; it keeps no state between calls, so the stream loop simply
//! invokes it again on every tick.

pub mod cluster_queues;
pub mod cohorts;
pub mod dashboard;
pub mod local_queues;
pub mod resource_flavors;
pub mod status;
pub mod workloads;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::FetchResult;
use crate::kube::ResourceClient;
use crate::models::Conventions;

pub use cluster_queues::{ClusterQueueDetail, ClusterQueueSummary, QueueUsage};
pub use cohorts::{CohortDetail, CohortSummary};
pub use dashboard::Dashboard;
pub use local_queues::LocalQueueSummary;
pub use resource_flavors::{ResourceFlavorDetail, ResourceFlavorSummary};
pub use status::KueueStatus;
pub use workloads::{
    Preemption, WorkloadDocument, WorkloadList, WorkloadSummary, WorkloadsDashboard,
};

/// A subscribable view and its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    ClusterQueues,
    ClusterQueue { name: String },
    ResourceFlavors,
    ResourceFlavor { name: String },
    Workloads,
    Workload { namespace: String, name: String },
    WorkloadEvents { namespace: String, name: String },
    Dashboard,
    WorkloadsDashboard,
    LocalQueues,
    LocalQueue { namespace: String, name: String },
    LocalQueueWorkloads { namespace: String, name: String },
    Cohorts,
    Cohort { name: String },
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::ClusterQueues => write!(f, "cluster-queues"),
            View::ClusterQueue { name } => write!(f, "cluster-queue/{}", name),
            View::ResourceFlavors => write!(f, "resource-flavors"),
            View::ResourceFlavor { name } => write!(f, "resource-flavor/{}", name),
            View::Workloads => write!(f, "workloads"),
            View::Workload { namespace, name } => write!(f, "workload/{}/{}", namespace, name),
            View::WorkloadEvents { namespace, name } => {
                write!(f, "workload/{}/{}/events", namespace, name)
            }
            View::Dashboard => write!(f, "dashboard"),
            View::WorkloadsDashboard => write!(f, "workloads/dashboard"),
            View::LocalQueues => write!(f, "local-queues"),
            View::LocalQueue { namespace, name } => {
                write!(f, "local-queue/{}/{}", namespace, name)
            }
            View::LocalQueueWorkloads { namespace, name } => {
                write!(f, "local-queue/{}/{}/workloads", namespace, name)
            }
            View::Cohorts => write!(f, "cohorts"),
            View::Cohort { name } => write!(f, "cohort/{}", name),
        }
    }
}

/// Output of one builder invocation, serialized as the bare document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    ClusterQueues(Vec<ClusterQueueSummary>),
    ClusterQueue(ClusterQueueDetail),
    ResourceFlavors(Vec<ResourceFlavorSummary>),
    ResourceFlavor(ResourceFlavorDetail),
    Workloads(WorkloadList),
    Workload(WorkloadDocument),
    Events(Vec<Value>),
    Dashboard(Dashboard),
    WorkloadsDashboard(WorkloadsDashboard),
    LocalQueues(Vec<LocalQueueSummary>),
    LocalQueue(Value),
    LocalQueueWorkloads(Vec<WorkloadDocument>),
    Cohorts(Vec<CohortSummary>),
    Cohort(CohortDetail),
}

impl View {
    /// Run the builder for this view once
    pub async fn build(
        &self,
        client: &dyn ResourceClient,
        conventions: &Conventions,
    ) -> FetchResult<Snapshot> {
        let snapshot = match self {
            View::ClusterQueues => {
                Snapshot::ClusterQueues(cluster_queues::list_cluster_queues(client).await?)
            }
            View::ClusterQueue { name } => {
                Snapshot::ClusterQueue(cluster_queues::cluster_queue_detail(client, name).await?)
            }
            View::ResourceFlavors => {
                Snapshot::ResourceFlavors(resource_flavors::list_resource_flavors(client).await?)
            }
            View::ResourceFlavor { name } => Snapshot::ResourceFlavor(
                resource_flavors::resource_flavor_detail(client, conventions, name).await?,
            ),
            View::Workloads => Snapshot::Workloads(workloads::list_workloads(client).await?),
            View::Workload { namespace, name } => {
                Snapshot::Workload(workloads::workload_detail(client, namespace, name).await?)
            }
            View::WorkloadEvents { namespace, name } => {
                Snapshot::Events(workloads::workload_events(client, namespace, name).await?)
            }
            View::Dashboard => {
                Snapshot::Dashboard(dashboard::build_dashboard(client, conventions).await?)
            }
            View::WorkloadsDashboard => Snapshot::WorkloadsDashboard(
                workloads::workloads_dashboard(client, conventions).await?,
            ),
            View::LocalQueues => {
                Snapshot::LocalQueues(local_queues::list_local_queues(client).await?)
            }
            View::LocalQueue { namespace, name } => Snapshot::LocalQueue(
                local_queues::local_queue_detail(client, namespace, name).await?,
            ),
            View::LocalQueueWorkloads { namespace, name } => Snapshot::LocalQueueWorkloads(
                local_queues::local_queue_workloads(client, namespace, name).await?,
            ),
            View::Cohorts => Snapshot::Cohorts(cohorts::list_cohorts(client).await?),
            View::Cohort { name } => Snapshot::Cohort(cohorts::cohort_detail(client, name).await?),
        };

        Ok(snapshot)
    }
}
