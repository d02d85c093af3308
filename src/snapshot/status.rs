//! One-shot status document served over plain HTTP

use serde::Serialize;

use crate::error::FetchResult;
use crate::kube::ResourceClient;

use super::local_queues::{LocalQueueSummary, list_local_queues};
use super::workloads::{WorkloadItems, list_workloads};

/// Local queues and workloads in one response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KueueStatus {
    pub queues: Vec<LocalQueueSummary>,
    pub workloads: WorkloadItems,
}

/// Both lists are required; either failing fails the whole status
pub async fn kueue_status(client: &dyn ResourceClient) -> FetchResult<KueueStatus> {
    let (queues, workloads) = tokio::try_join!(list_local_queues(client), list_workloads(client))?;

    Ok(KueueStatus {
        queues,
        workloads: workloads.workloads,
    })
}
