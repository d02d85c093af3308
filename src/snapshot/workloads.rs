//! Workload views and the workload/pod aggregation
//!
//! Pods carry no reference to the Workload that admitted them. They are
//! joined through labels: the Workload's job-uid label must equal the Pod's
//! controller-uid label, and only pods in the Workload's namespace count.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FetchResult;
use crate::kube::{ListQuery, ObjectRef, ResourceClient};
use crate::models::{Conventions, Resource, ResourceKind};

/// Reason reported when a workload has not been preempted
pub const NO_PREEMPTION_REASON: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preemption {
    pub preempted: bool,
    pub reason: String,
}

impl Preemption {
    pub fn from_workload(workload: &Resource) -> Self {
        Self {
            preempted: workload.bool_at(&["status", "preempted"]).unwrap_or(false),
            reason: workload
                .str_at(&["status", "preemptionReason"])
                .unwrap_or(NO_PREEMPTION_REASON)
                .to_string(),
        }
    }
}

/// A raw Workload with its preemption block attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadDocument {
    #[serde(flatten)]
    pub object: Map<String, Value>,
    pub preemption: Preemption,
}

impl WorkloadDocument {
    pub fn from_resource(workload: Resource) -> Self {
        let preemption = Preemption::from_workload(&workload);
        let mut object = workload.into_object();
        object.remove("preemption");
        Self { object, preemption }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadItems {
    pub items: Vec<WorkloadDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadList {
    pub workloads: WorkloadItems,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodSummary {
    pub name: String,
    pub status: Value,
}

/// One workload of the aggregation, with the pods running for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadSummary {
    pub name: String,
    pub namespace: String,
    pub uid: String,
    /// Keyed by pod name; serializes as `{}` when empty
    pub pods: BTreeMap<String, PodSummary>,
    pub preemption: Preemption,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadsDashboard {
    pub items: Vec<WorkloadSummary>,
    pub workloads_by_uid: BTreeMap<String, String>,
}

pub async fn list_workloads(client: &dyn ResourceClient) -> FetchResult<WorkloadList> {
    let workloads = client
        .list(&ListQuery::all(ResourceKind::Workload))
        .await
        .map_err(|e| e.context("error fetching workloads"))?;

    Ok(WorkloadList {
        workloads: WorkloadItems {
            items: workloads
                .into_iter()
                .map(WorkloadDocument::from_resource)
                .collect(),
        },
    })
}

pub async fn workload_detail(
    client: &dyn ResourceClient,
    namespace: &str,
    name: &str,
) -> FetchResult<WorkloadDocument> {
    let workload = client
        .get(&ObjectRef::namespaced(ResourceKind::Workload, namespace, name))
        .await
        .map_err(|e| e.context(format!("error fetching workload {}/{}", namespace, name)))?;

    Ok(WorkloadDocument::from_resource(workload))
}

/// Events whose involved object is named `name` in `namespace`
pub async fn workload_events(
    client: &dyn ResourceClient,
    namespace: &str,
    name: &str,
) -> FetchResult<Vec<Value>> {
    let query = ListQuery::all(ResourceKind::Event)
        .in_namespace(namespace)
        .with_field_selector(format!("involvedObject.name={}", name));

    let events = client
        .list(&query)
        .await
        .map_err(|e| {
            e.context(format!(
                "error fetching events for workload {}/{}",
                namespace, name
            ))
        })?;

    Ok(events.into_iter().map(Resource::into_value).collect())
}

/// Pods among `pods` that belong to `workload`, keyed by pod name
///
/// A workload without a job-uid label owns no pods.
pub fn pods_for_workload(
    workload: &Resource,
    pods: &[Resource],
    conventions: &Conventions,
) -> BTreeMap<String, PodSummary> {
    let Some(job_uid) = conventions.workload_job_uid(workload) else {
        return BTreeMap::new();
    };

    pods.iter()
        .filter(|pod| conventions.pod_belongs_to_job(pod, job_uid))
        .filter_map(|pod| {
            let name = pod.name()?.to_string();
            let status = pod.path(&["status"]).cloned().unwrap_or(Value::Null);
            Some((name.clone(), PodSummary { name, status }))
        })
        .collect()
}

/// List pods once per namespace, concurrently
///
/// Namespaces whose listing fails are absent from the result.
async fn pods_by_namespace(
    client: &dyn ResourceClient,
    namespaces: BTreeSet<String>,
) -> HashMap<String, Vec<Resource>> {
    let lists = namespaces.into_iter().map(|namespace| async move {
        let result = client
            .list(&ListQuery::all(ResourceKind::Pod).in_namespace(namespace.as_str()))
            .await;
        (namespace, result)
    });

    join_all(lists)
        .await
        .into_iter()
        .filter_map(|(namespace, result)| match result {
            Ok(pods) => Some((namespace, pods)),
            Err(e) => {
                tracing::warn!(
                    namespace = %namespace,
                    error = %e,
                    "Failed to list pods, workloads shown without pods"
                );
                None
            }
        })
        .collect()
}

/// Join workloads with their pods
///
/// Fails only if the workload list itself cannot be fetched.
pub async fn aggregate_workloads(
    client: &dyn ResourceClient,
    conventions: &Conventions,
) -> FetchResult<Vec<WorkloadSummary>> {
    let workloads = client
        .list(&ListQuery::all(ResourceKind::Workload))
        .await
        .map_err(|e| e.context("error fetching workloads"))?;

    let namespaces: BTreeSet<String> = workloads
        .iter()
        .filter_map(|wl| wl.namespace().map(str::to_string))
        .collect();
    tracing::debug!(
        workloads = workloads.len(),
        namespaces = namespaces.len(),
        "Aggregating workload pods"
    );

    let pods = pods_by_namespace(client, namespaces).await;

    Ok(workloads
        .iter()
        .map(|workload| {
            let namespace = workload.namespace().unwrap_or_default();
            let namespace_pods = pods.get(namespace).map(Vec::as_slice).unwrap_or_default();
            WorkloadSummary {
                name: workload.name().unwrap_or_default().to_string(),
                namespace: namespace.to_string(),
                uid: workload.uid().unwrap_or_default().to_string(),
                pods: pods_for_workload(workload, namespace_pods, conventions),
                preemption: Preemption::from_workload(workload),
            }
        })
        .collect())
}

pub async fn workloads_dashboard(
    client: &dyn ResourceClient,
    conventions: &Conventions,
) -> FetchResult<WorkloadsDashboard> {
    let items = aggregate_workloads(client, conventions).await?;
    let workloads_by_uid = items
        .iter()
        .filter(|wl| !wl.uid.is_empty())
        .map(|wl| (wl.uid.clone(), wl.name.clone()))
        .collect();

    Ok(WorkloadsDashboard {
        items,
        workloads_by_uid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::kube::MockResourceClient;
    use serde_json::json;

    fn workload(name: &str, namespace: &str, job_uid: Option<&str>) -> Resource {
        let labels = match job_uid {
            Some(uid) => json!({ "kueue.x-k8s.io/job-uid": uid }),
            None => json!({}),
        };
        Resource::new(json!({
            "metadata": {
                "name": name,
                "namespace": namespace,
                "uid": format!("uid-{}", name),
                "labels": labels
            }
        }))
    }

    fn pod(name: &str, controller_uid: &str) -> Resource {
        Resource::new(json!({
            "metadata": { "name": name, "labels": { "controller-uid": controller_uid } },
            "status": { "phase": "Running" }
        }))
    }

    #[test]
    fn test_preemption_defaults() {
        let preemption = Preemption::from_workload(&Resource::new(json!({})));
        assert!(!preemption.preempted);
        assert_eq!(preemption.reason, "None");

        let preempted = Preemption::from_workload(&Resource::new(json!({
            "status": { "preempted": true, "preemptionReason": "InClusterQueue" }
        })));
        assert!(preempted.preempted);
        assert_eq!(preempted.reason, "InClusterQueue");
    }

    #[test]
    fn test_pods_for_workload_exact_match() {
        let pods = vec![pod("p-1", "job-1"), pod("p-2", "job-2"), pod("p-3", "job-1")];
        let matched = pods_for_workload(
            &workload("wl-1", "team-a", Some("job-1")),
            &pods,
            &Conventions::default(),
        );
        assert_eq!(matched.keys().collect::<Vec<_>>(), vec!["p-1", "p-3"]);
        assert_eq!(matched["p-1"].status["phase"], "Running");
    }

    #[test]
    fn test_pods_for_unlabelled_workload_is_empty() {
        let pods = vec![pod("p-1", ""), pod("p-2", "job-2")];
        let conventions = Conventions::default();
        let unlabelled = workload("wl-1", "team-a", None);
        assert!(pods_for_workload(&unlabelled, &pods, &conventions).is_empty());
        let empty_label = workload("wl-1", "team-a", Some(""));
        assert!(pods_for_workload(&empty_label, &pods, &conventions).is_empty());
    }

    #[test]
    fn test_empty_pods_serialize_as_object() {
        let summary = WorkloadSummary {
            name: "wl-1".to_string(),
            namespace: "team-a".to_string(),
            uid: "uid-wl-1".to_string(),
            pods: BTreeMap::new(),
            preemption: Preemption::from_workload(&Resource::new(json!({}))),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["pods"], json!({}));
    }

    #[tokio::test]
    async fn test_events_use_field_selector() {
        let mut client = MockResourceClient::new();
        client
            .expect_list()
            .withf(|query| {
                query.kind == ResourceKind::Event
                    && query.namespace.as_deref() == Some("team-a")
                    && query.field_selector.as_deref() == Some("involvedObject.name=wl-1")
            })
            .times(1)
            .returning(|_| Ok(vec![]));

        let events = workload_events(&client, "team-a", "wl-1").await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_pod_list_failure_degrades_namespace_only() {
        let mut client = MockResourceClient::new();
        client
            .expect_list()
            .withf(|query| query.kind == ResourceKind::Workload)
            .returning(|_| {
                Ok(vec![
                    workload("wl-a", "team-a", Some("job-a")),
                    workload("wl-b", "team-b", Some("job-b")),
                ])
            });
        client
            .expect_list()
            .withf(|query| {
                query.kind == ResourceKind::Pod && query.namespace.as_deref() == Some("team-a")
            })
            .times(1)
            .returning(|_| Err(FetchError::request("Pod list", "forbidden")));
        client
            .expect_list()
            .withf(|query| {
                query.kind == ResourceKind::Pod && query.namespace.as_deref() == Some("team-b")
            })
            .times(1)
            .returning(|_| Ok(vec![pod("p-b", "job-b")]));

        let items = aggregate_workloads(&client, &Conventions::default())
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].pods.is_empty());
        assert_eq!(items[1].pods.len(), 1);
    }
}
