//! Shared fixtures for integration tests
//!
//! [`FakeCluster`] is an in-memory [`ResourceClient`] holding raw objects per
//! kind. Lists can be made to fail per kind (and optionally per namespace) to
//! exercise degraded paths.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use kueue_viz::kube::{ListQuery, ObjectRef, ResourceClient};
use kueue_viz::models::resource::lookup;
use kueue_viz::{FetchError, FetchResult, Resource, ResourceKind};

#[derive(Default)]
pub struct FakeCluster {
    objects: Mutex<Vec<(ResourceKind, Value)>>,
    failing: Mutex<HashSet<(ResourceKind, Option<String>)>>,
    calls: AtomicUsize,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, kind: ResourceKind, object: Value) -> Self {
        self.insert(kind, object);
        self
    }

    pub fn insert(&self, kind: ResourceKind, object: Value) {
        self.objects.lock().unwrap().push((kind, object));
    }

    /// Replace the object of `kind` with the same namespace and name
    pub fn replace(&self, kind: ResourceKind, object: Value) {
        let mut objects = self.objects.lock().unwrap();
        let key = identity(&object);
        objects.retain(|(k, o)| !(*k == kind && identity(o) == key));
        objects.push((kind, object));
    }

    /// Make every list of `kind` fail
    pub fn fail_kind(&self, kind: ResourceKind) {
        self.failing.lock().unwrap().insert((kind, None));
    }

    /// Make lists of `kind` scoped to `namespace` fail
    pub fn fail_namespace(&self, kind: ResourceKind, namespace: &str) {
        self.failing
            .lock()
            .unwrap()
            .insert((kind, Some(namespace.to_string())));
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// Total list and get calls served
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn is_failing(&self, kind: ResourceKind, namespace: Option<&str>) -> bool {
        let failing = self.failing.lock().unwrap();
        failing.contains(&(kind, None))
            || namespace.is_some_and(|ns| failing.contains(&(kind, Some(ns.to_string()))))
    }
}

fn identity(object: &Value) -> (Option<String>, Option<String>) {
    let field = |key: &str| {
        lookup(object, &["metadata", key])
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    (field("namespace"), field("name"))
}

/// Match a single `a.b=c` field selector
fn matches_selector(object: &Value, selector: &str) -> bool {
    let Some((path, expected)) = selector.split_once('=') else {
        return false;
    };
    let path: Vec<&str> = path.split('.').collect();
    lookup(object, &path).and_then(Value::as_str) == Some(expected)
}

#[async_trait]
impl ResourceClient for FakeCluster {
    async fn list(&self, query: &ListQuery) -> FetchResult<Vec<Resource>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.is_failing(query.kind, query.namespace.as_deref()) {
            return Err(FetchError::request(query.to_string(), "injected failure"));
        }

        let objects = self.objects.lock().unwrap();
        Ok(objects
            .iter()
            .filter(|(kind, _)| *kind == query.kind)
            .filter(|(_, object)| match &query.namespace {
                Some(ns) => identity(object).0.as_deref() == Some(ns.as_str()),
                None => true,
            })
            .filter(|(_, object)| match &query.field_selector {
                Some(selector) => matches_selector(object, selector),
                None => true,
            })
            .map(|(_, object)| Resource::new(object.clone()))
            .collect())
    }

    async fn get(&self, target: &ObjectRef) -> FetchResult<Resource> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.is_failing(target.kind, target.namespace.as_deref()) {
            return Err(FetchError::request(target.to_string(), "injected failure"));
        }

        let objects = self.objects.lock().unwrap();
        objects
            .iter()
            .find(|(kind, object)| {
                *kind == target.kind
                    && identity(object) == (target.namespace.clone(), Some(target.name.clone()))
            })
            .map(|(_, object)| Resource::new(object.clone()))
            .ok_or_else(|| FetchError::NotFound(target.to_string()))
    }
}

pub fn cluster_queue(name: &str, cohort: Option<&str>, flavors: &[&str]) -> Value {
    let mut spec = json!({
        "namespaceSelector": {},
        "resourceGroups": [{
            "coveredResources": ["cpu", "memory"],
            "flavors": flavors.iter().map(|f| json!({
                "name": f,
                "resources": [
                    { "name": "cpu", "nominalQuota": 9 },
                    { "name": "memory", "nominalQuota": "36Gi" }
                ]
            })).collect::<Vec<_>>()
        }]
    });
    if let Some(cohort) = cohort {
        spec["cohort"] = json!(cohort);
    }
    json!({
        "apiVersion": "kueue.x-k8s.io/v1beta1",
        "kind": "ClusterQueue",
        "metadata": { "name": name, "uid": format!("uid-{}", name) },
        "spec": spec
    })
}

pub fn local_queue(namespace: &str, name: &str, cluster_queue: &str) -> Value {
    json!({
        "apiVersion": "kueue.x-k8s.io/v1beta1",
        "kind": "LocalQueue",
        "metadata": { "name": name, "namespace": namespace },
        "spec": { "clusterQueue": cluster_queue },
        "status": {
            "admittedWorkloads": 1,
            "pendingWorkloads": 2,
            "reservingWorkloads": 1,
            "flavorsReservation": [
                { "name": "default", "resources": [{ "name": "cpu", "total": "1" }] }
            ],
            "flavorUsage": [
                { "name": "default", "resources": [{ "name": "cpu", "total": "1" }] }
            ]
        }
    })
}

pub fn resource_flavor(name: &str) -> Value {
    json!({
        "apiVersion": "kueue.x-k8s.io/v1beta1",
        "kind": "ResourceFlavor",
        "metadata": { "name": name },
        "spec": { "nodeLabels": { "instance-type": name } }
    })
}

pub fn node(name: &str, labels: Value) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Node",
        "metadata": { "name": name, "labels": labels }
    })
}

pub fn workload(namespace: &str, name: &str, queue: &str, job_uid: Option<&str>) -> Value {
    let labels = match job_uid {
        Some(uid) => json!({ "kueue.x-k8s.io/job-uid": uid }),
        None => json!({}),
    };
    json!({
        "apiVersion": "kueue.x-k8s.io/v1beta1",
        "kind": "Workload",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{}", name),
            "labels": labels
        },
        "spec": { "queueName": queue }
    })
}

pub fn pod(namespace: &str, name: &str, controller_uid: &str, phase: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "labels": { "controller-uid": controller_uid }
        },
        "status": { "phase": phase }
    })
}

pub fn event(namespace: &str, name: &str, involved: &str, reason: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Event",
        "metadata": { "name": name, "namespace": namespace },
        "involvedObject": { "kind": "Workload", "name": involved },
        "reason": reason
    })
}
