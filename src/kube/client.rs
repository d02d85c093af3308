//! Resource client facade
//!
//! Snapshot builders never talk to `kube::Api` directly. They go through the
//! [`ResourceClient`] trait so they can be exercised against in-memory data,
//! and so the same client can be shared by every connection task.

use std::fmt;

use async_trait::async_trait;
use kube::Api;
use kube::api::ListParams;
use kube::core::DynamicObject;

use crate::error::{FetchError, FetchResult};
use crate::models::{Resource, ResourceKind};

/// Parameters for listing one resource collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub kind: ResourceKind,
    /// Restrict to one namespace; `None` lists cluster-wide
    pub namespace: Option<String>,
    /// Server-side field selector, e.g. `involvedObject.name=wl-1`
    pub field_selector: Option<String>,
}

impl ListQuery {
    pub fn all(kind: ResourceKind) -> Self {
        Self {
            kind,
            namespace: None,
            field_selector: None,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_field_selector(mut self, selector: impl Into<String>) -> Self {
        self.field_selector = Some(selector.into());
        self
    }
}

impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} list", self.kind)?;
        if let Some(ns) = &self.namespace {
            write!(f, " in namespace {}", ns)?;
        }
        if let Some(selector) = &self.field_selector {
            write!(f, " ({})", selector)?;
        }
        Ok(())
    }
}

/// Reference to a single named object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub kind: ResourceKind,
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectRef {
    pub fn cluster(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: None,
            name: name.into(),
        }
    }

    pub fn namespaced(
        kind: ResourceKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{} {}/{}", self.kind, ns, self.name),
            None => write!(f, "{} {}", self.kind, self.name),
        }
    }
}

/// Read-only access to cluster resource collections
///
/// Implementations must be safe to share between connection tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// List a collection, preserving the server's ordering
    async fn list(&self, query: &ListQuery) -> FetchResult<Vec<Resource>>;

    /// Fetch one object by name
    async fn get(&self, target: &ObjectRef) -> FetchResult<Resource>;
}

/// [`ResourceClient`] backed by the Kubernetes dynamic API
#[derive(Clone)]
pub struct KubeResourceClient {
    client: kube::Client,
    kueue_version: String,
}

impl KubeResourceClient {
    pub fn new(client: kube::Client, kueue_version: impl Into<String>) -> Self {
        Self {
            client,
            kueue_version: kueue_version.into(),
        }
    }

    fn api(&self, kind: ResourceKind, namespace: Option<&str>) -> Api<DynamicObject> {
        let api_resource = kind.api_resource(&self.kueue_version);
        match namespace {
            Some(ns) if kind.is_namespaced() => {
                Api::namespaced_with(self.client.clone(), ns, &api_resource)
            }
            _ => Api::all_with(self.client.clone(), &api_resource),
        }
    }

    fn to_resource(obj: &DynamicObject, kind: ResourceKind) -> FetchResult<Resource> {
        serde_json::to_value(obj)
            .map(Resource::new)
            .map_err(|e| FetchError::Malformed {
                what: kind.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ResourceClient for KubeResourceClient {
    async fn list(&self, query: &ListQuery) -> FetchResult<Vec<Resource>> {
        let api = self.api(query.kind, query.namespace.as_deref());
        let mut params = ListParams::default();
        if let Some(selector) = &query.field_selector {
            params = params.fields(selector);
        }

        tracing::debug!("Listing {}", query);
        let objects = api
            .list(&params)
            .await
            .map_err(|e| FetchError::request(query.to_string(), e))?;

        objects
            .items
            .iter()
            .map(|obj| Self::to_resource(obj, query.kind))
            .collect()
    }

    async fn get(&self, target: &ObjectRef) -> FetchResult<Resource> {
        let api = self.api(target.kind, target.namespace.as_deref());

        tracing::debug!("Fetching {}", target);
        match api.get_opt(&target.name).await {
            Ok(Some(obj)) => Self::to_resource(&obj, target.kind),
            Ok(None) => Err(FetchError::NotFound(target.to_string())),
            Err(e) => Err(FetchError::request(target.to_string(), e)),
        }
    }
}
