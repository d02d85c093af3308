//! Resource kind definitions
//!
//! Centralizes the Kubernetes and Kueue kinds the dashboard reads so that
//! group/version/plural strings are not scattered across the builders.

use std::fmt;

use kube::core::{ApiResource, GroupVersionKind};

/// API group of the Kueue CRDs
pub const KUEUE_API_GROUP: &str = "kueue.x-k8s.io";

/// Kueue API version used unless configured otherwise
pub const DEFAULT_KUEUE_API_VERSION: &str = "v1beta1";

/// Enumeration of every resource kind the snapshot builders fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    // Kueue resources
    ClusterQueue,
    LocalQueue,
    ResourceFlavor,
    Workload,
    // Core resources
    Node,
    Pod,
    Event,
}

impl ResourceKind {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::ClusterQueue => "ClusterQueue",
            ResourceKind::LocalQueue => "LocalQueue",
            ResourceKind::ResourceFlavor => "ResourceFlavor",
            ResourceKind::Workload => "Workload",
            ResourceKind::Node => "Node",
            ResourceKind::Pod => "Pod",
            ResourceKind::Event => "Event",
        }
    }

    /// Get all resource kinds
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::ClusterQueue,
            ResourceKind::LocalQueue,
            ResourceKind::ResourceFlavor,
            ResourceKind::Workload,
            ResourceKind::Node,
            ResourceKind::Pod,
            ResourceKind::Event,
        ]
    }

    /// True for the Kueue CRDs, false for core kinds
    pub fn is_kueue(&self) -> bool {
        matches!(
            self,
            ResourceKind::ClusterQueue
                | ResourceKind::LocalQueue
                | ResourceKind::ResourceFlavor
                | ResourceKind::Workload
        )
    }

    /// True if objects of this kind live inside a namespace
    pub fn is_namespaced(&self) -> bool {
        matches!(
            self,
            ResourceKind::LocalQueue
                | ResourceKind::Workload
                | ResourceKind::Pod
                | ResourceKind::Event
        )
    }

    /// API group, empty for the core group
    pub fn api_group(&self) -> &'static str {
        if self.is_kueue() { KUEUE_API_GROUP } else { "" }
    }

    /// Lower-case plural used in API paths
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::ClusterQueue => "clusterqueues",
            ResourceKind::LocalQueue => "localqueues",
            ResourceKind::ResourceFlavor => "resourceflavors",
            ResourceKind::Workload => "workloads",
            ResourceKind::Node => "nodes",
            ResourceKind::Pod => "pods",
            ResourceKind::Event => "events",
        }
    }

    /// Build the dynamic ApiResource for this kind
    ///
    /// Core kinds are always `v1`; Kueue kinds use `kueue_version`.
    pub fn api_resource(&self, kueue_version: &str) -> ApiResource {
        let version = if self.is_kueue() { kueue_version } else { "v1" };
        let gvk = GroupVersionKind::gvk(self.api_group(), version, self.as_str());
        ApiResource::from_gvk_with_plural(&gvk, self.plural())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
