//! Label conventions used to join resources that carry no direct reference
//!
//! Two joins depend on naming contracts with the cluster rather than on
//! object references:
//! - a Node is eligible for a ResourceFlavor when it carries the label key
//!   `flavor.<domain>/<flavor>`
//! - a Pod belongs to a Workload when its controller-uid label equals the
//!   Workload's job-uid label

use super::Resource;

/// Default domain used when building flavor node labels
pub const DEFAULT_FLAVOR_LABEL_DOMAIN: &str = "kueue.x-k8s.io";

/// Label set by Kueue on a Workload, holding the UID of the owning job
pub const DEFAULT_JOB_UID_LABEL: &str = "kueue.x-k8s.io/job-uid";

/// Label set by the job controller on every Pod it creates
pub const DEFAULT_POD_CONTROLLER_UID_LABEL: &str = "controller-uid";

/// Resolved label conventions for one running server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    pub flavor_label_domain: String,
    pub job_uid_label: String,
    pub pod_controller_uid_label: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            flavor_label_domain: DEFAULT_FLAVOR_LABEL_DOMAIN.to_string(),
            job_uid_label: DEFAULT_JOB_UID_LABEL.to_string(),
            pod_controller_uid_label: DEFAULT_POD_CONTROLLER_UID_LABEL.to_string(),
        }
    }
}

impl Conventions {
    /// Label key whose presence marks a node as eligible for `flavor`
    pub fn flavor_node_label(&self, flavor: &str) -> String {
        format!("flavor.{}/{}", self.flavor_label_domain, flavor)
    }

    pub fn node_matches_flavor(&self, node: &Resource, flavor: &str) -> bool {
        node.has_label(&self.flavor_node_label(flavor))
    }

    /// Job-correlation value of a workload, if it has one
    pub fn workload_job_uid<'a>(&self, workload: &'a Resource) -> Option<&'a str> {
        workload
            .label(&self.job_uid_label)
            .filter(|uid| !uid.is_empty())
    }

    /// True if the pod's controller-uid label equals `job_uid` exactly
    pub fn pod_belongs_to_job(&self, pod: &Resource, job_uid: &str) -> bool {
        pod.label(&self.pod_controller_uid_label) == Some(job_uid)
    }
}
