//! Cohort views
//!
//! Cohorts are not objects of their own here. They are derived by grouping
//! ClusterQueues on spec.cohort.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::FetchResult;
use crate::kube::{ListQuery, ResourceClient};
use crate::models::{Resource, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub name: String,
    pub cluster_queues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortMember {
    pub name: String,
    pub spec: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortDetail {
    pub name: String,
    pub cluster_queues: Vec<CohortMember>,
}

/// Group queue names by cohort, both sorted. Queues without a cohort are left out.
pub fn group_by_cohort(queues: &[Resource]) -> BTreeMap<String, Vec<String>> {
    let mut cohorts: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for queue in queues {
        let Some(cohort) = queue.str_at(&["spec", "cohort"]).filter(|c| !c.is_empty()) else {
            continue;
        };
        cohorts
            .entry(cohort.to_string())
            .or_default()
            .push(queue.name().unwrap_or_default().to_string());
    }
    for members in cohorts.values_mut() {
        members.sort();
    }
    cohorts
}

pub async fn list_cohorts(client: &dyn ResourceClient) -> FetchResult<Vec<CohortSummary>> {
    let queues = client
        .list(&ListQuery::all(ResourceKind::ClusterQueue))
        .await
        .map_err(|e| e.context("error fetching cluster queues"))?;

    Ok(group_by_cohort(&queues)
        .into_iter()
        .map(|(name, cluster_queues)| CohortSummary {
            name,
            cluster_queues,
        })
        .collect())
}

/// Members of one cohort with their specs
///
/// An unknown cohort yields an empty member list rather than an error.
pub async fn cohort_detail(client: &dyn ResourceClient, name: &str) -> FetchResult<CohortDetail> {
    let queues = client
        .list(&ListQuery::all(ResourceKind::ClusterQueue))
        .await
        .map_err(|e| e.context("error fetching cluster queues"))?;

    let mut cluster_queues: Vec<CohortMember> = queues
        .iter()
        .filter(|queue| queue.str_at(&["spec", "cohort"]) == Some(name))
        .map(|queue| CohortMember {
            name: queue.name().unwrap_or_default().to_string(),
            spec: queue.path(&["spec"]).cloned().unwrap_or(Value::Null),
        })
        .collect();
    cluster_queues.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(CohortDetail {
        name: name.to_string(),
        cluster_queues,
    })
}
