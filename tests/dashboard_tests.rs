//! Composite dashboard tests

mod common;

use common::{FakeCluster, cluster_queue, local_queue, pod, resource_flavor, workload};
use kueue_viz::{Conventions, ResourceKind, View};
use serde_json::json;

fn dashboard_cluster() -> FakeCluster {
    FakeCluster::new()
        .with(ResourceKind::ResourceFlavor, resource_flavor("default"))
        .with(
            ResourceKind::ClusterQueue,
            cluster_queue("cq-a", Some("team-x"), &["default"]),
        )
        .with(ResourceKind::LocalQueue, local_queue("team-a", "lq-1", "cq-a"))
        .with(
            ResourceKind::Workload,
            workload("team-a", "wl-1", "lq-1", Some("job-1")),
        )
        .with(ResourceKind::Pod, pod("team-a", "wl-1-abc", "job-1", "Running"))
}

#[tokio::test]
async fn test_dashboard_key_set() {
    let cluster = dashboard_cluster();
    let snapshot = View::Dashboard
        .build(&cluster, &Conventions::default())
        .await
        .unwrap();

    let frame = serde_json::to_string(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
    let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["clusterQueues", "flavors", "queues", "workloads"]);

    assert_eq!(value["flavors"][0]["name"], "default");
    assert_eq!(value["clusterQueues"][0]["flavors"], json!(["default"]));
    assert_eq!(value["queues"][0]["name"], "lq-1");
    assert_eq!(value["workloads"][0]["pods"]["wl-1-abc"]["status"]["phase"], "Running");
}

#[tokio::test]
async fn test_failed_sections_degrade_to_empty() {
    let cluster = dashboard_cluster();
    cluster.fail_kind(ResourceKind::ClusterQueue);
    cluster.fail_kind(ResourceKind::Workload);

    let snapshot = View::Dashboard
        .build(&cluster, &Conventions::default())
        .await
        .unwrap();
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["clusterQueues"], json!([]));
    assert_eq!(value["workloads"], json!([]));
    assert_eq!(value["flavors"].as_array().unwrap().len(), 1);
    assert_eq!(value["queues"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_all_sections_failing_still_builds() {
    let cluster = dashboard_cluster();
    for kind in ResourceKind::all() {
        cluster.fail_kind(*kind);
    }

    let snapshot = View::Dashboard
        .build(&cluster, &Conventions::default())
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&snapshot).unwrap(),
        json!({ "flavors": [], "clusterQueues": [], "queues": [], "workloads": [] })
    );

    cluster.heal();
    let snapshot = View::Dashboard
        .build(&cluster, &Conventions::default())
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&snapshot).unwrap()["flavors"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
}
