//! Resource kind tests
//!
//! Ensures every kind resolves to the API coordinates the dynamic client needs.

use kueue_viz::ResourceKind;
use kueue_viz::models::resource_kind::DEFAULT_KUEUE_API_VERSION;

#[test]
fn test_kueue_kinds_use_configured_version() {
    for kind in ResourceKind::all().iter().filter(|k| k.is_kueue()) {
        let resource = kind.api_resource("v1beta2");
        assert_eq!(resource.group, "kueue.x-k8s.io");
        assert_eq!(resource.version, "v1beta2");
        assert_eq!(resource.api_version, "kueue.x-k8s.io/v1beta2");
        assert_eq!(resource.kind, kind.as_str());
        assert_eq!(resource.plural, kind.plural());
    }
}

#[test]
fn test_core_kinds_ignore_kueue_version() {
    for kind in [ResourceKind::Node, ResourceKind::Pod, ResourceKind::Event] {
        let resource = kind.api_resource(DEFAULT_KUEUE_API_VERSION);
        assert_eq!(resource.group, "");
        assert_eq!(resource.version, "v1");
        assert_eq!(resource.api_version, "v1");
    }
}

#[test]
fn test_scope() {
    let namespaced: Vec<_> = ResourceKind::all()
        .iter()
        .filter(|k| k.is_namespaced())
        .map(|k| k.as_str())
        .collect();
    assert_eq!(namespaced, vec!["LocalQueue", "Workload", "Pod", "Event"]);
}
