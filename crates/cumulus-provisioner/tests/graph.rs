use cumulus_provisioner::DependencyGraph;
use cumulus_sdk::Urn;

fn urn(name: &str) -> Urn {
    Urn::new("dev", "proj", "t:index:T", name)
}

#[test]
fn empty_graph_resolves_to_empty() {
    let graph = DependencyGraph::new();
    assert!(graph.is_empty());
    assert!(graph.resolve_order().unwrap().is_empty());
}

#[test]
fn linear_chain_resolves_dependencies_first() {
    let mut graph = DependencyGraph::new();
    for name in ["subnet", "vpc", "rg"] {
        graph.add_resource(urn(name));
    }
    graph.add_dependency(&urn("vpc"), &urn("rg")).unwrap();
    graph.add_dependency(&urn("subnet"), &urn("vpc")).unwrap();
    graph.add_dependency(&urn("subnet"), &urn("rg")).unwrap();

    assert_eq!(graph.resolve_order().unwrap(), vec![urn("rg"), urn("vpc"), urn("subnet")]);
    assert_eq!(graph.destroy_order().unwrap(), vec![urn("subnet"), urn("vpc"), urn("rg")]);
}

#[test]
fn neighbors() {
    let mut graph = DependencyGraph::new();
    for name in ["rg", "vpc", "subnet"] {
        graph.add_resource(urn(name));
    }
    graph.add_dependency(&urn("vpc"), &urn("rg")).unwrap();
    graph.add_dependency(&urn("subnet"), &urn("rg")).unwrap();

    assert_eq!(graph.dependents_of(&urn("rg")), vec![urn("subnet"), urn("vpc")]);
    assert_eq!(graph.dependencies_of(&urn("vpc")), vec![urn("rg")]);
    assert!(graph.dependents_of(&urn("missing")).is_empty());
}

#[test]
fn dependency_on_unregistered_resource_fails() {
    let mut graph = DependencyGraph::new();
    graph.add_resource(urn("vpc"));
    let err = graph.add_dependency(&urn("vpc"), &urn("rg")).unwrap_err();
    assert!(err.to_string().contains("has not been registered"), "got: {err}");
}

#[test]
fn cycle_detection() {
    let mut graph = DependencyGraph::new();
    graph.add_resource(urn("a"));
    graph.add_resource(urn("b"));
    graph.add_dependency(&urn("a"), &urn("b")).unwrap();
    graph.add_dependency(&urn("b"), &urn("a")).unwrap();

    let err = graph.resolve_order().unwrap_err();
    assert!(err.to_string().contains("cyclic"), "got: {err}");
}

#[test]
fn adding_same_resource_twice_is_idempotent() {
    let mut graph = DependencyGraph::new();
    let first = graph.add_resource(urn("a"));
    let second = graph.add_resource(urn("a"));
    assert_eq!(first, second);
    assert_eq!(graph.len(), 1);
}
