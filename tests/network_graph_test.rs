use protea::{EmbeddingVector, MatrixOptions, NetworkGraph, NetworkOptions, SimilarityMatrix};

fn matrix_of(data: &[(&str, Vec<f32>)]) -> SimilarityMatrix {
    let vectors: Vec<EmbeddingVector> = data
        .iter()
        .map(|(id, v)| EmbeddingVector::new(*id, v.clone()))
        .collect();
    SimilarityMatrix::build(&vectors, MatrixOptions::default()).unwrap()
}

/// Two tight groups and one outlier.
fn clustered_matrix() -> SimilarityMatrix {
    matrix_of(&[
        ("a1", vec![1.0, 0.0, 0.0]),
        ("a2", vec![0.98, 0.02, 0.0]),
        ("a3", vec![0.95, 0.0, 0.05]),
        ("b1", vec![0.0, 1.0, 0.0]),
        ("b2", vec![0.0, 0.98, 0.02]),
        ("lone", vec![-0.5, -0.5, 0.7]),
    ])
}

#[test]
fn test_nodes_one_per_id() {
    let matrix = clustered_matrix();
    let graph = NetworkGraph::build(&matrix, &NetworkOptions::new().with_seed(1));
    assert_eq!(graph.nodes.len(), 6);
    assert!(graph.node("a1").is_some());
    assert!(graph.node("nope").is_none());
}

#[test]
fn test_edges_only_at_or_above_threshold() {
    let matrix = clustered_matrix();
    let options = NetworkOptions::new().with_edge_threshold(0.9).with_seed(1);
    let graph = NetworkGraph::build(&matrix, &options);

    assert!(!graph.edges.is_empty());
    for edge in &graph.edges {
        assert!(edge.weight >= 0.9);
    }
    // No cross-group edge survives a 0.9 threshold.
    for edge in &graph.edges {
        assert_eq!(&edge.source[..1], &edge.target[..1]);
    }
}

#[test]
fn test_max_edges_keeps_strongest() {
    let matrix = clustered_matrix();
    let unlimited = NetworkGraph::build(
        &matrix,
        &NetworkOptions::new().with_edge_threshold(0.9).with_seed(1),
    );
    let capped = NetworkGraph::build(
        &matrix,
        &NetworkOptions::new()
            .with_edge_threshold(0.9)
            .with_max_edges(1)
            .with_seed(1),
    );

    assert!(unlimited.edges.len() > 1);
    assert_eq!(capped.edges.len(), 1);

    let strongest = unlimited
        .edges
        .iter()
        .map(|e| e.weight)
        .fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(capped.edges[0].weight, strongest);
}

#[test]
fn test_tight_clusters_and_singletons() {
    let matrix = clustered_matrix();
    let options = NetworkOptions::new()
        .with_edge_threshold(0.5)
        .with_tight_threshold(0.9)
        .with_seed(1);
    let graph = NetworkGraph::build(&matrix, &options);

    // The two axis-aligned groups form distinct visual clusters.
    assert_eq!(graph.clusters.len(), 2);
    assert_ne!(graph.clusters[0].color, graph.clusters[1].color);

    // The outlier has no tight edges and belongs to no cluster.
    let lone = graph.node("lone").unwrap();
    assert!(lone.cluster.is_none());

    let a1 = graph.node("a1").unwrap();
    let a2 = graph.node("a2").unwrap();
    assert_eq!(a1.cluster, a2.cluster);
    assert_eq!(a1.color, a2.color);
}

#[test]
fn test_layout_stays_on_canvas_and_is_seeded() {
    let matrix = clustered_matrix();
    let options = NetworkOptions::new().with_canvas(300.0, 200.0).with_seed(77);

    let first = NetworkGraph::build(&matrix, &options);
    let second = NetworkGraph::build(&matrix, &options);
    assert_eq!(first, second);

    for node in &first.nodes {
        assert!((0.0..=300.0).contains(&node.x));
        assert!((0.0..=200.0).contains(&node.y));
    }
}

#[test]
fn test_all_below_threshold_yields_zero_edges() {
    let matrix = matrix_of(&[("a", vec![1.0, 0.0]), ("b", vec![0.0, 1.0])]);
    let graph = NetworkGraph::build(&matrix, &NetworkOptions::new().with_seed(1));

    assert_eq!(graph.nodes.len(), 2);
    assert!(graph.edges.is_empty());
    assert!(graph.clusters.is_empty());
}
