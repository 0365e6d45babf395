use protea::{EmbeddingVector, KMeansClusterer, KMeansConfig, ProteaError};

fn vectors(data: &[(&str, Vec<f32>)]) -> Vec<EmbeddingVector> {
    data.iter()
        .map(|(id, v)| EmbeddingVector::new(*id, v.clone()))
        .collect()
}

#[test]
fn test_k_at_least_item_count_gives_singletons() {
    let input = vectors(&[
        ("a", vec![1.0, 0.0]),
        ("b", vec![0.0, 1.0]),
        ("c", vec![0.7, 0.7]),
    ]);
    let clusterer = KMeansClusterer::new(KMeansConfig::new(3));
    let groups = clusterer.cluster(&input).unwrap();

    assert_eq!(groups.len(), 3);
    for group in &groups {
        assert_eq!(group.pattern_ids.len(), 1);
        assert_eq!(group.average_intra_cluster_similarity, 1.0);
        assert_eq!(group.most_representative_pattern, group.pattern_ids[0]);
    }
}

#[test]
fn test_fixed_seed_reproduces_partition() {
    let input = vectors(&[
        ("a1", vec![1.0, 0.0, 0.0]),
        ("a2", vec![0.95, 0.05, 0.0]),
        ("a3", vec![0.9, 0.0, 0.1]),
        ("b1", vec![0.0, 1.0, 0.0]),
        ("b2", vec![0.0, 0.95, 0.05]),
        ("c1", vec![0.0, 0.0, 1.0]),
    ]);
    let clusterer = KMeansClusterer::new(KMeansConfig::new(3).with_seed(99));
    let first = clusterer.cluster(&input).unwrap();
    let second = clusterer.cluster(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_groups_partition_the_input() {
    let input = vectors(&[
        ("a", vec![1.0, 0.0]),
        ("b", vec![0.9, 0.1]),
        ("c", vec![0.0, 1.0]),
        ("d", vec![0.1, 0.9]),
        ("e", vec![0.6, 0.4]),
    ]);
    let clusterer = KMeansClusterer::new(KMeansConfig::new(2).with_seed(5));
    let groups = clusterer.cluster(&input).unwrap();

    let mut seen: Vec<&str> = groups
        .iter()
        .flat_map(|g| g.pattern_ids.iter().map(|id| id.as_str()))
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);

    for group in &groups {
        // The representative is always one of the members.
        assert!(group.pattern_ids.contains(&group.most_representative_pattern));
        assert_eq!(group.centroid.len(), 2);
        assert!(group.average_intra_cluster_similarity <= 1.0);
    }
}

#[test]
fn test_identical_vectors_cluster_tightly() {
    let input = vectors(&[
        ("a", vec![1.0, 0.0]),
        ("b", vec![1.0, 0.0]),
        ("c", vec![1.0, 0.0]),
        ("d", vec![1.0, 0.0]),
    ]);
    let clusterer = KMeansClusterer::new(KMeansConfig::new(1).with_seed(0));
    let groups = clusterer.cluster(&input).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].pattern_ids.len(), 4);
    assert_eq!(groups[0].average_intra_cluster_similarity, 1.0);
}

#[test]
fn test_invalid_inputs() {
    let clusterer = KMeansClusterer::new(KMeansConfig::new(0));
    assert!(matches!(
        clusterer.cluster(&vectors(&[("a", vec![1.0])])),
        Err(ProteaError::InvalidArgument(_))
    ));

    let clusterer = KMeansClusterer::new(KMeansConfig::new(2));
    assert!(matches!(
        clusterer.cluster(&[]),
        Err(ProteaError::InsufficientEmbeddings(_))
    ));

    let mixed = vectors(&[("a", vec![1.0, 0.0]), ("b", vec![1.0, 0.0, 0.0]), ("c", vec![1.0, 0.0])]);
    assert!(matches!(
        clusterer.cluster(&mixed),
        Err(ProteaError::DimensionMismatch { .. })
    ));
}
