//! Greedy single-pass clustering of a population.

use crate::compute::EngineError;
use crate::schema::{Cluster, Individual};

use super::diversity::distance_between;

/// Partition `population` into clusters of similar individuals.
///
/// Individuals are visited in population order. Each joins the first
/// existing cluster (in creation order) holding a member strictly closer than
/// `threshold`, or starts a new cluster. The partition depends on population
/// order: reordering the same individuals can group them differently.
pub fn clusterize_population(
    population: &[Individual],
    threshold: f64,
) -> Result<Vec<Cluster>, EngineError> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for (index, candidate) in population.iter().enumerate() {
        let mut home = None;
        'clusters: for (c, cluster) in clusters.iter().enumerate() {
            for &member in &cluster.members {
                if distance_between(&population[member], candidate)? < threshold {
                    home = Some(c);
                    break 'clusters;
                }
            }
        }

        match home {
            Some(c) => clusters[c].members.push(index),
            None => clusters.push(Cluster::singleton(index)),
        }
    }

    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::PointRng;
    use crate::compute::evolution::initialize_population;
    use crate::schema::{CoordinateBounds, Point};
    use proptest::prelude::*;

    fn at(x: f64) -> Individual {
        Individual::new([Point::new(x, 0.0)])
    }

    #[test]
    fn test_groups_nearby_individuals() {
        let population = vec![at(0.0), at(50.0), at(1.0), at(51.0), at(100.0)];
        let clusters = clusterize_population(&population, 5.0).unwrap();

        assert_eq!(
            clusters,
            vec![
                Cluster {
                    members: vec![0, 2]
                },
                Cluster {
                    members: vec![1, 3]
                },
                Cluster::singleton(4),
            ]
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        let population = vec![at(0.0), at(5.0)];
        let clusters = clusterize_population(&population, 5.0).unwrap();
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_chains_through_any_member() {
        // 8 is too far from 0 but close to 4, which already joined 0.
        let population = vec![at(0.0), at(4.0), at(8.0)];
        let clusters = clusterize_population(&population, 5.0).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members, vec![0, 1, 2]);
    }

    #[test]
    fn test_order_dependent() {
        let bridged = vec![at(0.0), at(4.0), at(8.0)];
        assert_eq!(clusterize_population(&bridged, 5.0).unwrap().len(), 1);

        // Same individuals, but 8 is placed before the bridging 4 arrives.
        let split = vec![at(0.0), at(8.0), at(4.0)];
        let clusters = clusterize_population(&split, 5.0).unwrap();
        assert_eq!(
            clusters,
            vec![
                Cluster {
                    members: vec![0, 2]
                },
                Cluster::singleton(1),
            ]
        );
    }

    #[test]
    fn test_degenerate_thresholds() {
        let population = vec![at(0.0), at(30.0), at(60.0)];
        assert_eq!(clusterize_population(&population, 1e9).unwrap().len(), 1);
        assert_eq!(clusterize_population(&population, 0.0).unwrap().len(), 3);
        assert!(clusterize_population(&[], 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_mismatched_individuals_rejected() {
        let population = vec![at(0.0), Individual::new([Point::new(0.0, 0.0); 2])];
        assert!(matches!(
            clusterize_population(&population, 1.0),
            Err(EngineError::MismatchedPointCount { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_clusters_partition_population(
            seed: u64,
            size in 0usize..30,
            threshold in 0.0f64..80.0,
        ) {
            let mut rng = PointRng::new(seed);
            let bounds = CoordinateBounds::default();
            let population = initialize_population(&mut rng, size, 3, bounds).unwrap();

            let clusters = clusterize_population(&population, threshold).unwrap();
            let mut seen: Vec<usize> = clusters
                .iter()
                .flat_map(|c| c.members.iter().copied())
                .collect();
            seen.sort_unstable();

            prop_assert!(clusters.iter().all(|c| !c.is_empty()));
            prop_assert_eq!(seen, (0..size).collect::<Vec<_>>());
        }
    }
}
