use super::kmeans::{Point, squared_distance};

/// Mean silhouette coefficient over all points.
///
/// Items alone in their cluster score 0. Returns `None` unless at least two
/// clusters are populated.
pub(crate) fn silhouette_score(points: &[Point], labels: &[usize]) -> Option<f64> {
    let clusters = labels.iter().copied().max().map_or(0, |max| max + 1);
    let mut sizes = vec![0usize; clusters];
    for &label in labels {
        sizes[label] += 1;
    }
    if sizes.iter().filter(|size| **size > 0).count() < 2 {
        return None;
    }

    let mut total = 0.0;
    for (idx, point) in points.iter().enumerate() {
        let own = labels[idx];
        if sizes[own] <= 1 {
            continue;
        }
        let mut sums = vec![0.0f64; clusters];
        for (other_idx, other) in points.iter().enumerate() {
            if other_idx != idx {
                sums[labels[other_idx]] += squared_distance(point, other).sqrt();
            }
        }
        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = sums
            .iter()
            .zip(&sizes)
            .enumerate()
            .filter(|(label, (_, size))| *label != own && **size > 0)
            .map(|(_, (sum, size))| sum / *size as f64)
            .fold(f64::INFINITY, f64::min);
        let spread = a.max(b);
        if spread > 0.0 {
            total += (b - a) / spread;
        }
    }
    Some(total / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_separated_clusters_score_near_one() {
        let points = vec![[0.0, 0.0], [0.01, 0.0], [1.0, 0.0], [0.99, 0.0]];
        let score = silhouette_score(&points, &[0, 0, 1, 1]).expect("score");
        assert!(score > 0.95);
    }

    #[test]
    fn single_cluster_has_no_score() {
        let points = vec![[0.0, 0.0], [1.0, 0.0]];
        assert_eq!(silhouette_score(&points, &[0, 0]), None);
        assert_eq!(silhouette_score(&[], &[]), None);
    }

    #[test]
    fn singletons_contribute_zero() {
        let points = vec![[0.0, 0.0], [0.0, 0.0], [1.0, 0.0]];
        // the pair scores 1 each, the singleton 0
        let score = silhouette_score(&points, &[0, 0, 1]).expect("score");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }
}
