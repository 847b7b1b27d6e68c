/// Feature vector: `[scaled popularity, category code]`.
pub(crate) type Point = [f64; 2];

/// Result of one k-means run after empty clusters were dropped.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct KMeansFit {
    /// Compacted labels in `0..centroids.len()`.
    pub labels: Vec<usize>,
    pub centroids: Vec<Point>,
    pub iterations: usize,
}

pub(crate) fn squared_distance(a: &Point, b: &Point) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Deterministic farthest-first seeding. The first point seeds cluster 0;
/// each further seed is the point farthest from every chosen seed, the
/// lowest index winning ties.
pub(crate) fn farthest_first(points: &[Point], k: usize) -> Vec<Point> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let mut chosen = vec![0usize];
    let mut nearest: Vec<f64> = points.iter().map(|p| squared_distance(p, first)).collect();
    while chosen.len() < k.min(points.len()) {
        let mut best: Option<(usize, f64)> = None;
        for (idx, distance) in nearest.iter().enumerate() {
            if chosen.contains(&idx) {
                continue;
            }
            if best.is_none_or(|(_, best_distance)| *distance > best_distance) {
                best = Some((idx, *distance));
            }
        }
        let Some((idx, _)) = best else {
            break;
        };
        chosen.push(idx);
        for (slot, point) in nearest.iter_mut().zip(points.iter()) {
            *slot = slot.min(squared_distance(point, &points[idx]));
        }
    }
    chosen.into_iter().map(|idx| points[idx]).collect()
}

/// Lloyd iterations from farthest-first seeds until assignments settle or
/// `max_iterations` is reached.
pub(crate) fn kmeans(points: &[Point], k: usize, max_iterations: usize) -> KMeansFit {
    let mut centroids = farthest_first(points, k);
    if centroids.is_empty() {
        return KMeansFit {
            labels: Vec::new(),
            centroids,
            iterations: 0,
        };
    }
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;
        if !assign(points, &centroids, &mut labels) {
            break;
        }
        update_centroids(points, &labels, &mut centroids);
    }
    let (labels, centroids) = compact(labels, centroids);
    KMeansFit {
        labels,
        centroids,
        iterations,
    }
}

/// Nearest centroid per point (lowest index on ties). Returns whether any
/// label changed.
fn assign(points: &[Point], centroids: &[Point], labels: &mut [usize]) -> bool {
    let mut changed = false;
    for (point, label) in points.iter().zip(labels.iter_mut()) {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (idx, centroid) in centroids.iter().enumerate() {
            let distance = squared_distance(point, centroid);
            if distance < best_distance {
                best = idx;
                best_distance = distance;
            }
        }
        if *label != best {
            *label = best;
            changed = true;
        }
    }
    changed
}

/// Move each centroid to its members' mean; empty clusters keep their centroid.
fn update_centroids(points: &[Point], labels: &[usize], centroids: &mut [Point]) {
    let mut sums = vec![[0.0f64; 2]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];
    for (point, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        for (sum, value) in sums[label].iter_mut().zip(point) {
            *sum += value;
        }
    }
    for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
        if count > 0 {
            *centroid = [sum[0] / count as f64, sum[1] / count as f64];
        }
    }
}

/// Drop clusters nobody joined and renumber the rest in index order.
fn compact(labels: Vec<usize>, centroids: Vec<Point>) -> (Vec<usize>, Vec<Point>) {
    let mut used = vec![false; centroids.len()];
    for &label in &labels {
        used[label] = true;
    }
    let mut remap = vec![usize::MAX; centroids.len()];
    let mut kept = Vec::new();
    for (idx, centroid) in centroids.into_iter().enumerate() {
        if used[idx] {
            remap[idx] = kept.len();
            kept.push(centroid);
        }
    }
    let labels = labels.into_iter().map(|label| remap[label]).collect();
    (labels, kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(values: &[f64]) -> Vec<Point> {
        values.iter().map(|v| [*v, 0.0]).collect()
    }

    #[test]
    fn seeds_pick_the_farthest_points() {
        let seeds = farthest_first(&line(&[0.0, 0.1, 1.0, 0.5]), 3);
        assert_eq!(seeds, vec![[0.0, 0.0], [1.0, 0.0], [0.5, 0.0]]);
    }

    #[test]
    fn separates_an_outlier() {
        let mut values = vec![0.0; 11];
        values.push(1.0);
        let fit = kmeans(&line(&values), 2, 100);
        assert_eq!(fit.centroids.len(), 2);
        assert!(fit.labels[..11].iter().all(|label| *label == 0));
        assert_eq!(fit.labels[11], 1);
    }

    #[test]
    fn duplicate_points_compact_empty_clusters() {
        let fit = kmeans(&line(&[0.3, 0.3, 0.3]), 3, 100);
        assert_eq!(fit.centroids.len(), 1);
        assert_eq!(fit.labels, vec![0, 0, 0]);
    }

    #[test]
    fn lloyd_moves_centroids_to_means() {
        let fit = kmeans(&line(&[0.0, 0.2, 0.9, 1.0]), 2, 100);
        assert_eq!(fit.labels, vec![0, 0, 1, 1]);
        assert!((fit.centroids[0][0] - 0.1).abs() < 1e-9);
        assert!((fit.centroids[1][0] - 0.95).abs() < 1e-9);
    }

    #[test]
    fn no_points_no_fit() {
        let fit = kmeans(&[], 3, 100);
        assert!(fit.labels.is_empty());
        assert!(fit.centroids.is_empty());
    }
}
