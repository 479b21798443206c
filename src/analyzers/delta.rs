//! Before/after percentage-point deltas between snapshots.

use crate::analyzers::types::{DeltaRow, Snapshot};
use crate::survey::sentiment::Sentiment;

/// Percentage-point change per category: post minus pre. Snapshots always
/// carry all four categories, so no side is ever "missing".
pub fn delta(pre: &Snapshot, post: &Snapshot) -> DeltaRow {
    let mut points = [0.0f64; 4];
    for (i, point) in points.iter_mut().enumerate() {
        *point = post.percentages[i] - pre.percentages[i];
    }
    DeltaRow { points }
}

/// Presentation hint: whether a delta reads as improvement for its category,
/// `None` when the share did not move. Direction policy lives in
/// [`Sentiment::improves_when_rising`].
pub fn is_improvement(category: Sentiment, delta_points: f64) -> Option<bool> {
    if delta_points == 0.0 {
        None
    } else {
        Some((delta_points > 0.0) == category.improves_when_rising())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(counts: [usize; 4], total_rows: usize) -> Snapshot {
        let percentages = counts.map(|c| crate::analyzers::aggregate::pct(c, total_rows));
        Snapshot {
            counts,
            percentages,
            total_rows,
        }
    }

    #[test]
    fn delta_is_post_minus_pre() {
        let pre = snapshot([0, 0, 3, 0], 10); // Bom 30%
        let post = snapshot([0, 0, 5, 0], 10); // Bom 50%
        let d = delta(&pre, &post);
        assert!((d.point(Sentiment::Bom) - 20.0).abs() < 1e-9);
        assert_eq!(d.point(Sentiment::Ruim), 0.0);
    }

    #[test]
    fn delta_is_antisymmetric() {
        let a = snapshot([1, 2, 3, 4], 10);
        let b = snapshot([4, 3, 2, 1], 10);
        let forward = delta(&a, &b);
        let backward = delta(&b, &a);
        for i in 0..4 {
            assert!((forward.points[i] + backward.points[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_sides_compare_as_zero() {
        let empty = snapshot([0, 0, 0, 0], 0);
        let post = snapshot([0, 0, 0, 2], 4); // Ótimo 50%
        let d = delta(&empty, &post);
        assert_eq!(d.point(Sentiment::Otimo), 50.0);
    }

    #[test]
    fn improvement_hint_follows_direction_policy() {
        assert_eq!(is_improvement(Sentiment::Ruim, -10.0), Some(true));
        assert_eq!(is_improvement(Sentiment::Ruim, 10.0), Some(false));
        assert_eq!(is_improvement(Sentiment::Regular, 10.0), Some(false));
        assert_eq!(is_improvement(Sentiment::Bom, 10.0), Some(true));
        assert_eq!(is_improvement(Sentiment::Otimo, -10.0), Some(false));
        assert_eq!(is_improvement(Sentiment::Bom, 0.0), None);
    }
}
