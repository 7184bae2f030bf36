//! Top-N selection over a probability vector.

use std::cmp::Ordering;

/// Indices of the `top_n` highest probabilities, best first.
///
/// ## Algorithm
/// 1. Stable ascending sort of class indices by probability
/// 2. Take the last `top_n` entries
/// 3. Reverse them
///
/// Because the sort is stable and the tail is reversed, equal probabilities
/// come out with the **higher** class index first. `top_n` past the number
/// of classes clamps; `top_n == 0` selects nothing.
///
/// `f64::total_cmp` gives NaN a fixed place above every number, so a NaN
/// probability ranks first instead of making the sort order undefined.
pub fn top_n_indices(probabilities: &[f64], top_n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..probabilities.len()).collect();
    order.sort_by(|&a, &b| ascending(probabilities[a], probabilities[b]));
    order.into_iter().rev().take(top_n).collect()
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_descending() {
        let probs = [0.1, 0.5, 0.05, 0.35];
        assert_eq!(top_n_indices(&probs, 3), vec![1, 3, 0]);
    }

    #[test]
    fn test_clamps_to_class_count() {
        let probs = [0.2, 0.8];
        assert_eq!(top_n_indices(&probs, 10), vec![1, 0]);
    }

    #[test]
    fn test_zero_selects_nothing() {
        assert!(top_n_indices(&[0.3, 0.7], 0).is_empty());
    }

    #[test]
    fn test_ties_surface_higher_index_first() {
        let probs = [0.25, 0.25, 0.25, 0.25];
        assert_eq!(top_n_indices(&probs, 3), vec![3, 2, 1]);

        let probs = [0.4, 0.1, 0.4, 0.1];
        assert_eq!(top_n_indices(&probs, 4), vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_empty_vector() {
        assert!(top_n_indices(&[], 3).is_empty());
    }

    #[test]
    fn test_nan_does_not_panic() {
        let probs = [0.2, f64::NAN, 0.7];
        let top = top_n_indices(&probs, 3);
        assert_eq!(top, vec![1, 2, 0]);
    }
}
