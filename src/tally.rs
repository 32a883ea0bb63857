/// Inspection-count reduction.
///
/// After all rounds complete, the answer is the product of the two
/// highest per-actor inspection counts — the "monkey business" level.

use crate::actor::ActorId;

/// Product of the two largest counts.
///
/// Ties sort stably, which cannot affect the product; unequal values at
/// the top-2 boundary are ordered by plain descending numeric sort.
/// Degenerate troops: a single actor yields its own count, an empty
/// troop yields 0.
pub fn monkey_business(inspections: &[u64]) -> u64 {
    let mut counts = inspections.to_vec();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    match counts.as_slice() {
        [] => 0,
        [only] => *only,
        [first, second, ..] => first * second,
    }
}

/// Counts paired with their actor ids, sorted by descending count
/// (ascending id among equals). Useful for reporting.
pub fn busiest(inspections: &[u64]) -> Vec<(ActorId, u64)> {
    let mut ranked: Vec<(ActorId, u64)> = inspections
        .iter()
        .copied()
        .enumerate()
        .map(|(i, count)| (ActorId::new(i), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_two_product() {
        assert_eq!(monkey_business(&[101, 95, 7, 105]), 101 * 105);
    }

    #[test]
    fn test_top_two_with_ties() {
        // Equal values at the boundary — the product is unaffected by
        // which of them sorts first.
        assert_eq!(monkey_business(&[4, 9, 9, 2]), 81);
    }

    #[test]
    fn test_single_actor() {
        assert_eq!(monkey_business(&[42]), 42);
    }

    #[test]
    fn test_empty_troop() {
        assert_eq!(monkey_business(&[]), 0);
    }

    #[test]
    fn test_large_counts_fit_u64() {
        assert_eq!(monkey_business(&[52166, 47830, 1938, 52013]), 2_713_310_158);
    }

    #[test]
    fn test_busiest_ordering() {
        let ranked = busiest(&[7, 105, 95, 101]);
        let ids: Vec<usize> = ranked.iter().map(|(id, _)| id.index()).collect();
        assert_eq!(ids, vec![1, 3, 2, 0]);
        assert_eq!(ranked[0], (ActorId::new(1), 105));
    }

    #[test]
    fn test_busiest_breaks_ties_by_id() {
        let ranked = busiest(&[5, 9, 9]);
        assert_eq!(ranked[0].0, ActorId::new(1));
        assert_eq!(ranked[1].0, ActorId::new(2));
        assert_eq!(ranked[2].0, ActorId::new(0));
    }
}
