//! Size-balanced, order-preserving chunking.

use crate::errors::ChunkError;
use tracing::debug;

/// Partitions `(item, size)` pairs into groups whose aggregate size stays
/// at or below `target`, preserving input order.
///
/// Greedy bin filling: items are taken in order and the current group is
/// closed as soon as the next item would push it past `target`. An item
/// whose own size exceeds `target` occupies a group by itself; the bound
/// cannot hold for it.
///
/// The concatenation of the returned groups equals the input sequence.
pub fn chunk_by_size<T>(
    items: impl IntoIterator<Item = (T, u64)>,
    target: u64,
) -> Result<Vec<Vec<T>>, ChunkError> {
    if target == 0 {
        return Err(ChunkError::ZeroTargetSize);
    }

    let mut groups: Vec<Vec<T>> = Vec::new();
    let mut current: Vec<T> = Vec::new();
    let mut current_size: u64 = 0;

    for (item, size) in items {
        if !current.is_empty() && current_size.saturating_add(size) > target {
            groups.push(std::mem::take(&mut current));
            current_size = 0;
        }
        current.push(item);
        current_size = current_size.saturating_add(size);
    }
    if !current.is_empty() {
        groups.push(current);
    }

    debug!(groups = groups.len(), target_size = target, "chunked items by size");
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sized(sizes: &[u64]) -> Vec<(usize, u64)> {
        sizes.iter().copied().enumerate().collect()
    }

    #[test]
    fn test_empty_input() {
        let groups = chunk_by_size(Vec::<(usize, u64)>::new(), 10).expect("chunk");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_all_fit_in_one_group() {
        let groups = chunk_by_size(sized(&[3, 3, 3]), 10).expect("chunk");
        assert_eq!(groups, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_greedy_split() {
        // 4+4 fills the first bin; 4+5 fills the second; 9 takes the third.
        let groups = chunk_by_size(sized(&[4, 4, 4, 5, 9]), 9).expect("chunk");
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3], vec![4]]);
    }

    #[test]
    fn test_order_preserved_across_groups() {
        let groups = chunk_by_size(sized(&[5, 5, 5, 5]), 5).expect("chunk");
        let flattened: Vec<usize> = groups.into_iter().flatten().collect();
        assert_eq!(flattened, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_oversized_item_gets_own_group() {
        let groups = chunk_by_size(sized(&[2, 50, 2]), 10).expect("chunk");
        assert_eq!(groups, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_zero_target_rejected() {
        assert_eq!(
            chunk_by_size(sized(&[1]), 0),
            Err(ChunkError::ZeroTargetSize)
        );
    }

    #[test]
    fn test_zero_sized_items_share_a_group() {
        let groups = chunk_by_size(sized(&[0, 0, 0]), 1).expect("chunk");
        assert_eq!(groups, vec![vec![0, 1, 2]]);
    }
}
