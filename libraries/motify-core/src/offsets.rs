//! Index-set editing for ordered lists
//!
//! Shared by the play queue and the activity list, which both delete and
//! reorder by sets of positions.

/// Sorted, deduplicated copy of `indices`
///
/// Returns the first index (in input order) that is not below `len`.
pub fn sorted_offsets(indices: &[usize], len: usize) -> Result<Vec<usize>, usize> {
    if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
        return Err(bad);
    }
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    Ok(sorted)
}

/// Remove the items at `offsets`, returned in list order
///
/// `offsets` must come from [`sorted_offsets`] for this list.
pub fn remove_offsets<T>(items: &mut Vec<T>, offsets: &[usize]) -> Vec<T> {
    let mut removed: Vec<T> = offsets.iter().rev().map(|&i| items.remove(i)).collect();
    removed.reverse();
    removed
}

/// Move the items at `offsets` so they land before the item currently at `to`
///
/// `to == items.len()` moves them to the end. Moved items keep their relative
/// order. `offsets` must come from [`sorted_offsets`] and `to` must not
/// exceed the length.
pub fn move_offsets<T>(items: &mut Vec<T>, offsets: &[usize], to: usize) {
    if offsets.is_empty() {
        return;
    }

    let insert_at = to - offsets.iter().filter(|&&i| i < to).count();
    let mut moved = Vec::with_capacity(offsets.len());
    let mut kept = Vec::with_capacity(items.len() - offsets.len());

    for (index, item) in std::mem::take(items).into_iter().enumerate() {
        if offsets.binary_search(&index).is_ok() {
            moved.push(item);
        } else {
            kept.push(item);
        }
    }

    kept.splice(insert_at..insert_at, moved);
    *items = kept;
}
