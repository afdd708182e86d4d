use super::{OrderError, OrderedStore};

/// Smallest position not yet taken, given occupied positions in ascending
/// order. Fills the earliest gap before appending past the maximum.
///
/// Values below the running expectation (duplicates, zero or negatives) are
/// skipped rather than treated as errors.
#[must_use]
pub fn first_free_slot<I>(occupied: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let mut expected: i64 = 1;
    for value in occupied {
        if value > expected {
            break;
        }
        if value == expected {
            expected = expected.saturating_add(1);
        }
    }
    expected
}

/// Next safe position for a row about to be inserted in this transaction.
pub fn next_slot(store: &OrderedStore<'_>) -> Result<i64, OrderError> {
    let occupied = store.scan_occupied_orders()?;
    Ok(first_free_slot(occupied))
}
