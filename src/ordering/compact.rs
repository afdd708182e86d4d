use super::{OrderError, OrderedStore};
use tracing::info;

/// Renumber placed rows to `1..=k`, keeping their relative order.
///
/// The occupied span is parked above every live position in one statement,
/// then each row is assigned its dense position in ascending order; every
/// target lies below the parked band, so no statement collides.
///
/// Returns how many rows changed position.
pub fn compact(store: &OrderedStore<'_>, park_offset: i64) -> Result<u32, OrderError> {
    let placed = store.scan_placed()?;
    let (Some(&(_, lowest)), Some(&(_, highest))) = (placed.first(), placed.last()) else {
        return Ok(0);
    };

    let mut changed: u32 = 0;
    let mut expected: i64 = 1;
    for &(_, order) in &placed {
        if order != expected {
            changed = changed.saturating_add(1);
        }
        expected = expected.saturating_add(1);
    }
    if changed == 0 {
        return Ok(0);
    }

    // Clear of the span itself and of the dense targets, even when anomalous
    // non-positive values are present.
    let count = i64::try_from(placed.len()).map_err(|_| OrderError::Overflow)?;
    let floor = highest
        .max(count)
        .checked_sub(lowest.min(1))
        .and_then(|v| v.checked_add(1))
        .ok_or(OrderError::Overflow)?;
    let offset = park_offset.max(floor);
    highest.checked_add(offset).ok_or(OrderError::Overflow)?;
    store.shift_range(lowest, highest, offset)?;

    let mut position: i64 = 0;
    for &(id, _) in &placed {
        position = position.checked_add(1).ok_or(OrderError::Overflow)?;
        store.set_order(id, Some(position))?;
    }

    info!(
        table = store.table().table,
        changed,
        total = placed.len(),
        "Compacted order positions"
    );
    Ok(changed)
}
