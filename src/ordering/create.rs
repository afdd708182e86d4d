use super::{next_slot, OrderError, OrderedStore, OrderedTable};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::{debug, warn};

/// Insert a row at the next free position, retrying when a concurrent writer
/// claims the same position first.
///
/// Each attempt runs in a fresh IMMEDIATE transaction: the slot is computed,
/// `insert` is called with it, and the transaction commits. A uniqueness
/// failure on the order column rolls the attempt back and starts over with a
/// fresh read of the occupied positions. Any other failure is returned as-is.
///
/// `max_attempts` counts total attempts and is raised to at least one.
pub fn create_with_order<T, F>(
    conn: &mut Connection,
    table: OrderedTable,
    max_attempts: u32,
    mut insert: F,
) -> Result<T, OrderError>
where
    F: FnMut(&Transaction<'_>, i64) -> rusqlite::Result<T>,
{
    let max_attempts = max_attempts.max(1);
    for attempt in 1..=max_attempts {
        match attempt_insert(conn, table, &mut insert) {
            Ok(created) => return Ok(created),
            Err(OrderError::ConstraintViolation(message)) => {
                warn!(
                    table = table.table,
                    attempt, max_attempts, "Order slot taken concurrently: {message}"
                );
            }
            Err(e) => return Err(e),
        }
    }
    Err(OrderError::SlotAssignmentExhausted {
        attempts: max_attempts,
    })
}

fn attempt_insert<T, F>(
    conn: &mut Connection,
    table: OrderedTable,
    insert: &mut F,
) -> Result<T, OrderError>
where
    F: FnMut(&Transaction<'_>, i64) -> rusqlite::Result<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let slot = next_slot(&OrderedStore::new(&tx, table))?;
    debug!(table = table.table, slot, "Computed next order slot");
    let created = insert(&tx, slot).map_err(|e| table.classify(e))?;
    tx.commit().map_err(|e| table.classify(e))?;
    Ok(created)
}
