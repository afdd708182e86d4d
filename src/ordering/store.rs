use super::{OrderError, OrderedTable};
use rusqlite::{params, OptionalExtension, Transaction};

/// Where a row currently sits in the ordered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// No row with that id.
    Missing,
    /// Row exists but its order is NULL.
    Unplaced,
    Placed(i64),
}

/// Order-column operations against one table, scoped to a transaction.
pub struct OrderedStore<'a> {
    tx: &'a Transaction<'a>,
    table: OrderedTable,
}

impl<'a> OrderedStore<'a> {
    #[must_use]
    pub fn new(tx: &'a Transaction<'a>, table: OrderedTable) -> Self {
        Self { tx, table }
    }

    #[must_use]
    pub fn table(&self) -> OrderedTable {
        self.table
    }

    /// Occupied (non-null) positions, ascending.
    pub fn scan_occupied_orders(&self) -> Result<Vec<i64>, OrderError> {
        let OrderedTable {
            table,
            order_column,
            ..
        } = self.table;
        let mut stmt = self.tx.prepare(&format!(
            "SELECT {order_column} FROM {table} WHERE {order_column} IS NOT NULL ORDER BY {order_column} ASC"
        ))?;
        let orders = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(orders)
    }

    /// Placed rows as `(id, order)` pairs, ascending by order.
    pub fn scan_placed(&self) -> Result<Vec<(i64, i64)>, OrderError> {
        let OrderedTable {
            table,
            id_column,
            order_column,
        } = self.table;
        let mut stmt = self.tx.prepare(&format!(
            "SELECT {id_column}, {order_column} FROM {table} WHERE {order_column} IS NOT NULL ORDER BY {order_column} ASC"
        ))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Highest occupied position, or 0 when nothing is placed.
    pub fn max_order(&self) -> Result<i64, OrderError> {
        let OrderedTable {
            table,
            order_column,
            ..
        } = self.table;
        let max = self.tx.query_row(
            &format!("SELECT COALESCE(MAX({order_column}), 0) FROM {table}"),
            [],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(max)
    }

    pub fn placement(&self, id: i64) -> Result<Placement, OrderError> {
        let OrderedTable {
            table,
            id_column,
            order_column,
        } = self.table;
        let found = self
            .tx
            .query_row(
                &format!("SELECT {order_column} FROM {table} WHERE {id_column} = ?1"),
                params![id],
                |row| row.get::<_, Option<i64>>(0),
            )
            .optional()?;
        Ok(match found {
            None => Placement::Missing,
            Some(None) => Placement::Unplaced,
            Some(Some(order)) => Placement::Placed(order),
        })
    }

    /// Point update of one row's position (`None` clears it).
    pub fn set_order(&self, id: i64, value: Option<i64>) -> Result<(), OrderError> {
        let OrderedTable {
            table,
            id_column,
            order_column,
        } = self.table;
        let updated = self
            .tx
            .execute(
                &format!("UPDATE {table} SET {order_column} = ?1 WHERE {id_column} = ?2"),
                params![value, id],
            )
            .map_err(|e| self.table.classify(e))?;
        if updated == 0 {
            return Err(OrderError::NotFound(id));
        }
        Ok(())
    }

    /// Add `delta` to every position in `[low, high]` with one set-based
    /// update. Returns the number of rows moved.
    pub fn shift_range(&self, low: i64, high: i64, delta: i64) -> Result<usize, OrderError> {
        if low > high || delta == 0 {
            return Ok(0);
        }
        let OrderedTable {
            table,
            order_column,
            ..
        } = self.table;
        let shifted = self
            .tx
            .execute(
                &format!(
                    "UPDATE {table} SET {order_column} = {order_column} + ?1 \
                     WHERE {order_column} BETWEEN ?2 AND ?3"
                ),
                params![delta, low, high],
            )
            .map_err(|e| self.table.classify(e))?;
        Ok(shifted)
    }
}
