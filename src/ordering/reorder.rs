//! Moving a row to a new position with the park / place / unpark protocol.
//!
//! Shifting a band of positions by one in place would, for an engine that
//! checks uniqueness per statement (or per row, as SQLite does), collide with
//! the neighbour that has not been shifted yet. Instead the band is first
//! parked far above every live position, the moving row is placed into the
//! slot that just became free, and the band is brought back down one step
//! away from where it started. Each of the three statements is individually
//! collision-free.
use super::{OrderError, OrderedStore, OrderedTable, Placement};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Progress of a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePhase {
    Idle,
    Parking,
    Placing,
    Unparking,
    Committed,
}

impl fmt::Display for MovePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MovePhase::Idle => "idle",
            MovePhase::Parking => "parking",
            MovePhase::Placing => "placing",
            MovePhase::Unparking => "unparking",
            MovePhase::Committed => "committed",
        };
        f.write_str(name)
    }
}

/// Which way the moving row travels along the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards position 1; the rows in between step forward (+1).
    Up,
    /// Towards the end; the rows in between step back (-1).
    Down,
}

impl Direction {
    fn step(self) -> i64 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

/// What a move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub id: i64,
    /// Position before the move (after appending, for a previously unplaced row).
    pub from: i64,
    /// Final position, after clamping.
    pub to: i64,
    /// Rows displaced by one slot.
    pub shifted: usize,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// One planned relocation of `id` from `current` to `target`.
///
/// Call [`park`](Self::park), [`place`](Self::place) and
/// [`unpark`](Self::unpark) in that order inside a single transaction, or
/// [`run`](Self::run) to do all three.
#[derive(Debug, Clone)]
pub struct ParkingShift {
    id: i64,
    target: i64,
    direction: Direction,
    low: i64,
    high: i64,
    offset: i64,
    phase: MovePhase,
}

impl ParkingShift {
    /// Plan a move. Returns `Ok(None)` when `current == target`.
    ///
    /// `offset` must exceed every live position; the caller passes at least
    /// `max_order + 1`.
    pub fn plan(
        id: i64,
        current: i64,
        target: i64,
        offset: i64,
    ) -> Result<Option<Self>, OrderError> {
        let (direction, low, high) = match target.cmp(&current) {
            std::cmp::Ordering::Equal => return Ok(None),
            std::cmp::Ordering::Less => (
                Direction::Up,
                target,
                current.checked_sub(1).ok_or(OrderError::Overflow)?,
            ),
            std::cmp::Ordering::Greater => (
                Direction::Down,
                current.checked_add(1).ok_or(OrderError::Overflow)?,
                target,
            ),
        };
        // The parked band must stay representable.
        high.checked_add(offset).ok_or(OrderError::Overflow)?;
        Ok(Some(Self {
            id,
            target,
            direction,
            low,
            high,
            offset,
            phase: MovePhase::Idle,
        }))
    }

    #[must_use]
    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The closed range of positions that shift by one.
    #[must_use]
    pub fn band(&self) -> (i64, i64) {
        (self.low, self.high)
    }

    /// Phase A: lift the band into `[low + offset, high + offset]`.
    pub fn park(&mut self, store: &OrderedStore<'_>) -> Result<usize, OrderError> {
        self.enter(MovePhase::Parking);
        store.shift_range(self.low, self.high, self.offset)
    }

    /// Phase B: put the moving row on its target, vacated by the park.
    pub fn place(&mut self, store: &OrderedStore<'_>) -> Result<(), OrderError> {
        self.enter(MovePhase::Placing);
        store.set_order(self.id, Some(self.target))
    }

    /// Phase C: bring the band back down, one step from where it started.
    pub fn unpark(&mut self, store: &OrderedStore<'_>) -> Result<usize, OrderError> {
        self.enter(MovePhase::Unparking);
        let low = self.low.checked_add(self.offset).ok_or(OrderError::Overflow)?;
        let high = self.high.checked_add(self.offset).ok_or(OrderError::Overflow)?;
        let delta = self
            .direction
            .step()
            .checked_sub(self.offset)
            .ok_or(OrderError::Overflow)?;
        store.shift_range(low, high, delta)
    }

    /// All three phases in order. Returns the number of displaced rows.
    pub fn run(&mut self, store: &OrderedStore<'_>) -> Result<usize, OrderError> {
        let parked = self.park(store)?;
        self.place(store)?;
        let unparked = self.unpark(store)?;
        if parked != unparked {
            warn!(
                id = self.id,
                parked, unparked, "Parked and unparked row counts differ"
            );
        }
        Ok(unparked)
    }

    fn enter(&mut self, phase: MovePhase) {
        debug!(id = self.id, from = %self.phase, to = %phase, "Move phase");
        self.phase = phase;
    }
}

/// Move `id` to `target` inside the caller's transaction.
///
/// A row without a position is appended first. Targets past the end clamp to
/// the last position. The caller commits; dropping the transaction after an
/// error discards every phase.
pub fn move_to(
    store: &OrderedStore<'_>,
    id: i64,
    target: i64,
    park_offset: i64,
) -> Result<MoveOutcome, OrderError> {
    if target < 1 {
        return Err(OrderError::InvalidTarget(target));
    }

    let current = match store.placement(id)? {
        Placement::Missing => return Err(OrderError::NotFound(id)),
        Placement::Placed(order) => order,
        Placement::Unplaced => {
            let appended = store
                .max_order()?
                .checked_add(1)
                .ok_or(OrderError::Overflow)?;
            store.set_order(id, Some(appended))?;
            debug!(id, order = appended, "Appended unplaced row before move");
            appended
        }
    };

    let max = store.max_order()?;
    let target = target.min(max);
    let offset = park_offset.max(max.checked_add(1).ok_or(OrderError::Overflow)?);

    let Some(mut shift) = ParkingShift::plan(id, current, target, offset)? else {
        return Ok(MoveOutcome {
            id,
            from: current,
            to: current,
            shifted: 0,
        });
    };

    match shift.run(store) {
        Ok(shifted) => Ok(MoveOutcome {
            id,
            from: current,
            to: target,
            shifted,
        }),
        Err(e) => {
            warn!(id, phase = %shift.phase(), "Move aborted: {e}");
            Err(e)
        }
    }
}

/// Move `id` to `target` in a transaction of its own.
///
/// Conflicts are not retried here: with the whole move inside one
/// transaction, a uniqueness failure points at a bug rather than a race.
pub fn move_entity(
    conn: &mut Connection,
    table: OrderedTable,
    id: i64,
    target: i64,
    park_offset: i64,
) -> Result<MoveOutcome, OrderError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let outcome = move_to(&OrderedStore::new(&tx, table), id, target, park_offset)?;
    tx.commit().map_err(|e| table.classify(e))?;
    debug!(id, phase = %MovePhase::Committed, "Move phase");
    info!(
        table = table.table,
        id,
        from = outcome.from,
        to = outcome.to,
        shifted = outcome.shifted,
        "Moved row"
    );
    Ok(outcome)
}
