use super::*;
use rusqlite::{params, Connection};

const ITEMS: OrderedTable = OrderedTable::new("items", "id", "position");

/// In-memory table with one row per entry; row ids start at 1.
fn setup(orders: &[Option<i64>]) -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE items (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            position INTEGER UNIQUE
        );",
    )
    .unwrap();
    for (idx, order) in orders.iter().enumerate() {
        let id = i64::try_from(idx).unwrap() + 1;
        conn.execute(
            "INSERT INTO items (id, name, position) VALUES (?1, ?2, ?3)",
            params![id, format!("item-{id}"), order],
        )
        .unwrap();
    }
    conn
}

/// Positions keyed by id, ascending id.
fn positions(conn: &Connection) -> Vec<Option<i64>> {
    let mut stmt = conn
        .prepare("SELECT position FROM items ORDER BY id ASC")
        .unwrap();
    stmt.query_map([], |row| row.get::<_, Option<i64>>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

/// Ids in display order (placed rows only).
fn sequence(conn: &Connection) -> Vec<i64> {
    let mut stmt = conn
        .prepare("SELECT id FROM items WHERE position IS NOT NULL ORDER BY position ASC")
        .unwrap();
    stmt.query_map([], |row| row.get::<_, i64>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn insert_named(tx: &rusqlite::Transaction<'_>, name: &str, slot: i64) -> rusqlite::Result<i64> {
    tx.execute(
        "INSERT INTO items (name, position) VALUES (?1, ?2)",
        params![name, slot],
    )?;
    Ok(slot)
}

// ---------------------------------------------------------------------------
// Slot finding
// ---------------------------------------------------------------------------

#[test]
fn test_first_free_slot_fills_gap() {
    assert_eq!(first_free_slot([1, 2, 4]), 3);
}

#[test]
fn test_first_free_slot_appends_when_dense() {
    assert_eq!(first_free_slot([1, 2, 3]), 4);
}

#[test]
fn test_first_free_slot_empty_is_one() {
    assert_eq!(first_free_slot(Vec::new()), 1);
}

#[test]
fn test_first_free_slot_missing_first_position() {
    assert_eq!(first_free_slot([2, 3, 4]), 1);
}

#[test]
fn test_first_free_slot_skips_anomalies() {
    // Zero, negatives and repeats sit below the running expectation.
    assert_eq!(first_free_slot([-3, 0, 1, 1, 2, 5]), 3);
}

#[test]
fn test_next_slot_ignores_unplaced_rows() {
    let mut conn = setup(&[Some(1), None, Some(2), Some(4), None]);
    let tx = conn.transaction().unwrap();
    let store = OrderedStore::new(&tx, ITEMS);
    assert_eq!(next_slot(&store).unwrap(), 3);
    assert_eq!(store.max_order().unwrap(), 4);
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[test]
fn test_placement_variants() {
    let mut conn = setup(&[Some(1), None]);
    let tx = conn.transaction().unwrap();
    let store = OrderedStore::new(&tx, ITEMS);
    assert_eq!(store.placement(1).unwrap(), Placement::Placed(1));
    assert_eq!(store.placement(2).unwrap(), Placement::Unplaced);
    assert_eq!(store.placement(99).unwrap(), Placement::Missing);
}

#[test]
fn test_max_order_empty_table_is_zero() {
    let mut conn = setup(&[None, None]);
    let tx = conn.transaction().unwrap();
    assert_eq!(OrderedStore::new(&tx, ITEMS).max_order().unwrap(), 0);
}

#[test]
fn test_set_order_collision_is_constraint_violation() {
    let mut conn = setup(&[Some(1), Some(2)]);
    let tx = conn.transaction().unwrap();
    let err = OrderedStore::new(&tx, ITEMS)
        .set_order(2, Some(1))
        .unwrap_err();
    assert!(matches!(err, OrderError::ConstraintViolation(_)), "{err:?}");
    assert!(err.is_retryable());
}

#[test]
fn test_set_order_unknown_id_is_not_found() {
    let mut conn = setup(&[Some(1)]);
    let tx = conn.transaction().unwrap();
    let err = OrderedStore::new(&tx, ITEMS)
        .set_order(42, Some(5))
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(42)));
}

#[test]
fn test_shift_range_moves_only_the_band() {
    let mut conn = setup(&[Some(1), Some(2), Some(3), Some(4)]);
    let tx = conn.transaction().unwrap();
    let shifted = OrderedStore::new(&tx, ITEMS)
        .shift_range(2, 3, PARK_OFFSET)
        .unwrap();
    tx.commit().unwrap();
    assert_eq!(shifted, 2);
    assert_eq!(
        positions(&conn),
        vec![Some(1), Some(2 + PARK_OFFSET), Some(3 + PARK_OFFSET), Some(4)]
    );
}

#[test]
fn test_shift_range_empty_band_is_noop() {
    let mut conn = setup(&[Some(1), Some(2)]);
    let tx = conn.transaction().unwrap();
    assert_eq!(OrderedStore::new(&tx, ITEMS).shift_range(5, 2, 1).unwrap(), 0);
}

#[test]
fn test_classify_other_unique_column_passes_through() {
    let conn = setup(&[Some(1)]);
    let err = conn
        .execute(
            "INSERT INTO items (name, position) VALUES ('item-1', 7)",
            [],
        )
        .unwrap_err();
    assert!(matches!(ITEMS.classify(err), OrderError::Sqlite(_)));
}

// ---------------------------------------------------------------------------
// Create with order
// ---------------------------------------------------------------------------

#[test]
fn test_create_fills_gap() {
    let mut conn = setup(&[Some(1), Some(2), Some(4)]);
    let slot = create_with_order(&mut conn, ITEMS, MAX_ATTEMPTS, |tx, slot| {
        insert_named(tx, "new", slot)
    })
    .unwrap();
    assert_eq!(slot, 3);
    assert_eq!(positions(&conn), vec![Some(1), Some(2), Some(4), Some(3)]);
}

#[test]
fn test_create_appends_when_dense() {
    let mut conn = setup(&[Some(1), Some(2), Some(3)]);
    let slot = create_with_order(&mut conn, ITEMS, MAX_ATTEMPTS, |tx, slot| {
        insert_named(tx, "new", slot)
    })
    .unwrap();
    assert_eq!(slot, 4);
}

#[test]
fn test_create_on_empty_table_starts_at_one() {
    let mut conn = setup(&[]);
    let slot = create_with_order(&mut conn, ITEMS, MAX_ATTEMPTS, |tx, slot| {
        insert_named(tx, "first", slot)
    })
    .unwrap();
    assert_eq!(slot, 1);
}

#[test]
fn test_create_retries_after_conflict() {
    let mut conn = setup(&[Some(1)]);
    let mut calls = 0;
    let slot = create_with_order(&mut conn, ITEMS, MAX_ATTEMPTS, |tx, slot| {
        calls += 1;
        if calls == 1 {
            // A concurrent writer grabs the slot before our insert lands.
            insert_named(tx, "squatter", slot)?;
        }
        insert_named(tx, "mine", slot)
    })
    .unwrap();
    assert_eq!(calls, 2);
    assert_eq!(slot, 2);
    // The first attempt rolled back, squatter included.
    assert_eq!(positions(&conn), vec![Some(1), Some(2)]);
}

#[test]
fn test_create_exhausts_after_max_attempts() {
    let mut conn = setup(&[Some(1), Some(2)]);
    let mut calls: u32 = 0;
    let err = create_with_order(&mut conn, ITEMS, MAX_ATTEMPTS, |tx, slot| {
        calls += 1;
        insert_named(tx, &format!("squatter-{calls}"), slot)?;
        insert_named(tx, &format!("mine-{calls}"), slot)
    })
    .unwrap_err();
    assert_eq!(calls, MAX_ATTEMPTS);
    assert!(matches!(
        err,
        OrderError::SlotAssignmentExhausted { attempts } if attempts == MAX_ATTEMPTS
    ));
    assert!(err.is_retryable());
    assert_eq!(positions(&conn), vec![Some(1), Some(2)]);
}

#[test]
fn test_create_zero_attempts_still_tries_once() {
    let mut conn = setup(&[]);
    let slot = create_with_order(&mut conn, ITEMS, 0, |tx, slot| insert_named(tx, "x", slot))
        .unwrap();
    assert_eq!(slot, 1);
}

#[test]
fn test_create_other_errors_are_not_retried() {
    let mut conn = setup(&[Some(1)]);
    let mut calls = 0;
    let err = create_with_order(&mut conn, ITEMS, MAX_ATTEMPTS, |tx, slot| {
        calls += 1;
        // Duplicate name: a unique violation, but not on the order column.
        insert_named(tx, "item-1", slot)
    })
    .unwrap_err();
    assert_eq!(calls, 1);
    assert!(matches!(err, OrderError::Sqlite(_)), "{err:?}");
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

fn abcd() -> Connection {
    setup(&[Some(1), Some(2), Some(3), Some(4)])
}

#[test]
fn test_move_up() {
    let mut conn = abcd();
    let outcome = move_entity(&mut conn, ITEMS, 4, 2, PARK_OFFSET).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome {
            id: 4,
            from: 4,
            to: 2,
            shifted: 2
        }
    );
    // A=1, D=2, B=3, C=4
    assert_eq!(positions(&conn), vec![Some(1), Some(3), Some(4), Some(2)]);
}

#[test]
fn test_move_down() {
    let mut conn = abcd();
    let outcome = move_entity(&mut conn, ITEMS, 1, 3, PARK_OFFSET).unwrap();
    assert_eq!(outcome.shifted, 2);
    // B=1, C=2, A=3, D=4
    assert_eq!(positions(&conn), vec![Some(3), Some(1), Some(2), Some(4)]);
}

#[test]
fn test_move_to_current_position_is_noop() {
    let mut conn = abcd();
    let outcome = move_entity(&mut conn, ITEMS, 3, 3, PARK_OFFSET).unwrap();
    assert!(outcome.is_noop());
    assert_eq!(outcome.shifted, 0);
    assert_eq!(positions(&conn), vec![Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn test_move_past_end_clamps_to_last() {
    let mut conn = abcd();
    let outcome = move_entity(&mut conn, ITEMS, 2, 50, PARK_OFFSET).unwrap();
    assert_eq!(outcome.to, 4);
    assert_eq!(positions(&conn), vec![Some(1), Some(4), Some(2), Some(3)]);
    assert_eq!(sequence(&conn), vec![1, 3, 4, 2]);
}

#[test]
fn test_move_unplaced_row_appends_then_moves() {
    let mut conn = setup(&[Some(1), Some(2), None]);
    let outcome = move_entity(&mut conn, ITEMS, 3, 1, PARK_OFFSET).unwrap();
    assert_eq!(outcome.from, 3);
    assert_eq!(outcome.to, 1);
    assert_eq!(positions(&conn), vec![Some(2), Some(3), Some(1)]);
}

#[test]
fn test_move_unplaced_row_to_end_only_appends() {
    let mut conn = setup(&[Some(1), None]);
    let outcome = move_entity(&mut conn, ITEMS, 2, 9, PARK_OFFSET).unwrap();
    assert!(outcome.is_noop());
    assert_eq!(positions(&conn), vec![Some(1), Some(2)]);
}

#[test]
fn test_move_missing_row_is_not_found() {
    let mut conn = abcd();
    let err = move_entity(&mut conn, ITEMS, 77, 1, PARK_OFFSET).unwrap_err();
    assert!(matches!(err, OrderError::NotFound(77)));
}

#[test]
fn test_move_rejects_non_positive_target() {
    let mut conn = setup(&[Some(1), Some(2), None]);
    for target in [0, -4] {
        let err = move_entity(&mut conn, ITEMS, 3, target, PARK_OFFSET).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTarget(t) if t == target));
    }
    // Rejected before the unplaced row could be appended.
    assert_eq!(positions(&conn), vec![Some(1), Some(2), None]);
}

#[test]
fn test_move_across_gaps_keeps_positions_unique() {
    let mut conn = setup(&[Some(1), Some(2), Some(4), Some(5)]);
    move_entity(&mut conn, ITEMS, 1, 4, PARK_OFFSET).unwrap();
    // Band [2, 4] stepped back by one; the gap at 3 moved to 2.
    assert_eq!(positions(&conn), vec![Some(4), Some(1), Some(3), Some(5)]);
}

#[test]
fn test_move_with_small_offset_still_parks_clear() {
    let mut conn = abcd();
    // Configured offset below the live maximum is raised internally.
    move_entity(&mut conn, ITEMS, 4, 1, 2).unwrap();
    assert_eq!(sequence(&conn), vec![4, 1, 2, 3]);
}

#[test]
fn test_moves_match_list_model() {
    let mut conn = setup(&[Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]);
    let mut model: Vec<i64> = (1..=6).collect();
    for id in 1..=6_i64 {
        for target in 1..=7_i64 {
            move_entity(&mut conn, ITEMS, id, target, PARK_OFFSET).unwrap();
            let from = model.iter().position(|&x| x == id).unwrap();
            model.remove(from);
            let to = usize::try_from(target.min(6) - 1).unwrap();
            model.insert(to, id);
            assert_eq!(sequence(&conn), model, "after moving {id} to {target}");
            let mut placed: Vec<i64> = positions(&conn).into_iter().flatten().collect();
            placed.sort_unstable();
            assert_eq!(placed, vec![1, 2, 3, 4, 5, 6]);
        }
    }
}

#[test]
fn test_failure_after_parking_rolls_back() {
    let mut conn = abcd();
    conn.execute_batch(
        "CREATE TRIGGER fail_place BEFORE UPDATE OF position ON items
         WHEN NEW.id = 4 AND NEW.position = 2
         BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
    )
    .unwrap();
    let err = move_entity(&mut conn, ITEMS, 4, 2, PARK_OFFSET).unwrap_err();
    assert!(matches!(err, OrderError::Sqlite(_)), "{err:?}");
    assert_eq!(positions(&conn), vec![Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn test_dropped_transaction_discards_parked_band() {
    let mut conn = abcd();
    {
        let tx = conn.transaction().unwrap();
        let store = OrderedStore::new(&tx, ITEMS);
        let mut shift = ParkingShift::plan(4, 4, 2, PARK_OFFSET).unwrap().unwrap();
        assert_eq!(shift.direction(), Direction::Up);
        assert_eq!(shift.band(), (2, 3));
        assert_eq!(shift.park(&store).unwrap(), 2);
        shift.place(&store).unwrap();
        assert_eq!(shift.phase(), MovePhase::Placing);
        // Dropped before unparking.
    }
    let placed = positions(&conn);
    assert_eq!(placed, vec![Some(1), Some(2), Some(3), Some(4)]);
    assert!(placed.into_iter().flatten().all(|p| p < PARK_OFFSET));
}

#[test]
fn test_plan_same_position_is_none() {
    assert!(ParkingShift::plan(1, 3, 3, PARK_OFFSET).unwrap().is_none());
}

#[test]
fn test_plan_overflowing_offset() {
    let err = ParkingShift::plan(1, 5, 1, i64::MAX).unwrap_err();
    assert!(matches!(err, OrderError::Overflow));
}

#[test]
fn test_plan_down_band() {
    let shift = ParkingShift::plan(1, 1, 3, PARK_OFFSET).unwrap().unwrap();
    assert_eq!(shift.direction(), Direction::Down);
    assert_eq!(shift.band(), (2, 3));
    assert_eq!(shift.phase(), MovePhase::Idle);
}

// ---------------------------------------------------------------------------
// Compaction
// ---------------------------------------------------------------------------

#[test]
fn test_compact_closes_gaps() {
    let mut conn = setup(&[Some(7), None, Some(1), Some(3)]);
    let tx = conn.transaction().unwrap();
    let changed = compact(&OrderedStore::new(&tx, ITEMS), PARK_OFFSET).unwrap();
    tx.commit().unwrap();
    assert_eq!(changed, 2);
    assert_eq!(positions(&conn), vec![Some(3), None, Some(1), Some(2)]);
}

#[test]
fn test_compact_dense_is_noop() {
    let mut conn = abcd();
    let tx = conn.transaction().unwrap();
    assert_eq!(compact(&OrderedStore::new(&tx, ITEMS), PARK_OFFSET).unwrap(), 0);
}

#[test]
fn test_compact_empty_is_noop() {
    let mut conn = setup(&[None]);
    let tx = conn.transaction().unwrap();
    assert_eq!(compact(&OrderedStore::new(&tx, ITEMS), PARK_OFFSET).unwrap(), 0);
}

#[test]
fn test_compact_handles_non_positive_values() {
    let mut conn = setup(&[Some(0), Some(-2), Some(5)]);
    let tx = conn.transaction().unwrap();
    compact(&OrderedStore::new(&tx, ITEMS), 1).unwrap();
    tx.commit().unwrap();
    assert_eq!(positions(&conn), vec![Some(2), Some(1), Some(3)]);
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[test]
fn test_policy_defaults() {
    let policy = OrderingPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.park_offset, 100_000);
    assert!(!policy.clear_on_deactivate);
}

#[test]
fn test_policy_partial_toml() {
    let policy: OrderingPolicy = toml::from_str("park_offset = 5000\n").unwrap();
    assert_eq!(policy.park_offset, 5000);
    assert_eq!(policy.max_attempts, MAX_ATTEMPTS);
}

#[test]
fn test_policy_rejects_unknown_keys() {
    assert!(toml::from_str::<OrderingPolicy>("retries = 2\n").is_err());
}

#[test]
fn test_move_phase_display() {
    assert_eq!(MovePhase::Unparking.to_string(), "unparking");
    assert_eq!(MovePhase::Committed.to_string(), "committed");
}
