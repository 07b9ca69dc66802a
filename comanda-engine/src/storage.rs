//! redb-based storage layer
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `events` | `(order_id, sequence)` | `OrderEvent` | Event stream (append-only) |
//! | `snapshots` | `order_id` | `OrderSnapshot` | Snapshot cache |
//! | `active_orders` | `order_id` | `()` | Active order index |
//! | `processed_commands` | `command_id` | `()` | Idempotency check |
//! | `sequence_counter` | `()` | `u64` | Global sequence |
//! | `dining_tables` | `table_id` | `DiningTable` | Table occupancy |
//! | `waitlist` | `entry_id` | `WaitlistEntry` | Wait-list entries |
//! | `reservations` | `reservation_id` | `Reservation` | Reservations |
//! | `game_results` | `(order_id, customer_key, seq)` | `GameResult` | Game attempts |
//!
//! # Atomicity
//!
//! Every engine transition runs in one write transaction across these
//! tables; redb serializes writers, so multi-step transitions (assignment,
//! replace-lines, payment+release) are single conditional writes. Commits
//! are durable when `commit()` returns.

use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use shared::models::customer::CustomerRef;
use shared::models::dining_table::{DiningTable, TableState};
use shared::models::game::GameResult;
use shared::models::reservation::Reservation;
use shared::models::waitlist::{WaitlistEntry, WaitlistState};
use shared::order::{OrderEvent, OrderSnapshot};

/// Event stream: key = (order_id, sequence), value = JSON-serialized OrderEvent
const EVENTS_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("events");

/// Snapshots: key = order_id, value = JSON-serialized OrderSnapshot
const SNAPSHOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

/// Active order index: key = order_id, value = empty (existence check)
const ACTIVE_ORDERS_TABLE: TableDefinition<&str, ()> = TableDefinition::new("active_orders");

/// Processed commands: key = command_id, value = empty (idempotency)
const PROCESSED_COMMANDS_TABLE: TableDefinition<&str, ()> =
    TableDefinition::new("processed_commands");

/// Sequence counter: key = "seq", value = u64
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

/// Dining tables: key = table_id, value = JSON-serialized DiningTable
const DINING_TABLES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("dining_tables");

/// Wait-list entries: key = entry_id, value = JSON-serialized WaitlistEntry
const WAITLIST_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("waitlist");

/// Reservations: key = reservation_id, value = JSON-serialized Reservation
const RESERVATIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("reservations");

/// Game attempts: key = (order_id, customer_key, seq). The sequence keeps
/// attempts ordered, so the first row in the range is the first attempt.
const GAME_RESULTS_TABLE: TableDefinition<(&str, &str, u64), &[u8]> =
    TableDefinition::new("game_results");

const SEQUENCE_KEY: &str = "seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Wait-list entry not found: {0}")]
    WaitlistEntryNotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StorageResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

fn get_json<T: DeserializeOwned>(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
    key: &str,
) -> StorageResult<Option<T>> {
    match table.get(key)? {
        Some(guard) => Ok(Some(decode(guard.value())?)),
        None => Ok(None),
    }
}

fn find_active_order_by(
    actives: &impl ReadableTable<&'static str, ()>,
    snapshots: &impl ReadableTable<&'static str, &'static [u8]>,
    pred: impl Fn(&OrderSnapshot) -> bool,
) -> StorageResult<Option<String>> {
    for entry in actives.iter()? {
        let (key, _) = entry?;
        let order_id = key.value();
        if let Some(snapshot) = get_json::<OrderSnapshot>(snapshots, order_id)?
            && pred(&snapshot)
        {
            return Ok(Some(snapshot.order_id));
        }
    }
    Ok(None)
}

/// Engine storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl OrderStorage {
    /// Open or create the database at the given path.
    ///
    /// redb commits with immediate durability: once `commit()` returns the
    /// transaction survives power loss, and the file is always in a
    /// consistent state (copy-on-write with atomic root swap).
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and ephemeral sessions).
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(EVENTS_TABLE)?;
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
            let _ = write_txn.open_table(ACTIVE_ORDERS_TABLE)?;
            let _ = write_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
            let _ = write_txn.open_table(DINING_TABLES_TABLE)?;
            let _ = write_txn.open_table(WAITLIST_TABLE)?;
            let _ = write_txn.open_table(RESERVATIONS_TABLE)?;
            let _ = write_txn.open_table(GAME_RESULTS_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(SEQUENCE_KEY)?.is_none() {
                seq_table.insert(SEQUENCE_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction. redb serializes writers, so the holder
    /// has exclusive write access until commit or drop.
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ==================== Sequence ====================

    pub fn get_current_sequence(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEQUENCE_TABLE)?;
        Ok(table.get(SEQUENCE_KEY)?.map(|g| g.value()).unwrap_or(0))
    }

    pub fn set_sequence(&self, txn: &WriteTransaction, value: u64) -> StorageResult<()> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        table.insert(SEQUENCE_KEY, value)?;
        Ok(())
    }

    // ==================== Command idempotency ====================

    pub fn is_command_processed(&self, command_id: &str) -> StorageResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id)?.is_some())
    }

    pub fn is_command_processed_txn(
        &self,
        txn: &WriteTransaction,
        command_id: &str,
    ) -> StorageResult<bool> {
        let table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id)?.is_some())
    }

    pub fn mark_command_processed(
        &self,
        txn: &WriteTransaction,
        command_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        table.insert(command_id, ())?;
        Ok(())
    }

    // ==================== Events ====================

    pub fn store_event(&self, txn: &WriteTransaction, event: &OrderEvent) -> StorageResult<()> {
        let mut table = txn.open_table(EVENTS_TABLE)?;
        let bytes = serde_json::to_vec(event)?;
        table.insert((event.order_id.as_str(), event.sequence), bytes.as_slice())?;
        Ok(())
    }

    pub fn get_events_for_order(&self, order_id: &str) -> StorageResult<Vec<OrderEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EVENTS_TABLE)?;
        let mut events = Vec::new();
        for entry in table.range((order_id, 0)..=(order_id, u64::MAX))? {
            let (_, value) = entry?;
            events.push(decode(value.value())?);
        }
        Ok(events)
    }

    /// Events with sequence greater than `since_sequence`, globally
    /// ordered (reconnection sync).
    pub fn get_events_since(&self, since_sequence: u64) -> StorageResult<Vec<OrderEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EVENTS_TABLE)?;
        let mut events: Vec<OrderEvent> = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            if key.value().1 > since_sequence {
                events.push(decode(value.value())?);
            }
        }
        events.sort_by_key(|e| e.sequence);
        Ok(events)
    }

    // ==================== Snapshots ====================

    pub fn store_snapshot(
        &self,
        txn: &WriteTransaction,
        snapshot: &OrderSnapshot,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
        let bytes = serde_json::to_vec(snapshot)?;
        table.insert(snapshot.order_id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    pub fn get_snapshot(&self, order_id: &str) -> StorageResult<Option<OrderSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;
        get_json(&table, order_id)
    }

    pub fn get_snapshot_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<OrderSnapshot>> {
        let table = txn.open_table(SNAPSHOTS_TABLE)?;
        get_json(&table, order_id)
    }

    pub fn mark_order_active(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        table.insert(order_id, ())?;
        Ok(())
    }

    pub fn mark_order_inactive(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        table.remove(order_id)?;
        Ok(())
    }

    pub fn get_active_orders(&self) -> StorageResult<Vec<OrderSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let actives = read_txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let snapshots = read_txn.open_table(SNAPSHOTS_TABLE)?;
        let mut orders = Vec::new();
        for entry in actives.iter()? {
            let (key, _) = entry?;
            if let Some(snapshot) = get_json::<OrderSnapshot>(&snapshots, key.value())? {
                orders.push(snapshot);
            }
        }
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    pub fn find_active_order_for_table(&self, table_id: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let actives = read_txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let snapshots = read_txn.open_table(SNAPSHOTS_TABLE)?;
        find_active_order_by(&actives, &snapshots, |o| {
            o.table_id.as_deref() == Some(table_id)
        })
    }

    pub fn find_active_order_for_table_txn(
        &self,
        txn: &WriteTransaction,
        table_id: &str,
    ) -> StorageResult<Option<String>> {
        let actives = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let snapshots = txn.open_table(SNAPSHOTS_TABLE)?;
        find_active_order_by(&actives, &snapshots, |o| {
            o.table_id.as_deref() == Some(table_id)
        })
    }

    pub fn find_active_order_for_customer(
        &self,
        customer: &CustomerRef,
    ) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let actives = read_txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let snapshots = read_txn.open_table(SNAPSHOTS_TABLE)?;
        find_active_order_by(&actives, &snapshots, |o| &o.customer == customer)
    }

    pub fn find_active_order_for_customer_txn(
        &self,
        txn: &WriteTransaction,
        customer: &CustomerRef,
    ) -> StorageResult<Option<String>> {
        let actives = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let snapshots = txn.open_table(SNAPSHOTS_TABLE)?;
        find_active_order_by(&actives, &snapshots, |o| &o.customer == customer)
    }

    // ==================== Dining tables ====================

    pub fn store_table(&self, txn: &WriteTransaction, table: &DiningTable) -> StorageResult<()> {
        let mut tables = txn.open_table(DINING_TABLES_TABLE)?;
        let bytes = serde_json::to_vec(table)?;
        tables.insert(table.id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    pub fn get_table(&self, table_id: &str) -> StorageResult<Option<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let tables = read_txn.open_table(DINING_TABLES_TABLE)?;
        get_json(&tables, table_id)
    }

    pub fn get_table_txn(
        &self,
        txn: &WriteTransaction,
        table_id: &str,
    ) -> StorageResult<Option<DiningTable>> {
        let tables = txn.open_table(DINING_TABLES_TABLE)?;
        get_json(&tables, table_id)
    }

    pub fn set_table_state(
        &self,
        txn: &WriteTransaction,
        table_id: &str,
        state: TableState,
    ) -> StorageResult<()> {
        let mut table = self
            .get_table_txn(txn, table_id)?
            .ok_or_else(|| StorageError::TableNotFound(table_id.to_string()))?;
        table.state = state;
        self.store_table(txn, &table)
    }

    pub fn find_table_by_number_txn(
        &self,
        txn: &WriteTransaction,
        number: u32,
    ) -> StorageResult<Option<DiningTable>> {
        let tables = txn.open_table(DINING_TABLES_TABLE)?;
        for entry in tables.iter()? {
            let (_, value) = entry?;
            let parsed: DiningTable = decode(value.value())?;
            if parsed.number == number {
                return Ok(Some(parsed));
            }
        }
        Ok(None)
    }

    pub fn list_tables(&self) -> StorageResult<Vec<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let tables = read_txn.open_table(DINING_TABLES_TABLE)?;
        let mut out = Vec::new();
        for entry in tables.iter()? {
            let (_, value) = entry?;
            out.push(decode::<DiningTable>(value.value())?);
        }
        out.sort_by_key(|t| t.number);
        Ok(out)
    }

    // ==================== Wait-list ====================

    pub fn store_waitlist_entry(
        &self,
        txn: &WriteTransaction,
        entry: &WaitlistEntry,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(WAITLIST_TABLE)?;
        let bytes = serde_json::to_vec(entry)?;
        table.insert(entry.id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    pub fn get_waitlist_entry(&self, entry_id: &str) -> StorageResult<Option<WaitlistEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WAITLIST_TABLE)?;
        get_json(&table, entry_id)
    }

    pub fn get_waitlist_entry_txn(
        &self,
        txn: &WriteTransaction,
        entry_id: &str,
    ) -> StorageResult<Option<WaitlistEntry>> {
        let table = txn.open_table(WAITLIST_TABLE)?;
        get_json(&table, entry_id)
    }

    pub fn set_waitlist_state(
        &self,
        txn: &WriteTransaction,
        entry_id: &str,
        state: WaitlistState,
    ) -> StorageResult<()> {
        let mut entry = self
            .get_waitlist_entry_txn(txn, entry_id)?
            .ok_or_else(|| StorageError::WaitlistEntryNotFound(entry_id.to_string()))?;
        entry.state = state;
        self.store_waitlist_entry(txn, &entry)
    }

    /// Waiting entries in arrival order.
    pub fn waiting_entries(&self) -> StorageResult<Vec<WaitlistEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WAITLIST_TABLE)?;
        let mut entries = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let parsed: WaitlistEntry = decode(value.value())?;
            if parsed.is_waiting() {
                entries.push(parsed);
            }
        }
        entries.sort_by_key(|e| e.joined_at);
        Ok(entries)
    }

    pub fn find_waiting_for_customer_txn(
        &self,
        txn: &WriteTransaction,
        customer: &CustomerRef,
    ) -> StorageResult<Option<WaitlistEntry>> {
        let table = txn.open_table(WAITLIST_TABLE)?;
        for entry in table.iter()? {
            let (_, value) = entry?;
            let parsed: WaitlistEntry = decode(value.value())?;
            if parsed.is_waiting() && &parsed.customer == customer {
                return Ok(Some(parsed));
            }
        }
        Ok(None)
    }

    // ==================== Reservations ====================

    pub fn store_reservation(
        &self,
        txn: &WriteTransaction,
        reservation: &Reservation,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(RESERVATIONS_TABLE)?;
        let bytes = serde_json::to_vec(reservation)?;
        table.insert(reservation.id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    pub fn get_reservation(&self, reservation_id: &str) -> StorageResult<Option<Reservation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESERVATIONS_TABLE)?;
        get_json(&table, reservation_id)
    }

    pub fn get_reservation_txn(
        &self,
        txn: &WriteTransaction,
        reservation_id: &str,
    ) -> StorageResult<Option<Reservation>> {
        let table = txn.open_table(RESERVATIONS_TABLE)?;
        get_json(&table, reservation_id)
    }

    /// Pending and confirmed reservations, within the given transaction,
    /// ordered by requested time.
    pub fn open_reservations_txn(&self, txn: &WriteTransaction) -> StorageResult<Vec<Reservation>> {
        let table = txn.open_table(RESERVATIONS_TABLE)?;
        let mut reservations = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let parsed: Reservation = decode(value.value())?;
            if parsed.is_open() {
                reservations.push(parsed);
            }
        }
        reservations.sort_by_key(|r| r.requested_at);
        Ok(reservations)
    }

    // ==================== Game results ====================

    pub fn append_game_result(
        &self,
        txn: &WriteTransaction,
        result: &GameResult,
        sequence: u64,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(GAME_RESULTS_TABLE)?;
        let bytes = serde_json::to_vec(result)?;
        let customer_key = result.customer.storage_key();
        table.insert(
            (result.order_id.as_str(), customer_key.as_str(), sequence),
            bytes.as_slice(),
        )?;
        Ok(())
    }

    /// Earliest recorded attempt for the (order, customer) pair.
    pub fn first_game_result(
        &self,
        order_id: &str,
        customer: &CustomerRef,
    ) -> StorageResult<Option<GameResult>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(GAME_RESULTS_TABLE)?;
        let key = customer.storage_key();
        match table
            .range((order_id, key.as_str(), 0)..=(order_id, key.as_str(), u64::MAX))?
            .next()
        {
            Some(entry) => {
                let (_, value) = entry?;
                Ok(Some(decode(value.value())?))
            }
            None => Ok(None),
        }
    }

    pub fn first_game_result_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
        customer: &CustomerRef,
    ) -> StorageResult<Option<GameResult>> {
        let table = txn.open_table(GAME_RESULTS_TABLE)?;
        let key = customer.storage_key();
        match table
            .range((order_id, key.as_str(), 0)..=(order_id, key.as_str(), u64::MAX))?
            .next()
        {
            Some(entry) => {
                let (_, value) = entry?;
                Ok(Some(decode(value.value())?))
            }
            None => Ok(None),
        }
    }

    /// All recorded attempts for the pair, in recording order (analytics).
    pub fn game_results_for(
        &self,
        order_id: &str,
        customer: &CustomerRef,
    ) -> StorageResult<Vec<GameResult>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(GAME_RESULTS_TABLE)?;
        let key = customer.storage_key();
        let mut results = Vec::new();
        for entry in table.range((order_id, key.as_str(), 0)..=(order_id, key.as_str(), u64::MAX))? {
            let (_, value) = entry?;
            results.push(decode(value.value())?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::game::GameKind;

    fn storage() -> OrderStorage {
        OrderStorage::open_in_memory().unwrap()
    }

    #[test]
    fn sequence_starts_at_zero() {
        let storage = storage();
        assert_eq!(storage.get_current_sequence().unwrap(), 0);
    }

    #[test]
    fn snapshot_roundtrip() {
        let storage = storage();
        let txn = storage.begin_write().unwrap();
        let snapshot = OrderSnapshot::new("o-1".to_string());
        storage.store_snapshot(&txn, &snapshot).unwrap();
        storage.mark_order_active(&txn, "o-1").unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_snapshot("o-1").unwrap().unwrap();
        assert_eq!(loaded.order_id, "o-1");
        assert_eq!(storage.get_active_orders().unwrap().len(), 1);
    }

    #[test]
    fn table_state_update_requires_existing_table() {
        let storage = storage();
        let txn = storage.begin_write().unwrap();
        let result = storage.set_table_state(&txn, "missing", TableState::Occupied);
        assert!(matches!(result, Err(StorageError::TableNotFound(_))));
    }

    #[test]
    fn first_game_result_is_earliest() {
        let storage = storage();
        let customer = CustomerRef::Anonymous("a-1".to_string());
        let txn = storage.begin_write().unwrap();
        for (seq, won) in [(5u64, false), (9u64, true)] {
            let result = GameResult {
                order_id: "o-1".to_string(),
                customer: customer.clone(),
                game: GameKind::Quiz,
                won,
                attempt_number: if seq == 5 { 1 } else { 2 },
                discount_granted: 0.0,
                recorded_at: 0,
            };
            storage.append_game_result(&txn, &result, seq).unwrap();
        }
        txn.commit().unwrap();

        let first = storage.first_game_result("o-1", &customer).unwrap().unwrap();
        assert_eq!(first.attempt_number, 1);
        assert!(!first.won);
        assert_eq!(storage.game_results_for("o-1", &customer).unwrap().len(), 2);
    }

    #[test]
    fn waiting_entries_in_arrival_order() {
        let storage = storage();
        let txn = storage.begin_write().unwrap();
        for (id, at) in [("w-2", 200), ("w-1", 100)] {
            let entry = WaitlistEntry::new(
                id.to_string(),
                CustomerRef::Anonymous(format!("c-{id}")),
                at,
            );
            storage.store_waitlist_entry(&txn, &entry).unwrap();
        }
        txn.commit().unwrap();

        let waiting = storage.waiting_entries().unwrap();
        assert_eq!(waiting.len(), 2);
        assert_eq!(waiting[0].id, "w-1");
    }
}
