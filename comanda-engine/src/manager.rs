//! OrdersManager - command processing and event generation
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Idempotency check (command_id)
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Create CommandContext
//!     ├─ 4. Convert command to action and execute
//!     ├─ 5. Apply events to snapshots via EventApplier
//!     ├─ 6. Persist events, snapshots and index side effects
//!     ├─ 7. Mark command processed
//!     ├─ 8. Commit transaction
//!     ├─ 9. Broadcast event(s)
//!     ├─ 10. Derive and dispatch notification intents
//!     └─ 11. Return response
//! ```
//!
//! Everything up to the commit is one redb write transaction: an error at
//! any step leaves the prior state fully intact and the caller may retry
//! the whole transition. Steps 9-10 run only after a successful commit and
//! can never fail it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::actions::CommandAction;
use crate::appliers::EventAction;
use crate::notify::{NotificationDispatcher, NotificationSink, StaffDirectory, intents_for_event};
use crate::storage::{OrderStorage, StorageError};
use crate::traits::{CommandContext, CommandHandler, CommandMetadata, EventApplier, OrderError};
use shared::models::customer::{CustomerRef, StaffRole};
use shared::models::dining_table::{DiningTable, TableState};
use shared::models::game::GameResult;
use shared::models::product::Sector;
use shared::models::reservation::{Reservation, ReservationState};
use shared::models::waitlist::{WaitlistEntry, WaitlistState};
use shared::notification::{NotificationIntent, NotificationKind};
use shared::order::snapshot::LineItem;
use shared::order::state::LineItemState;
use shared::order::{
    CommandError, CommandErrorCode, CommandResponse, EventPayload, OrderCommand, OrderEvent,
    OrderSnapshot,
};

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Reservation {id} is already {state:?}")]
    ReservationClosed { id: String, state: ReservationState },

    #[error("Customer {0} is already on the wait-list")]
    AlreadyWaiting(CustomerRef),

    #[error("A reason is required")]
    ReasonRequired,

    #[error("Table number {0} already exists")]
    DuplicateTableNumber(u32),
}

impl From<ManagerError> for CommandError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) => {
                tracing::error!(error = %e, "Storage error while processing command");
                CommandError::new(CommandErrorCode::StorageFailed, e.to_string())
            }
            ManagerError::Order(e) => CommandError::new(e.code(), e.to_string()),
            ManagerError::ReservationNotFound(id) => CommandError::new(
                CommandErrorCode::InvalidOperation,
                format!("Reservation not found: {}", id),
            ),
            ManagerError::ReservationClosed { id, state } => CommandError::new(
                CommandErrorCode::AlreadyInState,
                format!("Reservation {} is already {:?}", id, state),
            ),
            ManagerError::AlreadyWaiting(customer) => CommandError::new(
                CommandErrorCode::AlreadyInState,
                format!("Customer {} is already on the wait-list", customer),
            ),
            ManagerError::ReasonRequired => {
                CommandError::new(CommandErrorCode::ReasonRequired, "A reason is required")
            }
            ManagerError::DuplicateTableNumber(number) => CommandError::new(
                CommandErrorCode::InvalidOperation,
                format!("Table number {} already exists", number),
            ),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// One line item pending work in a sector queue.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SectorTicket {
    pub order_id: String,
    pub table_number: Option<u32>,
    /// Order creation time; queues are worked oldest-first
    pub ordered_at: i64,
    pub line: LineItem,
}

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 4096;

struct ProcessedCommand {
    response: CommandResponse,
    events: Vec<OrderEvent>,
    snapshots: HashMap<String, OrderSnapshot>,
}

/// OrdersManager for command processing
///
/// The `epoch` field is a unique identifier generated on each startup.
/// Clients use it to detect engine restarts and trigger full resync.
pub struct OrdersManager {
    storage: OrderStorage,
    event_tx: broadcast::Sender<OrderEvent>,
    epoch: String,
    dispatcher: Arc<NotificationDispatcher>,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("storage", &"<OrderStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl OrdersManager {
    /// Create a manager with a database at the given path.
    pub fn new(
        db_path: impl AsRef<Path>,
        directory: Arc<dyn StaffDirectory>,
    ) -> ManagerResult<Self> {
        let storage = OrderStorage::open(db_path)?;
        Ok(Self::with_storage(storage, directory))
    }

    /// Create a manager over existing storage (tests, embedded reuse).
    pub fn with_storage(storage: OrderStorage, directory: Arc<dyn StaffDirectory>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let epoch = Uuid::new_v4().to_string();
        info!(epoch = %epoch, "OrdersManager started with new epoch");
        Self {
            storage,
            event_tx,
            epoch,
            dispatcher: Arc::new(NotificationDispatcher::new(directory)),
        }
    }

    /// Engine instance epoch (unique per startup).
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Register a notification delivery sink.
    pub fn add_sink(&self, sink: Arc<dyn NotificationSink>) {
        self.dispatcher.add_sink(sink);
    }

    /// Subscribe to committed event broadcasts.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    /// The underlying storage.
    pub fn storage(&self) -> &OrderStorage {
        &self.storage
    }

    // ==================== Command pipeline ====================

    /// Execute a command and return the response.
    pub fn execute_command(&self, cmd: OrderCommand) -> CommandResponse {
        self.execute_command_with_events(cmd).0
    }

    /// Execute a command, returning both the response and the generated
    /// events (for callers that mirror events to an embedded frontend).
    pub fn execute_command_with_events(
        &self,
        cmd: OrderCommand,
    ) -> (CommandResponse, Vec<OrderEvent>) {
        match self.process_command(&cmd) {
            Ok(processed) => {
                // Broadcast and notify only after a successful commit.
                for event in &processed.events {
                    let _ = self.event_tx.send(event.clone());
                }
                self.notify_for_events(&processed.events, &processed.snapshots);
                (processed.response, processed.events)
            }
            Err(err) => (CommandResponse::error(cmd.command_id, err.into()), vec![]),
        }
    }

    fn process_command(&self, cmd: &OrderCommand) -> ManagerResult<ProcessedCommand> {
        info!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        // 1. Idempotency check (before transaction)
        if self.storage.is_command_processed(&cmd.command_id)? {
            warn!(command_id = %cmd.command_id, "Duplicate command");
            return Ok(ProcessedCommand {
                response: CommandResponse::duplicate(cmd.command_id.clone()),
                events: vec![],
                snapshots: HashMap::new(),
            });
        }

        // 2. Begin write transaction
        let txn = self.storage.begin_write()?;

        // Double-check idempotency within the transaction
        if self.storage.is_command_processed_txn(&txn, &cmd.command_id)? {
            return Ok(ProcessedCommand {
                response: CommandResponse::duplicate(cmd.command_id.clone()),
                events: vec![],
                snapshots: HashMap::new(),
            });
        }

        // 3. Create context and metadata
        let current_sequence = self.storage.get_current_sequence()?;
        let mut ctx = CommandContext::new(&txn, &self.storage, current_sequence);
        let metadata = CommandMetadata {
            command_id: cmd.command_id.clone(),
            actor: cmd.actor.clone(),
            timestamp: cmd.timestamp,
        };

        // 4. Convert to action and execute
        let action: CommandAction = cmd.into();
        let events = action.execute(&mut ctx, &metadata)?;

        // 5. Apply events to snapshots
        for event in &events {
            let mut snapshot = ctx.load_or_new(&event.order_id)?;
            let applier: EventAction = event.into();
            applier.apply(&mut snapshot, event);
            ctx.save_snapshot(snapshot);
        }

        // 6. Persist events, snapshots and index side effects
        for event in &events {
            self.storage.store_event(&txn, event)?;
            self.apply_index_effects(&txn, event)?;
        }
        let snapshots = ctx.into_snapshots();
        for snapshot in snapshots.values() {
            self.storage.store_snapshot(&txn, snapshot)?;
            if snapshot.is_active() {
                self.storage.mark_order_active(&txn, &snapshot.order_id)?;
            } else {
                self.storage.mark_order_inactive(&txn, &snapshot.order_id)?;
            }
        }

        // Update sequence counter
        let max_sequence = events
            .iter()
            .map(|e| e.sequence)
            .max()
            .unwrap_or(current_sequence);
        if max_sequence > current_sequence {
            self.storage.set_sequence(&txn, max_sequence)?;
        }

        // 7. Mark command processed
        self.storage.mark_command_processed(&txn, &cmd.command_id)?;

        // 8. Commit transaction
        txn.commit().map_err(StorageError::from)?;

        let order_id = events.first().map(|e| e.order_id.clone());
        info!(
            command_id = %cmd.command_id,
            order_id = ?order_id,
            event_count = events.len(),
            "Command processed successfully"
        );
        Ok(ProcessedCommand {
            response: CommandResponse::success(cmd.command_id.clone(), order_id),
            events,
            snapshots,
        })
    }

    /// Table, wait-list and game-record side effects of an event, applied
    /// in the same transaction as the event itself.
    fn apply_index_effects(
        &self,
        txn: &redb::WriteTransaction,
        event: &OrderEvent,
    ) -> ManagerResult<()> {
        match &event.payload {
            EventPayload::TableAssigned {
                table_id,
                waitlist_entry_id,
                ..
            } => {
                self.storage
                    .set_table_state(txn, table_id, TableState::Occupied)?;
                self.storage
                    .set_waitlist_state(txn, waitlist_entry_id, WaitlistState::Attended)?;
            }
            EventPayload::OrderPaid {
                table_id: Some(table_id),
                ..
            } => {
                self.storage.set_table_state(txn, table_id, TableState::Free)?;
            }
            EventPayload::GameAttemptRecorded {
                customer,
                game,
                won,
                attempt_number,
                discount_granted,
            } => {
                let result = GameResult {
                    order_id: event.order_id.clone(),
                    customer: customer.clone(),
                    game: *game,
                    won: *won,
                    attempt_number: *attempt_number,
                    discount_granted: *discount_granted,
                    recorded_at: event.timestamp,
                };
                self.storage
                    .append_game_result(txn, &result, event.sequence)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn notify_for_events(
        &self,
        events: &[OrderEvent],
        snapshots: &HashMap<String, OrderSnapshot>,
    ) {
        for event in events {
            let Some(snapshot) = snapshots.get(&event.order_id) else {
                continue;
            };
            let intents = intents_for_event(event, snapshot, self.dispatcher.directory());
            self.dispatcher.dispatch(&intents);
        }
    }

    // ==================== Order queries ====================

    pub fn get_order(&self, order_id: &str) -> ManagerResult<Option<OrderSnapshot>> {
        Ok(self.storage.get_snapshot(order_id)?)
    }

    pub fn get_active_orders(&self) -> ManagerResult<Vec<OrderSnapshot>> {
        Ok(self.storage.get_active_orders()?)
    }

    pub fn find_active_order_for_table(&self, table_id: &str) -> ManagerResult<Option<String>> {
        Ok(self.storage.find_active_order_for_table(table_id)?)
    }

    pub fn find_active_order_for_customer(
        &self,
        customer: &CustomerRef,
    ) -> ManagerResult<Option<String>> {
        Ok(self.storage.find_active_order_for_customer(customer)?)
    }

    /// Line items pending work in one sector: parent order in the
    /// preparation phase, item not yet ready, routed by product category.
    /// Oldest order first.
    pub fn sector_queue(&self, sector: Sector) -> ManagerResult<Vec<SectorTicket>> {
        let mut tickets = Vec::new();
        for order in self.storage.get_active_orders()? {
            if !order.state.in_preparation_phase() {
                continue;
            }
            for line in &order.items {
                if line.state != LineItemState::Ready && line.sector() == sector {
                    tickets.push(SectorTicket {
                        order_id: order.order_id.clone(),
                        table_number: order.table_number,
                        ordered_at: order.created_at,
                        line: line.clone(),
                    });
                }
            }
        }
        tickets.sort_by_key(|t| t.ordered_at);
        Ok(tickets)
    }

    pub fn get_current_sequence(&self) -> ManagerResult<u64> {
        Ok(self.storage.get_current_sequence()?)
    }

    /// Events since a sequence number, for reconnection sync. Consumers
    /// apply them idempotently keyed by order id + sequence.
    pub fn get_events_since(&self, since_sequence: u64) -> ManagerResult<Vec<OrderEvent>> {
        Ok(self.storage.get_events_since(since_sequence)?)
    }

    /// Rebuild a snapshot from its events (verification / drift checks).
    pub fn rebuild_snapshot(&self, order_id: &str) -> ManagerResult<OrderSnapshot> {
        let events = self.storage.get_events_for_order(order_id)?;
        if events.is_empty() {
            return Err(OrderError::OrderNotFound(order_id.to_string()).into());
        }

        let mut snapshot = OrderSnapshot::new(order_id.to_string());
        for event in &events {
            let applier: EventAction = event.into();
            applier.apply(&mut snapshot, event);
        }
        Ok(snapshot)
    }

    // ==================== Game results ====================

    pub fn prior_game_result(
        &self,
        order_id: &str,
        customer: &CustomerRef,
    ) -> ManagerResult<Option<GameResult>> {
        Ok(self.storage.first_game_result(order_id, customer)?)
    }

    pub fn game_results_for(
        &self,
        order_id: &str,
        customer: &CustomerRef,
    ) -> ManagerResult<Vec<GameResult>> {
        Ok(self.storage.game_results_for(order_id, customer)?)
    }

    // ==================== Dining tables ====================

    /// Register a dining table. Numbers are unique.
    pub fn create_table(&self, number: u32, capacity: i32) -> ManagerResult<DiningTable> {
        let txn = self.storage.begin_write()?;
        if self.storage.find_table_by_number_txn(&txn, number)?.is_some() {
            return Err(ManagerError::DuplicateTableNumber(number));
        }
        let table = DiningTable::new(Uuid::new_v4().to_string(), number, capacity);
        self.storage.store_table(&txn, &table)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(table)
    }

    pub fn list_tables(&self) -> ManagerResult<Vec<DiningTable>> {
        Ok(self.storage.list_tables()?)
    }

    pub fn get_table(&self, table_id: &str) -> ManagerResult<Option<DiningTable>> {
        Ok(self.storage.get_table(table_id)?)
    }

    // ==================== Wait-list ====================

    /// QR walk-in registration: add a customer to the wait-list. A
    /// customer already waiting is rejected.
    pub fn join_waitlist(&self, customer: CustomerRef) -> ManagerResult<WaitlistEntry> {
        let txn = self.storage.begin_write()?;
        if let Some(existing) = self.storage.find_waiting_for_customer_txn(&txn, &customer)? {
            return Err(ManagerError::AlreadyWaiting(existing.customer));
        }
        let entry = WaitlistEntry::new(
            Uuid::new_v4().to_string(),
            customer,
            chrono::Utc::now().timestamp_millis(),
        );
        self.storage.store_waitlist_entry(&txn, &entry)?;
        txn.commit().map_err(StorageError::from)?;
        info!(entry_id = %entry.id, customer = %entry.customer, "Customer joined wait-list");
        Ok(entry)
    }

    /// Waiting customers in arrival order.
    pub fn waiting_entries(&self) -> ManagerResult<Vec<WaitlistEntry>> {
        Ok(self.storage.waiting_entries()?)
    }

    // ==================== Reservations ====================

    pub fn create_reservation(
        &self,
        customer: CustomerRef,
        requested_at: i64,
        party_size: i32,
    ) -> ManagerResult<Reservation> {
        let reservation = Reservation::new(
            Uuid::new_v4().to_string(),
            customer,
            requested_at,
            party_size,
            chrono::Utc::now().timestamp_millis(),
        );
        let txn = self.storage.begin_write()?;
        self.storage.store_reservation(&txn, &reservation)?;
        txn.commit().map_err(StorageError::from)?;

        let mut intents = Vec::new();
        for role in [StaffRole::Owner, StaffRole::Supervisor] {
            for id in self.dispatcher.directory().active_staff(role) {
                intents.push(NotificationIntent::to_staff(
                    role,
                    id,
                    NotificationKind::NewReservation,
                    "New reservation",
                    format!(
                        "Reservation for {} at {}",
                        reservation.party_size, reservation.requested_at
                    ),
                    serde_json::json!({ "reservation_id": reservation.id }),
                ));
            }
        }
        self.dispatcher.dispatch(&intents);
        Ok(reservation)
    }

    pub fn confirm_reservation(&self, reservation_id: &str) -> ManagerResult<Reservation> {
        let reservation = self.transition_reservation(
            reservation_id,
            ReservationState::Confirmed,
            &[ReservationState::Pending],
        )?;
        self.dispatcher.dispatch(&[NotificationIntent::to_customer(
            reservation.customer.clone(),
            NotificationKind::ReservationConfirmed,
            "Reservation confirmed",
            "See you there!",
            serde_json::json!({ "reservation_id": reservation.id }),
        )]);
        Ok(reservation)
    }

    /// Reject a reservation; the reason is mandatory and forwarded to the
    /// customer.
    pub fn reject_reservation(
        &self,
        reservation_id: &str,
        reason: &str,
    ) -> ManagerResult<Reservation> {
        if reason.trim().is_empty() {
            return Err(ManagerError::ReasonRequired);
        }
        let reservation = self.transition_reservation(
            reservation_id,
            ReservationState::Rejected,
            &[ReservationState::Pending, ReservationState::Confirmed],
        )?;
        self.dispatcher.dispatch(&[NotificationIntent::to_customer(
            reservation.customer.clone(),
            NotificationKind::ReservationRejected,
            "Reservation rejected",
            format!("Your reservation was rejected: {}", reason.trim()),
            serde_json::json!({ "reservation_id": reservation.id }),
        )]);
        Ok(reservation)
    }

    /// Customer cancels their own reservation.
    pub fn cancel_reservation(&self, reservation_id: &str) -> ManagerResult<Reservation> {
        self.transition_reservation(
            reservation_id,
            ReservationState::Cancelled,
            &[ReservationState::Pending, ReservationState::Confirmed],
        )
    }

    pub fn get_reservation(&self, reservation_id: &str) -> ManagerResult<Option<Reservation>> {
        Ok(self.storage.get_reservation(reservation_id)?)
    }

    fn transition_reservation(
        &self,
        reservation_id: &str,
        to: ReservationState,
        allowed_from: &[ReservationState],
    ) -> ManagerResult<Reservation> {
        let txn = self.storage.begin_write()?;
        let mut reservation = self
            .storage
            .get_reservation_txn(&txn, reservation_id)?
            .ok_or_else(|| ManagerError::ReservationNotFound(reservation_id.to_string()))?;
        if !allowed_from.contains(&reservation.state) {
            return Err(ManagerError::ReservationClosed {
                id: reservation_id.to_string(),
                state: reservation.state,
            });
        }
        reservation.state = to;
        self.storage.store_reservation(&txn, &reservation)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(reservation)
    }

    /// Expire overdue reservations and return the still-actionable ones.
    ///
    /// Runs on every reservation-list load so stale reservations are
    /// never shown as actionable; expiry is persisted before returning.
    pub fn sweep_expired_reservations(&self, now: i64) -> ManagerResult<Vec<Reservation>> {
        let txn = self.storage.begin_write()?;
        let open = self.storage.open_reservations_txn(&txn)?;
        let mut surviving = Vec::new();
        let mut expired = 0usize;
        for mut reservation in open {
            if reservation.is_overdue(now) {
                reservation.state = ReservationState::Expired;
                self.storage.store_reservation(&txn, &reservation)?;
                expired += 1;
            } else {
                surviving.push(reservation);
            }
        }
        txn.commit().map_err(StorageError::from)?;
        if expired > 0 {
            info!(expired, "Expired overdue reservations");
        }
        Ok(surviving)
    }
}

impl Clone for OrdersManager {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            event_tx: self.event_tx.clone(),
            epoch: self.epoch.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
