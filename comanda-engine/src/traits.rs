//! Core traits and the command execution context
//!
//! Actions validate a command against current state and emit events;
//! appliers fold events into snapshots. Both run inside the single write
//! transaction owned by the manager, so a failing action leaves no trace.

use std::collections::HashMap;

use redb::WriteTransaction;
use thiserror::Error;

use crate::storage::OrderStorage;
use shared::models::customer::{ActorContext, CustomerRef, StaffRole};
use shared::models::dining_table::DiningTable;
use shared::models::game::GameResult;
use shared::models::waitlist::WaitlistEntry;
use shared::order::{CommandErrorCode, OrderEvent, OrderSnapshot, OrderState};

/// Engine-level errors raised while executing a command.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("table {0} is already occupied")]
    TableOccupied(String),

    #[error("wait-list entry not found: {0}")]
    WaitlistEntryNotFound(String),

    #[error("wait-list entry {0} was already attended")]
    WaitlistEntryAttended(String),

    #[error("customer {customer} already holds active order {order_id}")]
    CustomerAlreadyAssigned {
        customer: CustomerRef,
        order_id: String,
    },

    #[error("line item not found: {0}")]
    ItemNotFound(String),

    #[error("cannot {action} an order in state {from}")]
    InvalidTransition {
        from: OrderState,
        action: &'static str,
    },

    #[error("order is already {0}")]
    AlreadyInState(OrderState),

    #[error("cart is empty")]
    EmptyCart,

    #[error("a reason is required")]
    ReasonRequired,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("actor is not allowed to {0}")]
    RoleNotAllowed(&'static str),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl OrderError {
    /// Wire-level code for this error; the code's `kind()` carries the
    /// validation/conflict/persistence classification.
    pub fn code(&self) -> CommandErrorCode {
        match self {
            Self::OrderNotFound(_) => CommandErrorCode::OrderNotFound,
            Self::TableNotFound(_) => CommandErrorCode::TableNotFound,
            Self::TableOccupied(_) => CommandErrorCode::TableOccupied,
            Self::WaitlistEntryNotFound(_) => CommandErrorCode::WaitlistEntryNotFound,
            Self::WaitlistEntryAttended(_) => CommandErrorCode::WaitlistEntryAttended,
            Self::CustomerAlreadyAssigned { .. } => CommandErrorCode::CustomerAlreadyAssigned,
            Self::ItemNotFound(_) => CommandErrorCode::ItemNotFound,
            Self::InvalidTransition { .. } => CommandErrorCode::InvalidTransition,
            Self::AlreadyInState(_) => CommandErrorCode::AlreadyInState,
            Self::EmptyCart => CommandErrorCode::EmptyCart,
            Self::ReasonRequired => CommandErrorCode::ReasonRequired,
            Self::InvalidAmount(_) => CommandErrorCode::InvalidAmount,
            Self::RoleNotAllowed(_) => CommandErrorCode::RoleNotAllowed,
            Self::InvalidOperation(_) => CommandErrorCode::InvalidOperation,
            Self::Storage(_) => CommandErrorCode::StorageFailed,
        }
    }
}

impl From<crate::storage::StorageError> for OrderError {
    fn from(err: crate::storage::StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Command metadata carried into every action.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub actor: ActorContext,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
}

/// Require the actor to be staff holding one of the allowed roles.
pub(crate) fn require_staff(
    actor: &ActorContext,
    allowed: &[StaffRole],
    action: &'static str,
) -> Result<(), OrderError> {
    match actor.staff_role() {
        Some(role) if allowed.contains(&role) => Ok(()),
        _ => Err(OrderError::RoleNotAllowed(action)),
    }
}

/// Require the actor to be either staff (any role) or the bound customer
/// of the order.
pub(crate) fn require_staff_or_customer(
    actor: &ActorContext,
    customer: &CustomerRef,
    action: &'static str,
) -> Result<(), OrderError> {
    if actor.staff_role().is_some() || actor.customer() == Some(customer) {
        Ok(())
    } else {
        Err(OrderError::RoleNotAllowed(action))
    }
}

/// Handler for one command type.
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError>;
}

/// Applier for one event type. Appliers are pure: they only fold the
/// event into the snapshot.
#[enum_dispatch::enum_dispatch]
pub trait EventApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent);
}

/// Execution context for one command: read access to current state inside
/// the write transaction, a sequence allocator, and a cache of snapshots
/// modified by this command.
pub struct CommandContext<'a> {
    txn: &'a WriteTransaction,
    storage: &'a OrderStorage,
    sequence: u64,
    snapshots: HashMap<String, OrderSnapshot>,
}

impl<'a> CommandContext<'a> {
    pub fn new(txn: &'a WriteTransaction, storage: &'a OrderStorage, current_sequence: u64) -> Self {
        Self {
            txn,
            storage,
            sequence: current_sequence,
            snapshots: HashMap::new(),
        }
    }

    /// Allocate the next global sequence number.
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Load a snapshot, preferring one already modified by this command.
    pub fn load_snapshot(&mut self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        if let Some(snapshot) = self.snapshots.get(order_id) {
            return Ok(snapshot.clone());
        }
        self.storage
            .get_snapshot_txn(self.txn, order_id)?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Load a snapshot or a fresh shell when the order does not exist yet
    /// (creation events).
    pub fn load_or_new(&mut self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        if let Some(snapshot) = self.snapshots.get(order_id) {
            return Ok(snapshot.clone());
        }
        Ok(self
            .storage
            .get_snapshot_txn(self.txn, order_id)?
            .unwrap_or_else(|| OrderSnapshot::new(order_id.to_string())))
    }

    /// Record a snapshot modified by this command; persisted by the
    /// manager before commit.
    pub fn save_snapshot(&mut self, snapshot: OrderSnapshot) {
        self.snapshots.insert(snapshot.order_id.clone(), snapshot);
    }

    /// Snapshots modified by this command, consumed by the manager.
    pub fn into_snapshots(self) -> HashMap<String, OrderSnapshot> {
        self.snapshots
    }

    // ==================== Read-side helpers ====================

    pub fn find_active_order_for_table(
        &self,
        table_id: &str,
    ) -> Result<Option<String>, OrderError> {
        Ok(self
            .storage
            .find_active_order_for_table_txn(self.txn, table_id)?)
    }

    pub fn find_active_order_for_customer(
        &self,
        customer: &CustomerRef,
    ) -> Result<Option<String>, OrderError> {
        Ok(self
            .storage
            .find_active_order_for_customer_txn(self.txn, customer)?)
    }

    pub fn get_table(&self, table_id: &str) -> Result<Option<DiningTable>, OrderError> {
        Ok(self.storage.get_table_txn(self.txn, table_id)?)
    }

    pub fn get_waitlist_entry(&self, entry_id: &str) -> Result<Option<WaitlistEntry>, OrderError> {
        Ok(self.storage.get_waitlist_entry_txn(self.txn, entry_id)?)
    }

    /// Earliest recorded game attempt for the (order, customer) pair.
    pub fn prior_game_result(
        &self,
        order_id: &str,
        customer: &CustomerRef,
    ) -> Result<Option<GameResult>, OrderError> {
        Ok(self
            .storage
            .first_game_result_txn(self.txn, order_id, customer)?)
    }
}
