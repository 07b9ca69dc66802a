//! Comanda Engine - order lifecycle core for a restaurant-operations app
//!
//! # Architecture
//!
//! ```text
//! Command → OrdersManager → Event(s) → Storage (redb)
//!                 ↓                        ↓
//!           Notification              Snapshot Update
//!             Intents                 + Index Effects
//!                 ↓
//!         NotificationSink(s)
//! ```
//!
//! # Data Flow
//!
//! 1. A client builds an [`shared::order::OrderCommand`] with an explicit
//!    actor context
//! 2. [`OrdersManager`] validates and processes the command inside a
//!    single write transaction
//! 3. `OrderEvent`s are generated with a global sequence and persisted
//!    together with updated snapshots and table/wait-list side effects
//! 4. After commit, events are broadcast to subscribers and notification
//!    intents are dispatched fire-and-forget
//!
//! Persistence failures abort the whole transaction: the prior state stays
//! visible and the caller may retry the entire transition. Notification
//! failures are logged and swallowed.

pub mod actions;
pub mod traits;
pub mod appliers;
pub mod manager;
pub mod money;
pub mod notify;
pub mod storage;

// Re-export public surface
pub use manager::{ManagerError, ManagerResult, OrdersManager, SectorTicket};
pub use notify::{
    NotificationDispatcher, NotificationSink, NotifyError, RecordingSink, StaffDirectory,
    StaticDirectory,
};
pub use storage::{OrderStorage, StorageError};
pub use traits::{CommandContext, CommandHandler, CommandMetadata, EventApplier, OrderError};

// Re-export shared vocabulary for convenience
pub use shared::order::{
    CommandError, CommandErrorCode, CommandResponse, EventPayload, OrderCommand,
    OrderCommandPayload, OrderEvent, OrderEventType, OrderSnapshot, OrderState,
};
