//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles one
//! specific command type. Actions validate against current state inside
//! the write transaction and emit events; they never mutate snapshots
//! directly.

use crate::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::customer::StaffRole;
use shared::order::{OrderCommand, OrderCommandPayload, OrderEvent};

mod assign_table;
mod call_waiter;
mod confirm_order;
mod item_preparation;
mod mark_delivered;
mod pay_order;
mod place_delivery;
mod record_game;
mod request_bill;
mod return_order;
mod submit_cart;

pub use assign_table::AssignTableAction;
pub use call_waiter::CallWaiterAction;
pub use confirm_order::ConfirmOrderAction;
pub use item_preparation::{BeginItemPreparationAction, FinishItemPreparationAction};
pub use mark_delivered::MarkDeliveredAction;
pub use pay_order::PayOrderAction;
pub use place_delivery::PlaceDeliveryOrderAction;
pub use record_game::RecordGameAttemptAction;
pub use request_bill::RequestBillAction;
pub use return_order::ReturnOrderAction;
pub use submit_cart::SubmitCartAction;

/// Roles allowed to run floor operations (assignment, confirmation,
/// delivery, payment).
pub(crate) const FLOOR_ROLES: &[StaffRole] =
    &[StaffRole::Waiter, StaffRole::Supervisor, StaffRole::Owner];

/// Roles allowed to work sector queues (kitchen/bar).
pub(crate) const SECTOR_ROLES: &[StaffRole] = &[
    StaffRole::Cook,
    StaffRole::Bartender,
    StaffRole::Supervisor,
    StaffRole::Owner,
];

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    AssignTable(AssignTableAction),
    SubmitCart(SubmitCartAction),
    ReturnOrder(ReturnOrderAction),
    ConfirmOrder(ConfirmOrderAction),
    BeginItemPreparation(BeginItemPreparationAction),
    FinishItemPreparation(FinishItemPreparationAction),
    MarkDelivered(MarkDeliveredAction),
    RequestBill(RequestBillAction),
    PayOrder(PayOrderAction),
    PlaceDeliveryOrder(PlaceDeliveryOrderAction),
    CallWaiter(CallWaiterAction),
    RecordGameAttempt(RecordGameAttemptAction),
}

impl CommandHandler for CommandAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        match self {
            Self::AssignTable(action) => action.execute(ctx, metadata),
            Self::SubmitCart(action) => action.execute(ctx, metadata),
            Self::ReturnOrder(action) => action.execute(ctx, metadata),
            Self::ConfirmOrder(action) => action.execute(ctx, metadata),
            Self::BeginItemPreparation(action) => action.execute(ctx, metadata),
            Self::FinishItemPreparation(action) => action.execute(ctx, metadata),
            Self::MarkDelivered(action) => action.execute(ctx, metadata),
            Self::RequestBill(action) => action.execute(ctx, metadata),
            Self::PayOrder(action) => action.execute(ctx, metadata),
            Self::PlaceDeliveryOrder(action) => action.execute(ctx, metadata),
            Self::CallWaiter(action) => action.execute(ctx, metadata),
            Self::RecordGameAttempt(action) => action.execute(ctx, metadata),
        }
    }
}

/// Convert OrderCommand to CommandAction.
///
/// This is the ONLY place with a match on OrderCommandPayload.
impl From<&OrderCommand> for CommandAction {
    fn from(cmd: &OrderCommand) -> Self {
        match &cmd.payload {
            OrderCommandPayload::AssignTable {
                waitlist_entry_id,
                table_id,
            } => Self::AssignTable(AssignTableAction {
                waitlist_entry_id: waitlist_entry_id.clone(),
                table_id: table_id.clone(),
            }),
            OrderCommandPayload::SubmitCart { order_id, items } => {
                Self::SubmitCart(SubmitCartAction {
                    order_id: order_id.clone(),
                    items: items.clone(),
                })
            }
            OrderCommandPayload::ReturnOrder { order_id, reason } => {
                Self::ReturnOrder(ReturnOrderAction {
                    order_id: order_id.clone(),
                    reason: reason.clone(),
                })
            }
            OrderCommandPayload::ConfirmOrder { order_id } => {
                Self::ConfirmOrder(ConfirmOrderAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::BeginItemPreparation { order_id, line_id } => {
                Self::BeginItemPreparation(BeginItemPreparationAction {
                    order_id: order_id.clone(),
                    line_id: line_id.clone(),
                })
            }
            OrderCommandPayload::FinishItemPreparation { order_id, line_id } => {
                Self::FinishItemPreparation(FinishItemPreparationAction {
                    order_id: order_id.clone(),
                    line_id: line_id.clone(),
                })
            }
            OrderCommandPayload::MarkDelivered { order_id } => {
                Self::MarkDelivered(MarkDeliveredAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::RequestBill { order_id } => Self::RequestBill(RequestBillAction {
                order_id: order_id.clone(),
            }),
            OrderCommandPayload::PayOrder { order_id, tip } => Self::PayOrder(PayOrderAction {
                order_id: order_id.clone(),
                tip: *tip,
            }),
            OrderCommandPayload::PlaceDeliveryOrder {
                customer,
                address,
                items,
            } => Self::PlaceDeliveryOrder(PlaceDeliveryOrderAction {
                customer: customer.clone(),
                address: address.clone(),
                items: items.clone(),
            }),
            OrderCommandPayload::CallWaiter { order_id } => Self::CallWaiter(CallWaiterAction {
                order_id: order_id.clone(),
            }),
            OrderCommandPayload::RecordGameAttempt {
                order_id,
                customer,
                game,
                won,
                attempt_number,
            } => Self::RecordGameAttempt(RecordGameAttemptAction {
                order_id: order_id.clone(),
                customer: customer.clone(),
                game: *game,
                won: *won,
                attempt_number: *attempt_number,
            }),
        }
    }
}
