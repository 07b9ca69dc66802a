use super::*;
use crate::notify::{RecordingSink, StaticDirectory};
use shared::error::ErrorKind;
use shared::models::customer::ActorContext;
use shared::models::game::GameKind;
use shared::models::product::ProductCategory;
use shared::notification::{NotificationKind, Recipient};
use shared::order::command::CartLineInput;
use shared::order::snapshot::OrderChannel;
use shared::order::{OrderCommandPayload, OrderState};

mod test_boundary;
mod test_core;

fn create_test_manager() -> (OrdersManager, Arc<RecordingSink>) {
    let storage = OrderStorage::open_in_memory().unwrap();
    let directory = StaticDirectory::new()
        .with_staff(StaffRole::Waiter, &["mozo-1", "mozo-2"])
        .with_staff(StaffRole::Owner, &["owner-1"])
        .with_staff(StaffRole::Supervisor, &["sup-1"])
        .with_staff(StaffRole::Cook, &["cocina-1"])
        .with_staff(StaffRole::Bartender, &["bar-1"]);
    let manager = OrdersManager::with_storage(storage, Arc::new(directory));
    let sink = Arc::new(RecordingSink::new());
    manager.add_sink(sink.clone());
    (manager, sink)
}

fn waiter() -> ActorContext {
    ActorContext::Staff {
        id: "mozo-1".to_string(),
        name: "Carla".to_string(),
        role: StaffRole::Waiter,
    }
}

fn cook() -> ActorContext {
    ActorContext::Staff {
        id: "cocina-1".to_string(),
        name: "Pedro".to_string(),
        role: StaffRole::Cook,
    }
}

fn customer_actor(customer: &CustomerRef) -> ActorContext {
    ActorContext::Customer {
        customer: customer.clone(),
        name: "Cliente".to_string(),
    }
}

fn anon(id: &str) -> CustomerRef {
    CustomerRef::Anonymous(id.to_string())
}

fn food(name: &str, unit_price: f64, quantity: i32) -> CartLineInput {
    CartLineInput {
        product_id: format!("p-{name}"),
        name: name.to_string(),
        category: ProductCategory::Food,
        unit_price,
        quantity,
        prep_minutes: 20,
    }
}

fn drink(name: &str, unit_price: f64, quantity: i32) -> CartLineInput {
    CartLineInput {
        product_id: format!("p-{name}"),
        name: name.to_string(),
        category: ProductCategory::Drink,
        unit_price,
        quantity,
        prep_minutes: 5,
    }
}

/// Create a table, queue the customer and assign them to it.
/// Returns (order_id, table_id).
fn seat_customer(
    manager: &OrdersManager,
    table_number: u32,
    customer: &CustomerRef,
) -> (String, String) {
    let table = manager.create_table(table_number, 4).unwrap();
    let entry = manager.join_waitlist(customer.clone()).unwrap();
    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::AssignTable {
            waitlist_entry_id: entry.id,
            table_id: table.id.clone(),
        },
    ));
    assert!(response.success, "assignment failed: {:?}", response.error);
    (response.order_id.unwrap(), table.id)
}

fn submit_cart(
    manager: &OrdersManager,
    order_id: &str,
    customer: &CustomerRef,
    items: Vec<CartLineInput>,
) {
    let response = manager.execute_command(OrderCommand::new(
        customer_actor(customer),
        OrderCommandPayload::SubmitCart {
            order_id: order_id.to_string(),
            items,
        },
    ));
    assert!(response.success, "submit failed: {:?}", response.error);
}

fn confirm_order(manager: &OrdersManager, order_id: &str) {
    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::ConfirmOrder {
            order_id: order_id.to_string(),
        },
    ));
    assert!(response.success, "confirm failed: {:?}", response.error);
}

/// Run every line item through begin + finish.
fn prepare_all_items(manager: &OrdersManager, order_id: &str) {
    let order = manager.get_order(order_id).unwrap().unwrap();
    for line in &order.items {
        for payload in [
            OrderCommandPayload::BeginItemPreparation {
                order_id: order_id.to_string(),
                line_id: line.line_id.clone(),
            },
            OrderCommandPayload::FinishItemPreparation {
                order_id: order_id.to_string(),
                line_id: line.line_id.clone(),
            },
        ] {
            let response = manager.execute_command(OrderCommand::new(cook(), payload));
            assert!(response.success, "prep failed: {:?}", response.error);
        }
    }
}

fn intents_of_kind(
    sink: &RecordingSink,
    kind: NotificationKind,
) -> Vec<shared::notification::NotificationIntent> {
    sink.delivered()
        .into_iter()
        .filter(|intent| intent.kind == kind)
        .collect()
}
