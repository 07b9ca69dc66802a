use super::*;

#[test]
fn test_assign_table_scenario() {
    let (manager, sink) = create_test_manager();
    let customer = anon("A123");

    let table = manager.create_table(5, 4).unwrap();
    let entry = manager.join_waitlist(customer.clone()).unwrap();
    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::AssignTable {
            waitlist_entry_id: entry.id.clone(),
            table_id: table.id.clone(),
        },
    ));
    assert!(response.success);

    // Order created in Pending, bound to table and customer
    let order_id = response.order_id.unwrap();
    let order = manager.get_order(&order_id).unwrap().unwrap();
    assert_eq!(order.state, OrderState::Pending);
    assert_eq!(order.table_number, Some(5));
    assert_eq!(order.customer, customer);

    // Table occupied, wait-list entry attended
    let table = manager.get_table(&table.id).unwrap().unwrap();
    assert!(!table.is_free());
    assert!(manager.waiting_entries().unwrap().is_empty());

    // Exactly one notification, addressed to the customer
    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].kind, NotificationKind::TableAssigned);
    assert_eq!(
        delivered[0].recipient,
        Recipient::Customer {
            customer: customer.clone()
        }
    );
}

#[test]
fn test_idempotency() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let table = manager.create_table(1, 2).unwrap();
    let entry = manager.join_waitlist(customer).unwrap();

    let cmd = OrderCommand::with_id(
        "cmd-assign-1",
        waiter(),
        OrderCommandPayload::AssignTable {
            waitlist_entry_id: entry.id,
            table_id: table.id,
        },
    );

    let first = manager.execute_command(cmd.clone());
    assert!(first.success);
    assert!(first.order_id.is_some());

    // Redelivery is acknowledged without re-executing
    let second = manager.execute_command(cmd);
    assert!(second.success);
    assert_eq!(second.order_id, None);

    assert_eq!(manager.get_active_orders().unwrap().len(), 1);
}

#[test]
fn test_submit_cart_totals() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);

    submit_cart(
        &manager,
        &order_id,
        &customer,
        vec![food("milanesa", 1500.0, 2), drink("malbec", 800.0, 1)],
    );

    let order = manager.get_order(&order_id).unwrap().unwrap();
    assert_eq!(order.state, OrderState::Placed);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.subtotal, 3800.0);
    assert_eq!(order.total, 3800.0);
    assert_eq!(order.estimated_prep_minutes(), 20);
}

#[test]
fn test_resubmission_replaces_all_lines() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);

    submit_cart(
        &manager,
        &order_id,
        &customer,
        vec![food("milanesa", 1500.0, 1), drink("agua", 300.0, 2)],
    );
    submit_cart(
        &manager,
        &order_id,
        &customer,
        vec![food("ravioles", 1200.0, 1)],
    );

    // The set of line items equals exactly the newly submitted set
    let order = manager.get_order(&order_id).unwrap().unwrap();
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].name, "ravioles");
    assert_eq!(order.subtotal, 1200.0);
}

#[test]
fn test_derived_order_state_from_items() {
    let (manager, sink) = create_test_manager();
    let customer = anon("A77");
    let (order_id, _) = seat_customer(&manager, 7, &customer);
    submit_cart(
        &manager,
        &order_id,
        &customer,
        vec![
            food("entrada", 500.0, 1),
            food("principal", 2000.0, 1),
            drink("gaseosa", 400.0, 1),
        ],
    );
    confirm_order(&manager, &order_id);
    sink.clear();

    let order = manager.get_order(&order_id).unwrap().unwrap();
    let lines: Vec<String> = order.items.iter().map(|l| l.line_id.clone()).collect();

    // Two of three ready: order must report Preparing
    for line_id in &lines[..2] {
        let response = manager.execute_command(OrderCommand::new(
            cook(),
            OrderCommandPayload::FinishItemPreparation {
                order_id: order_id.clone(),
                line_id: line_id.clone(),
            },
        ));
        assert!(response.success);
    }
    let order = manager.get_order(&order_id).unwrap().unwrap();
    assert_eq!(order.state, OrderState::Preparing);

    // Last one flips the order to Ready and notifies every waiter once
    sink.clear();
    let response = manager.execute_command(OrderCommand::new(
        cook(),
        OrderCommandPayload::FinishItemPreparation {
            order_id: order_id.clone(),
            line_id: lines[2].clone(),
        },
    ));
    assert!(response.success);

    let order = manager.get_order(&order_id).unwrap().unwrap();
    assert_eq!(order.state, OrderState::Ready);

    let ready_intents = intents_of_kind(&sink, NotificationKind::OrderReady);
    assert_eq!(ready_intents.len(), 2); // one per waiter-role recipient
    for intent in &ready_intents {
        assert!(matches!(
            &intent.recipient,
            Recipient::Staff { role: StaffRole::Waiter, .. }
        ));
    }
}

#[test]
fn test_total_invariant_with_discount_and_tip() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(&manager, &order_id, &customer, vec![food("flan", 5.0, 1)]);

    // Win a big-discount game on a tiny order: total clamps at zero
    let response = manager.execute_command(OrderCommand::new(
        customer_actor(&customer),
        OrderCommandPayload::RecordGameAttempt {
            order_id: order_id.clone(),
            customer: customer.clone(),
            game: GameKind::Reflex,
            won: true,
            attempt_number: 1,
        },
    ));
    assert!(response.success);

    let order = manager.get_order(&order_id).unwrap().unwrap();
    assert_eq!(order.discount, 20.0);
    assert_eq!(order.subtotal, 5.0);
    assert_eq!(order.total, 0.0);
}

#[test]
fn test_rebuild_snapshot_matches_stored() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(
        &manager,
        &order_id,
        &customer,
        vec![food("milanesa", 1500.0, 1)],
    );
    confirm_order(&manager, &order_id);
    prepare_all_items(&manager, &order_id);

    let stored = manager.get_order(&order_id).unwrap().unwrap();
    let rebuilt = manager.rebuild_snapshot(&order_id).unwrap();
    assert_eq!(rebuilt.state, stored.state);
    assert_eq!(rebuilt.items, stored.items);
    assert_eq!(rebuilt.total, stored.total);
    assert_eq!(rebuilt.last_sequence, stored.last_sequence);
}

#[test]
fn test_event_broadcast() {
    let (manager, _sink) = create_test_manager();
    let mut rx = manager.subscribe();

    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);

    let event = rx.try_recv().unwrap();
    assert_eq!(event.order_id, order_id);
    assert_eq!(event.event_type, shared::order::OrderEventType::TableAssigned);
    assert_eq!(event.sequence, 1);
}
