use super::*;

#[test]
fn test_assign_occupied_table_conflicts_with_no_side_effects() {
    let (manager, sink) = create_test_manager();
    let first = anon("A1");
    let (_, table_id) = seat_customer(&manager, 1, &first);

    let second = anon("A2");
    let entry = manager.join_waitlist(second.clone()).unwrap();
    sink.clear();

    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::AssignTable {
            waitlist_entry_id: entry.id.clone(),
            table_id: table_id.clone(),
        },
    ));
    assert!(!response.success);
    let error = response.error.unwrap();
    assert_eq!(error.code, CommandErrorCode::TableOccupied);
    assert_eq!(error.kind(), ErrorKind::Conflict);

    // No order, no wait-list mutation, no notification
    assert_eq!(manager.get_active_orders().unwrap().len(), 1);
    let waiting = manager.waiting_entries().unwrap();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].id, entry.id);
    assert!(sink.delivered().is_empty());
}

#[test]
fn test_assign_customer_with_active_order_conflicts() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (_, _) = seat_customer(&manager, 1, &customer);

    // Same customer queues again and staff tries a second table
    let table2 = manager.create_table(2, 4).unwrap();
    let entry = manager.join_waitlist(customer.clone()).unwrap();
    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::AssignTable {
            waitlist_entry_id: entry.id,
            table_id: table2.id,
        },
    ));
    assert!(!response.success);
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::CustomerAlreadyAssigned
    );
}

#[test]
fn test_empty_cart_is_validation_error() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);

    let response = manager.execute_command(OrderCommand::new(
        customer_actor(&customer),
        OrderCommandPayload::SubmitCart {
            order_id,
            items: vec![],
        },
    ));
    assert!(!response.success);
    let error = response.error.unwrap();
    assert_eq!(error.code, CommandErrorCode::EmptyCart);
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn test_state_ordering_violations() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);

    // Confirming an order that was never placed
    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::ConfirmOrder {
            order_id: order_id.clone(),
        },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::InvalidTransition
    );

    // Delivering before anything is ready
    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::MarkDelivered {
            order_id: order_id.clone(),
        },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::InvalidTransition
    );

    // Paying before delivery
    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::PayOrder {
            order_id: order_id.clone(),
            tip: 0.0,
        },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::InvalidTransition
    );
}

#[test]
fn test_confirm_twice_is_conflict() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(&manager, &order_id, &customer, vec![food("pizza", 100.0, 1)]);
    confirm_order(&manager, &order_id);

    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::ConfirmOrder { order_id },
    ));
    assert!(!response.success);
    let error = response.error.unwrap();
    assert_eq!(error.code, CommandErrorCode::AlreadyInState);
    assert_eq!(error.kind(), ErrorKind::Conflict);
}

#[test]
fn test_begin_preparation_is_idempotent() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(&manager, &order_id, &customer, vec![food("pizza", 100.0, 1)]);
    confirm_order(&manager, &order_id);

    let order = manager.get_order(&order_id).unwrap().unwrap();
    let line_id = order.items[0].line_id.clone();
    let begin = || {
        manager.execute_command_with_events(OrderCommand::new(
            cook(),
            OrderCommandPayload::BeginItemPreparation {
                order_id: order_id.clone(),
                line_id: line_id.clone(),
            },
        ))
    };

    let (response, events) = begin();
    assert!(response.success);
    assert_eq!(events.len(), 1);

    // Re-applying has no additional effect
    let (response, events) = begin();
    assert!(response.success);
    assert!(events.is_empty());

    let order = manager.get_order(&order_id).unwrap().unwrap();
    assert_eq!(order.state, OrderState::Preparing);
}

#[test]
fn test_finish_on_ready_item_does_not_renotify() {
    let (manager, sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(&manager, &order_id, &customer, vec![drink("cafe", 100.0, 1)]);
    confirm_order(&manager, &order_id);

    let order = manager.get_order(&order_id).unwrap().unwrap();
    let line_id = order.items[0].line_id.clone();
    let finish = || {
        manager.execute_command(OrderCommand::new(
            cook(),
            OrderCommandPayload::FinishItemPreparation {
                order_id: order_id.clone(),
                line_id: line_id.clone(),
            },
        ))
    };

    sink.clear();
    assert!(finish().success);
    assert_eq!(intents_of_kind(&sink, NotificationKind::OrderReady).len(), 2);

    sink.clear();
    assert!(finish().success);
    assert!(sink.delivered().is_empty());
}

#[test]
fn test_pay_twice_is_conflict() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(&manager, &order_id, &customer, vec![food("pizza", 100.0, 1)]);
    confirm_order(&manager, &order_id);
    prepare_all_items(&manager, &order_id);
    for payload in [
        OrderCommandPayload::MarkDelivered {
            order_id: order_id.clone(),
        },
        OrderCommandPayload::PayOrder {
            order_id: order_id.clone(),
            tip: 0.0,
        },
    ] {
        assert!(manager.execute_command(OrderCommand::new(waiter(), payload)).success);
    }

    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::PayOrder {
            order_id: order_id.clone(),
            tip: 0.0,
        },
    ));
    assert!(!response.success);
    let error = response.error.unwrap();
    assert_eq!(error.code, CommandErrorCode::AlreadyInState);
    assert_eq!(error.kind(), ErrorKind::Conflict);
}

#[test]
fn test_negative_tip_rejected() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);

    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::PayOrder {
            order_id,
            tip: -5.0,
        },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::InvalidAmount
    );
}

#[test]
fn test_return_requires_reason() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(&manager, &order_id, &customer, vec![food("pizza", 100.0, 1)]);

    let response = manager.execute_command(OrderCommand::new(
        waiter(),
        OrderCommandPayload::ReturnOrder {
            order_id,
            reason: "   ".to_string(),
        },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::ReasonRequired
    );
}

#[test]
fn test_foreign_customer_cannot_touch_order() {
    let (manager, _sink) = create_test_manager();
    let owner = anon("A1");
    let intruder = anon("B2");
    let (order_id, _) = seat_customer(&manager, 1, &owner);

    let response = manager.execute_command(OrderCommand::new(
        customer_actor(&intruder),
        OrderCommandPayload::SubmitCart {
            order_id,
            items: vec![food("pizza", 100.0, 1)],
        },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::RoleNotAllowed
    );
}

#[test]
fn test_customer_cannot_run_staff_actions() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(&manager, &order_id, &customer, vec![food("pizza", 100.0, 1)]);

    let response = manager.execute_command(OrderCommand::new(
        customer_actor(&customer),
        OrderCommandPayload::ConfirmOrder { order_id },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::RoleNotAllowed
    );
}

#[test]
fn test_join_waitlist_twice_conflicts() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    manager.join_waitlist(customer.clone()).unwrap();

    let err = manager.join_waitlist(customer).unwrap_err();
    assert!(matches!(err, ManagerError::AlreadyWaiting(_)));
}

#[test]
fn test_duplicate_table_number_rejected() {
    let (manager, _sink) = create_test_manager();
    manager.create_table(5, 4).unwrap();
    let err = manager.create_table(5, 2).unwrap_err();
    assert!(matches!(err, ManagerError::DuplicateTableNumber(5)));
}

#[test]
fn test_sector_routing() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let (order_id, _) = seat_customer(&manager, 1, &customer);
    submit_cart(
        &manager,
        &order_id,
        &customer,
        vec![
            food("milanesa", 1500.0, 1),
            drink("malbec", 800.0, 1),
            CartLineInput {
                product_id: "p-flan".to_string(),
                name: "flan".to_string(),
                category: ProductCategory::Dessert,
                unit_price: 600.0,
                quantity: 1,
                prep_minutes: 5,
            },
        ],
    );

    // Sector views only see confirmed orders
    assert!(manager.sector_queue(Sector::Kitchen).unwrap().is_empty());
    assert!(manager.sector_queue(Sector::Bar).unwrap().is_empty());

    confirm_order(&manager, &order_id);

    // Kitchen gets food + dessert, bar gets the drink
    let kitchen = manager.sector_queue(Sector::Kitchen).unwrap();
    let bar = manager.sector_queue(Sector::Bar).unwrap();
    assert_eq!(kitchen.len(), 2);
    assert_eq!(bar.len(), 1);
    assert_eq!(bar[0].line.name, "malbec");

    // Finished items leave their queue
    let response = manager.execute_command(OrderCommand::new(
        cook(),
        OrderCommandPayload::FinishItemPreparation {
            order_id: order_id.clone(),
            line_id: bar[0].line.line_id.clone(),
        },
    ));
    assert!(response.success);
    assert!(manager.sector_queue(Sector::Bar).unwrap().is_empty());
    assert_eq!(manager.sector_queue(Sector::Kitchen).unwrap().len(), 2);
}

#[test]
fn test_call_waiter_rejected_for_delivery() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let response = manager.execute_command(OrderCommand::new(
        customer_actor(&customer),
        OrderCommandPayload::PlaceDeliveryOrder {
            customer: customer.clone(),
            address: "Calle Falsa 123".to_string(),
            items: vec![food("pizza", 100.0, 1)],
        },
    ));
    let order_id = response.order_id.unwrap();

    let response = manager.execute_command(OrderCommand::new(
        customer_actor(&customer),
        OrderCommandPayload::CallWaiter { order_id },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::InvalidOperation
    );
}

#[test]
fn test_game_on_unknown_order_fails() {
    let (manager, _sink) = create_test_manager();
    let customer = anon("A1");
    let response = manager.execute_command(OrderCommand::new(
        customer_actor(&customer),
        OrderCommandPayload::RecordGameAttempt {
            order_id: "missing".to_string(),
            customer: customer.clone(),
            game: GameKind::Math,
            won: true,
            attempt_number: 1,
        },
    ));
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::OrderNotFound
    );
}
