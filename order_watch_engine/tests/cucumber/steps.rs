use cucumber::{gherkin::Step, then, when};
use order_watch_engine::{
    order_types::{LineItem, Money, Order, OrderId, OrderStatus, ShippingLocation, Snapshot},
    traits::SnapshotStore,
};

use crate::cucumber::OrderWatchWorld;

/// Columns: id, status, and optionally total, city, region, country. Blank cells are treated as unknown.
#[when("the marketplace lists the following orders:")]
async fn list_orders(world: &mut OrderWatchWorld, step: &Step) {
    let table = step.table.as_ref().expect("A table of orders is required");
    let header = &table.rows[0];
    let column = |row: &Vec<String>, name: &str| -> Option<String> {
        header
            .iter()
            .position(|h| h.trim() == name)
            .and_then(|i| row.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    let orders = table.rows[1..]
        .iter()
        .map(|row| {
            let id = column(row, "id").expect("Every order needs an id");
            let status = column(row, "status").unwrap_or_default().parse::<OrderStatus>().unwrap();
            let mut order = Order::new(id, status);
            if let Some(amount) = column(row, "total") {
                order = order.with_total(Money::new("USD".to_string(), amount));
            }
            let shipping = ShippingLocation {
                city: column(row, "city"),
                region: column(row, "region"),
                country_code: column(row, "country"),
            };
            if shipping != ShippingLocation::default() {
                order = order.with_shipping(shipping);
            }
            order
        })
        .collect();
    world.api().source().set_orders(orders);
}

#[when("the marketplace lists no orders")]
async fn list_no_orders(world: &mut OrderWatchWorld) {
    world.api().source().set_orders(vec![]);
}

#[when(expr = "order {word} contains {int} x {string}")]
async fn order_contains(world: &mut OrderWatchWorld, order_id: String, quantity: u32, title: String) {
    world.api().source().set_items(order_id, vec![LineItem::new(title, quantity)]);
}

#[when("a cycle runs")]
async fn run_cycle(world: &mut OrderWatchWorld) {
    world.api().notifier().clear();
    let result = world.api().run_cycle().await.map_err(|e| e.to_string());
    world.last_result = Some(result);
}

#[when("the stored snapshot is overwritten with garbage")]
async fn corrupt_snapshot(world: &mut OrderWatchWorld) {
    sqlx::query("UPDATE documents SET value = 'definitely not json' WHERE key = 'data'")
        .execute(world.api().store().pool())
        .await
        .expect("Error corrupting snapshot");
}

#[then("the notification is:")]
async fn notification_is(world: &mut OrderWatchWorld, step: &Step) {
    let expected = step.docstring.as_ref().expect("A docstring is required");
    assert_eq!(significant_lines(&world.report().message), significant_lines(expected));
    let delivered = world.api().notifier().messages().concat();
    assert_eq!(delivered, world.report().message);
}

#[then("no notification is sent")]
async fn no_notification(world: &mut OrderWatchWorld) {
    assert_eq!(world.report().message, "");
    assert!(world.api().notifier().messages().is_empty());
}

#[then(expr = "{int} message(s) is/are delivered")]
async fn messages_delivered(world: &mut OrderWatchWorld, count: usize) {
    assert_eq!(world.api().notifier().messages().len(), count);
}

#[then(expr = "every delivered message is at most {int} characters long")]
async fn messages_fit(world: &mut OrderWatchWorld, limit: usize) {
    let messages = world.api().notifier().messages();
    assert!(messages.iter().all(|m| m.chars().count() <= limit), "Some messages exceed {limit} characters");
    assert_eq!(messages.concat(), world.report().message);
}

#[then(expr = "the cycle fails with {string}")]
async fn cycle_fails(world: &mut OrderWatchWorld, fragment: String) {
    match world.last_result.as_ref().expect("No cycle has run") {
        Ok(_) => panic!("Expected the cycle to fail"),
        Err(e) => assert!(e.contains(&fragment), "Error '{e}' does not mention '{fragment}'"),
    }
}

#[then(expr = "the snapshot holds {int} order(s)")]
async fn snapshot_holds(world: &mut OrderWatchWorld, count: usize) {
    assert_eq!(stored_snapshot(world).await.saved_orders.len(), count);
}

#[then(expr = "order {word} is tombstoned")]
async fn is_tombstoned(world: &mut OrderWatchWorld, order_id: String) {
    let snapshot = stored_snapshot(world).await;
    assert!(snapshot.deleted_orders.contains_key(&OrderId::from(order_id)));
}

#[then(expr = "order {word} is not tombstoned")]
async fn is_not_tombstoned(world: &mut OrderWatchWorld, order_id: String) {
    let snapshot = stored_snapshot(world).await;
    assert!(!snapshot.deleted_orders.contains_key(&OrderId::from(order_id)));
}

#[then(expr = "{int} order(s) is/are reported as reappeared")]
async fn reappeared(world: &mut OrderWatchWorld, count: usize) {
    assert_eq!(world.report().reappeared.len(), count);
}

async fn stored_snapshot(world: &OrderWatchWorld) -> Snapshot {
    world.api().store().get().await.expect("Error reading snapshot").expect("No snapshot has been saved")
}

fn significant_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}
