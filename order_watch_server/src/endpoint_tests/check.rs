use actix_web::http::StatusCode;
use chrono::{TimeZone, Utc};
use order_watch_engine::{
    order_types::{LineItem, Money, Order, OrderStatus, ShippingLocation, Snapshot},
    traits::{NotifierError, OrderSourceError, SnapshotStoreError},
};

use super::{
    helpers::{get_request, mock_api, post_request},
    mocks::{MockMessenger, MockSource, MockStore},
};

fn current_orders() -> Vec<Order> {
    vec![
        Order::new("111-1111111-1111111", OrderStatus::Unshipped)
            .with_total(Money::new("USD", "25.00"))
            .with_shipping(ShippingLocation {
                city: Some("Seattle".into()),
                region: Some("WA".into()),
                country_code: Some("US".into()),
            }),
        Order::new("222-2222222-2222222", OrderStatus::Shipped).with_total(Money::new("USD", "9.99")),
    ]
}

fn source_with_current_orders() -> MockSource {
    let mut source = MockSource::new();
    source.expect_list_orders().returning(|_, _| Ok(current_orders()));
    source.expect_list_order_items().returning(|id| match id.as_str() {
        "111-1111111-1111111" => Ok(vec![LineItem::new("Organic Honey", 1)]),
        _ => Ok(vec![LineItem::new("Beeswax Candle", 2)]),
    });
    source
}

fn saved(orders: Vec<Order>) -> Snapshot {
    let last_update_time = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    Snapshot { saved_orders: orders, last_update_time, ..Default::default() }
}

#[actix_web::test]
async fn health() {
    let _ = env_logger::try_init().ok();
    let api = mock_api(MockStore::new(), MockSource::new(), MockMessenger::new());
    let (status, body) = get_request("/health", api).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn first_check_reports_all_orders() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_get().times(1).returning(|| Ok(None));
    store.expect_set().times(1).withf(|s| s.saved_orders == current_orders()).returning(|_| Ok(()));
    let mut notifier = MockMessenger::new();
    notifier.expect_deliver().times(1).returning(|_| Ok(()));
    let api = mock_api(store, source_with_current_orders(), notifier);
    let (status, body) = get_request("/check", api).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "🎊 New Orders 🎉\n- $25.00: Organic Honey in Seattle, WA\n- $9.99: Beeswax Candle\n\n");
}

#[actix_web::test]
async fn shipped_orders_are_reported_on_post() {
    let _ = env_logger::try_init().ok();
    let mut previous = current_orders();
    previous[1].status = OrderStatus::Unshipped;
    let mut store = MockStore::new();
    store.expect_get().returning(move || Ok(Some(saved(previous.clone()))));
    store.expect_set().times(1).returning(|_| Ok(()));
    let mut notifier = MockMessenger::new();
    notifier
        .expect_deliver()
        .times(1)
        .withf(|msg| msg.to_string() == "📦 Shipped Orders 🛫\n- $9.99: Beeswax Candle\n\n")
        .returning(|_| Ok(()));
    let api = mock_api(store, source_with_current_orders(), notifier);
    let (status, body) = post_request("/check", api).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "📦 Shipped Orders 🛫\n- $9.99: Beeswax Candle\n\n");
}

#[actix_web::test]
async fn unchanged_orders_send_nothing() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_get().returning(|| Ok(Some(saved(current_orders()))));
    store.expect_set().times(1).returning(|_| Ok(()));
    let mut notifier = MockMessenger::new();
    notifier.expect_deliver().never();
    let mut source = MockSource::new();
    source.expect_list_orders().returning(|_, _| Ok(current_orders()));
    source.expect_list_order_items().never();
    let api = mock_api(store, source, notifier);
    let (status, body) = get_request("/check", api).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}

#[actix_web::test]
async fn marketplace_failure_is_a_bad_gateway() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_get().returning(|| Ok(None));
    store.expect_set().never();
    let mut source = MockSource::new();
    source.expect_list_orders().returning(|_, _| Err(OrderSourceError::Unavailable("connection refused".into())));
    let mut notifier = MockMessenger::new();
    notifier.expect_deliver().never();
    let api = mock_api(store, source, notifier);
    let (status, body) = get_request("/check", api).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        r#"{"error":"The marketplace could not be queried. The order source is unavailable. connection refused"}"#
    );
}

#[actix_web::test]
async fn delivery_failure_does_not_save_snapshot() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_get().returning(|| Ok(None));
    store.expect_set().never();
    let mut notifier = MockMessenger::new();
    notifier
        .expect_deliver()
        .returning(|_| Err(NotifierError::Rejected { status: 403, message: "Cannot send messages to this user".into() }));
    let api = mock_api(store, source_with_current_orders(), notifier);
    let (status, body) = get_request("/check", api).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Cannot send messages to this user"));
}

#[actix_web::test]
async fn store_failure_is_an_internal_error() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_get().returning(|| Err(SnapshotStoreError::Corrupt("expected value at line 1 column 1".into())));
    store.expect_set().never();
    let mut source = MockSource::new();
    source.expect_list_orders().never();
    let api = mock_api(store, source, MockMessenger::new());
    let (status, body) = get_request("/check", api).await.expect("Request failed");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with(r#"{"error":"The order snapshot could not be loaded or saved."#));
}
