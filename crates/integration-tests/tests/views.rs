//! Live views against an in-memory transport: refresh tickets, optimistic
//! mutations and rollback.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::Notify;

use tanawal_admin::client::Method;
use tanawal_admin::repositories::StatusChange;
use tanawal_admin::{AdminError, FoodView, Refresh, View};
use tanawal_core::normalize::normalize_collection;
use tanawal_core::{
    Availability, Delivery, DeliveryId, DeliveryStatus, Food, FoodId, MutationError, OrderStatus,
    Purchase, PurchaseId, Settled, User, UserId, UserStatus,
};
use tanawal_integration_tests::{FakeTransport, Reply};

fn foods() -> Vec<Food> {
    normalize_collection(&json!({ "Foods": [
        { "FoodID": 1, "FoodName": "Chicken Karahi", "IsAvailable": true, "Price": 1200 },
        { "FoodID": 2, "FoodName": "Daal Chawal", "IsAvailable": false, "Price": 450 },
        { "FoodID": 3, "FoodName": "Gulab Jamun", "IsAvailable": "yes", "Price": 300 },
    ]}))
}

fn food_view() -> (Arc<FakeTransport>, FoodView<Arc<FakeTransport>>) {
    let transport = Arc::new(FakeTransport::new());
    let view = View::with_records(Arc::clone(&transport), foods());
    (transport, view)
}

async fn availability(view: &FoodView<Arc<FakeTransport>>, id: i64) -> Availability {
    view.get(FoodId::new(id)).await.unwrap().availability
}

// =============================================================================
// Refresh
// =============================================================================

#[tokio::test]
async fn test_refresh_loads_admin_food_list() {
    let transport = Arc::new(FakeTransport::new());
    transport.script(
        "GET GetFoodList",
        Reply::ok(json!({ "Value": { "Foods": [{ "FoodID": 8, "FoodName": "Haleem" }] } })),
    );
    let view: FoodView<_> = View::new(Arc::clone(&transport));

    assert_eq!(view.refresh().await.unwrap(), Refresh::Applied(1));
    assert_eq!(view.len().await, 1);

    let requests = transport.requests_to("GET GetFoodList");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests.first().unwrap().query,
        vec![("admin".to_string(), "true".to_string())]
    );
}

#[tokio::test]
async fn test_failed_refresh_keeps_records() {
    let (transport, view) = food_view();
    transport.script("GET GetFoodList", Reply::status(503));

    let err = view.refresh().await.unwrap_err();
    assert!(matches!(err, AdminError::Api(_)));
    assert_eq!(view.len().await, 3);
}

#[tokio::test]
async fn test_stale_refresh_is_discarded() {
    let (transport, view) = food_view();
    let gate = Arc::new(Notify::new());
    transport.script(
        "GET GetFoodList",
        Reply::ok(json!([{ "FoodID": 100 }])).held_by(&gate),
    );
    transport.script("GET GetFoodList", Reply::ok(json!([{ "FoodID": 200 }])));

    let (older, newer) = tokio::join!(view.refresh(), async {
        let newer = view.refresh().await;
        gate.notify_one();
        newer
    });

    assert_eq!(older.unwrap(), Refresh::Stale);
    assert_eq!(newer.unwrap(), Refresh::Applied(1));
    let ids: Vec<FoodId> = view.snapshot().await.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![FoodId::new(200)]);
}

// =============================================================================
// Food availability
// =============================================================================

#[tokio::test]
async fn test_toggle_commits_and_sends_body() {
    let (transport, view) = food_view();

    let now = view.toggle_availability(FoodId::new(1)).await.unwrap();

    assert_eq!(now, Availability::Unavailable);
    assert_eq!(availability(&view, 1).await, Availability::Unavailable);
    let request = transport.requests_to("PUT UpdateFoodList").pop().unwrap();
    assert_eq!(request.body, Some(json!({ "id": 1, "isAvailable": false })));
    assert_eq!(view.busy_id().await, None);
}

#[tokio::test]
async fn test_toggle_failure_reverts_only_that_food() {
    let (transport, view) = food_view();
    transport.script("PUT UpdateFoodList", Reply::status(500));
    let before = view.snapshot().await;

    let err = view.toggle_availability(FoodId::new(2)).await.unwrap_err();

    assert!(matches!(err, AdminError::Api(_)));
    let after = view.snapshot().await;
    assert_eq!(
        serde_json::to_value(&before).unwrap(),
        serde_json::to_value(&after).unwrap()
    );
    assert_eq!(availability(&view, 2).await, Availability::Unavailable);
}

#[tokio::test]
async fn test_toggle_is_applied_before_the_call_returns() {
    let (transport, view) = food_view();
    let gate = Arc::new(Notify::new());
    transport.script("PUT UpdateFoodList", Reply::status(500).held_by(&gate));

    let (result, seen_while_pending) = tokio::join!(view.toggle_availability(FoodId::new(3)), async {
        let seen = availability(&view, 3).await;
        gate.notify_one();
        seen
    });

    assert_eq!(seen_while_pending, Availability::Unavailable);
    assert!(result.is_err());
    assert_eq!(availability(&view, 3).await, Availability::Available);
}

#[tokio::test]
async fn test_second_mutation_is_refused_while_one_is_in_flight() {
    let (transport, view) = food_view();
    let gate = Arc::new(Notify::new());
    transport.script("PUT UpdateFoodList", Reply::ok(json!({})).held_by(&gate));

    let (first, second) = tokio::join!(view.toggle_availability(FoodId::new(1)), async {
        let busy = view.busy_id().await;
        let second = view.toggle_availability(FoodId::new(2)).await;
        gate.notify_one();
        (busy, second)
    });

    assert_eq!(first.unwrap(), Availability::Unavailable);
    let (busy, second) = second;
    assert_eq!(busy, Some(FoodId::new(1)));
    assert!(matches!(
        second,
        Err(AdminError::Mutation(MutationError::Busy(_)))
    ));
    assert_eq!(availability(&view, 2).await, Availability::Unavailable);
    assert_eq!(transport.requests_to("PUT UpdateFoodList").len(), 1);
}

#[tokio::test]
async fn test_refresh_during_mutation_wins_over_rollback() {
    let (transport, view) = food_view();
    let gate = Arc::new(Notify::new());
    transport.script("PUT UpdateFoodList", Reply::status(500).held_by(&gate));
    transport.script(
        "GET GetFoodList",
        Reply::ok(json!([{ "FoodID": 1, "IsAvailable": false }])),
    );

    let (toggle, refresh) = tokio::join!(view.toggle_availability(FoodId::new(1)), async {
        let refresh = view.refresh().await;
        gate.notify_one();
        refresh
    });

    assert_eq!(refresh.unwrap(), Refresh::Applied(1));
    assert!(toggle.is_err());
    assert_eq!(view.len().await, 1);
    assert_eq!(availability(&view, 1).await, Availability::Unavailable);
}

#[tokio::test]
async fn test_abandoned_toggle_is_rolled_back() {
    let (transport, view) = food_view();
    let gate = Arc::new(Notify::new());
    transport.script("PUT UpdateFoodList", Reply::ok(json!({})).held_by(&gate));

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        view.toggle_availability(FoodId::new(1)),
    )
    .await;

    assert!(timed_out.is_err());
    assert_eq!(view.busy_id().await, None);
    assert_eq!(availability(&view, 1).await, Availability::Available);

    let next = view.toggle_availability(FoodId::new(2)).await.unwrap();
    assert_eq!(next, Availability::Available);
    assert_eq!(transport.requests_to("PUT UpdateFoodList").len(), 2);
}

#[tokio::test]
async fn test_abandoned_delete_restores_position() {
    let (transport, view) = food_view();
    let gate = Arc::new(Notify::new());
    transport.script("DELETE DeleteFoodList/2", Reply::ok(json!({})).held_by(&gate));

    let timed_out =
        tokio::time::timeout(Duration::from_millis(50), view.delete(FoodId::new(2))).await;

    assert!(timed_out.is_err());
    assert_eq!(view.busy_id().await, None);
    let ids: Vec<i64> = view.snapshot().await.iter().map(|f| f.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_unknown_food_is_not_found() {
    let (transport, view) = food_view();
    let err = view.toggle_availability(FoodId::new(99)).await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound(_)));
    let err = view.delete(FoodId::new(99)).await.unwrap_err();
    assert!(matches!(
        err,
        AdminError::Mutation(MutationError::NotFound(_))
    ));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_failed_delete_restores_position() {
    let (transport, view) = food_view();
    transport.script("DELETE DeleteFoodList/2", Reply::status(409));

    assert!(view.delete(FoodId::new(2)).await.is_err());

    let ids: Vec<i64> = view.snapshot().await.iter().map(|f| f.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// =============================================================================
// Users, orders, deliveries
// =============================================================================

#[tokio::test]
async fn test_block_user_sends_actor_and_reverts_on_failure() {
    let transport = Arc::new(FakeTransport::new());
    let users: Vec<User> = normalize_collection(&json!({ "Users": [
        { "UserID": 5, "FirstName": "Ayesha", "Status": "active" },
    ]}));
    let view = View::with_records(Arc::clone(&transport), users);
    let change = StatusChange {
        block: true,
        reason: Some("chargeback".to_string()),
        acted_by_user_id: Some(UserId::new(1)),
    };

    let settled = view.set_blocked(UserId::new(5), &change).await.unwrap();
    assert_eq!(settled, Settled::Committed);
    assert_eq!(view.get(UserId::new(5)).await.unwrap().status, UserStatus::Blocked);

    let request = transport.requests().pop().unwrap();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "ChangeUserStatus");
    assert_eq!(
        request.query,
        vec![("UserId".to_string(), "5".to_string())]
    );
    assert_eq!(
        request.body,
        Some(json!({ "block": true, "reason": "chargeback", "actedByUserId": 1 }))
    );

    transport.script("PUT ChangeUserStatus", Reply::status(500));
    let unblock = StatusChange {
        block: false,
        reason: None,
        acted_by_user_id: None,
    };
    assert!(view.set_blocked(UserId::new(5), &unblock).await.is_err());
    assert_eq!(view.get(UserId::new(5)).await.unwrap().status, UserStatus::Blocked);
}

#[tokio::test]
async fn test_order_status_update() {
    let transport = Arc::new(FakeTransport::new());
    let orders: Vec<Purchase> = normalize_collection(&json!([
        { "PurchaseID": 31, "FoodName": "Biryani", "Status": 0, "FinalPrice": "650" },
    ]));
    let view = View::with_records(Arc::clone(&transport), orders);

    view.set_status(PurchaseId::new(31), OrderStatus::InProgress, Some("rider late".to_string()))
        .await
        .unwrap();

    let order = view.get(PurchaseId::new(31)).await.unwrap();
    assert_eq!(order.status, OrderStatus::InProgress);
    assert_eq!(order.note.as_deref(), Some("rider late"));
    let request = transport.requests_to("PUT UpdateOrder").pop().unwrap();
    assert_eq!(
        request.body,
        Some(json!({ "purchaseId": 31, "status": "in_progress", "note": "rider late" }))
    );
}

#[tokio::test]
async fn test_delivery_cancel_keeps_record() {
    let transport = Arc::new(FakeTransport::new());
    let deliveries: Vec<Delivery> = normalize_collection(&json!({ "Deliveries": [
        { "DeliveryID": 7, "OrderID": 31, "Status": "assigned", "DeliveryFee": 150 },
        { "DeliveryID": 8, "OrderID": 32, "Status": 3, "DeliveryFee": 200 },
    ]}));
    let view = View::with_records(Arc::clone(&transport), deliveries);

    view.cancel(DeliveryId::new(7)).await.unwrap();

    assert_eq!(view.len().await, 2);
    assert_eq!(
        view.get(DeliveryId::new(7)).await.unwrap().status,
        DeliveryStatus::Cancelled
    );
    assert_eq!(
        view.get(DeliveryId::new(8)).await.unwrap().status,
        DeliveryStatus::InTransit
    );
    assert_eq!(transport.requests_to("DELETE Deliveries/7").len(), 1);
}
