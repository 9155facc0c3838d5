//! End-to-end order flow against the embedded database
//! Run: cargo test --test order_persistence

use std::sync::Arc;

use lacquer_server::db::DbService;
use lacquer_server::db::models::ProductCreate;
use lacquer_server::db::repository::{OrderRepository, ProductRepository, UserRepository};
use lacquer_server::orders::{
    Actor, NewOrderItem, OrderService, OrderStatus, OrderStore, RemoveItemOutcome,
};

struct Harness {
    service: OrderService,
    products: ProductRepository,
    orders: OrderRepository,
    users: UserRepository,
    _tmp: tempfile::TempDir,
}

async fn harness() -> Harness {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().to_string_lossy())
        .await
        .unwrap()
        .db;

    let products = ProductRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());
    let users = UserRepository::new(db.clone());
    let service = OrderService::new(
        Arc::new(products.clone()),
        Arc::new(orders.clone()),
    );

    Harness {
        service,
        products,
        orders,
        users,
        _tmp: tmp,
    }
}

fn paint(reference: &str, price: &str, allowed: Vec<u32>) -> ProductCreate {
    ProductCreate {
        reference: reference.to_string(),
        name_en: format!("{} (EN)", reference),
        name_fr: format!("{} (FR)", reference),
        price: price.parse().unwrap(),
        size: None,
        color: None,
        allowed_quantities: Some(allowed),
        related_products: None,
    }
}

#[tokio::test]
async fn order_round_trip_snapshots_survive_price_change() {
    let h = harness().await;

    let product = h
        .products
        .create(paint("pnt-blanc", "11.30", vec![10, 30, 50, 60]))
        .await
        .unwrap();
    // References are normalized to uppercase on write
    assert_eq!(product.reference, "PNT-BLANC");
    let product_id = product.id.as_ref().unwrap().key().to_string();

    let owner = Actor::customer("user:alice");
    let order = h
        .service
        .create_order(
            &owner,
            vec![NewOrderItem {
                product_id: product_id.clone(),
                quantity: 10,
            }],
            None,
        )
        .await
        .unwrap();
    assert_eq!(order.total, "113.00".parse().unwrap());

    // Price change after the fact must not touch the stored line
    h.products
        .update(
            &product_id,
            lacquer_server::db::models::ProductUpdate {
                price: Some("99.99".parse().unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored = h.orders.get(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.lines[0].unit_price, "11.30".parse().unwrap());
    assert_eq!(stored.total, "113.00".parse().unwrap());
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn removing_last_item_deletes_the_stored_order() {
    let h = harness().await;

    let product = h
        .products
        .create(paint("PNT-NOIR", "5.00", vec![]))
        .await
        .unwrap();
    let product_id = product.id.as_ref().unwrap().key().to_string();

    let owner = Actor::customer("user:bob");
    let order = h
        .service
        .create_order(
            &owner,
            vec![NewOrderItem {
                product_id,
                quantity: 2,
            }],
            None,
        )
        .await
        .unwrap();

    let outcome = h.service.remove_item(&owner, &order.id, 0).await.unwrap();
    assert!(matches!(outcome, RemoveItemOutcome::Deleted));
    assert!(h.orders.get(&order.id).await.unwrap().is_none());
}

#[tokio::test]
async fn stale_revision_write_is_rejected() {
    let h = harness().await;

    let product = h
        .products
        .create(paint("PNT-GRIS", "7.50", vec![]))
        .await
        .unwrap();
    let product_id = product.id.as_ref().unwrap().key().to_string();

    let owner = Actor::customer("user:carol");
    let order = h
        .service
        .create_order(
            &owner,
            vec![NewOrderItem {
                product_id,
                quantity: 3,
            }],
            None,
        )
        .await
        .unwrap();

    // First writer wins
    let mut first = order.clone();
    first.status = OrderStatus::Confirmed;
    first.revision = order.revision + 1;
    h.orders.update(&first, order.revision).await.unwrap();

    // Second writer raced on the same starting revision and must fail
    let mut second = order.clone();
    second.status = OrderStatus::Cancelled;
    second.revision = order.revision + 1;
    let err = h.orders.update(&second, order.revision).await.unwrap_err();
    assert!(matches!(
        err,
        lacquer_server::orders::OrderError::Conflict(_)
    ));

    let stored = h.orders.get(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn read_back_ids_stay_plain_and_usable() {
    let h = harness().await;

    let product = h
        .products
        .create(paint("PNT-BLEU", "6.00", vec![]))
        .await
        .unwrap();
    let product_id = product.id.as_ref().unwrap().key().to_string();

    let owner = Actor::customer("user:dave");
    let order = h
        .service
        .create_order(
            &owner,
            vec![NewOrderItem {
                product_id,
                quantity: 4,
            }],
            None,
        )
        .await
        .unwrap();

    // Both read paths must return the exact key the order was stored under,
    // with no record-key escaping leaking into the id
    let fetched = h.orders.get(&order.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, order.id);

    let page = lacquer_server::utils::PageQuery::default();
    let (listed, _) = h
        .orders
        .find_page_for_user("user:dave", &page)
        .await
        .unwrap();
    assert_eq!(listed[0].id, order.id);
    assert!(!listed[0].id.contains('`'));

    // A mutation keyed on a read-back id must hit the stored record
    let admin = Actor::admin("user:root");
    let updated = h
        .service
        .set_status(&admin, &listed[0].id, "confirmed")
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Confirmed);

    let stored = h.orders.get(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn listing_filters_by_user_and_status() {
    let h = harness().await;

    let product = h
        .products
        .create(paint("PNT-VERT", "3.25", vec![]))
        .await
        .unwrap();
    let product_id = product.id.as_ref().unwrap().key().to_string();

    let alice = Actor::customer("user:alice");
    let bob = Actor::customer("user:bob");
    let admin = Actor::admin("user:root");

    let a1 = h
        .service
        .create_order(
            &alice,
            vec![NewOrderItem {
                product_id: product_id.clone(),
                quantity: 1,
            }],
            None,
        )
        .await
        .unwrap();
    h.service
        .create_order(
            &bob,
            vec![NewOrderItem {
                product_id,
                quantity: 2,
            }],
            None,
        )
        .await
        .unwrap();

    h.service
        .set_status(&admin, &a1.id, "shipped")
        .await
        .unwrap();

    let page = lacquer_server::utils::PageQuery::default();
    let (mine, total) = h
        .orders
        .find_page_for_user("user:alice", &page)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, a1.id);

    let (shipped, shipped_total) = h
        .orders
        .find_page(Some(OrderStatus::Shipped), &page)
        .await
        .unwrap();
    assert_eq!(shipped_total, 1);
    assert_eq!(shipped[0].status, OrderStatus::Shipped);

    let (all, all_total) = h.orders.find_page(None, &page).await.unwrap();
    assert_eq!(all_total, 2);
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let h = harness().await;

    let err = h
        .products
        .create(paint("PNT-ROUGE", "-1.00", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        lacquer_server::db::repository::RepoError::Validation(_)
    ));

    let product = h
        .products
        .create(paint("PNT-ROUGE", "1.00", vec![]))
        .await
        .unwrap();
    let product_id = product.id.as_ref().unwrap().key().to_string();
    let err = h
        .products
        .update(
            &product_id,
            lacquer_server::db::models::ProductUpdate {
                price: Some("-0.01".parse().unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        lacquer_server::db::repository::RepoError::Validation(_)
    ));

    // The stored price is untouched by the failed update
    let stored = h.products.find_by_id(&product_id).await.unwrap().unwrap();
    assert_eq!(stored.price, "1.00".parse().unwrap());
}

#[tokio::test]
async fn duplicate_email_and_reference_are_rejected() {
    let h = harness().await;

    h.users
        .create(
            "Alice".into(),
            "alice@example.com".into(),
            "correct-horse-battery",
            "user".into(),
        )
        .await
        .unwrap();
    let err = h
        .users
        .create(
            "Alice Again".into(),
            "ALICE@example.com".into(),
            "correct-horse-battery",
            "user".into(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        lacquer_server::db::repository::RepoError::Duplicate(_)
    ));

    h.products
        .create(paint("PNT-OCRE", "4.00", vec![]))
        .await
        .unwrap();
    let err = h
        .products
        .create(paint("pnt-ocre", "4.50", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        lacquer_server::db::repository::RepoError::Duplicate(_)
    ));
}
