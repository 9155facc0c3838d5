use super::*;
use crate::orders::error::OrderError;
use crate::orders::model::OrderStatus;

#[tokio::test]
async fn test_create_order_snapshots_and_totals() {
    let rig = rig_with_catalog();

    let order = rig
        .service
        .create_order(&owner(), vec![item("A", 10), item("B", 5)], None)
        .await
        .unwrap();

    // Two lines, in input order
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.lines[0].reference, "PNT-A");
    assert_eq!(order.lines[1].reference, "PNT-B");

    // 10 * 11.30 + 5 * 11.99 = 113.00 + 59.95
    assert_eq!(order.lines[0].subtotal, dec("113.00"));
    assert_eq!(order.lines[1].subtotal, dec("59.95"));
    assert_eq!(order.total, dec("172.95"));

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.user_id, "customer-1");
    assert_eq!(rig.store.len(), 1);
}

#[tokio::test]
async fn test_create_empty_cart_rejected() {
    let rig = rig_with_catalog();

    let err = rig
        .service
        .create_order(&owner(), vec![], None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
    assert!(rig.store.is_empty());
}

#[tokio::test]
async fn test_create_unknown_product_rejected() {
    let rig = rig_with_catalog();

    let err = rig
        .service
        .create_order(&owner(), vec![item("nope", 1)], None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::NotFound(_)));
    assert!(rig.store.is_empty());
}

#[tokio::test]
async fn test_create_inactive_product_rejected() {
    let rig = rig_with_catalog();
    let mut discontinued = paint("C", "PNT-C", "8.50", &[]);
    discontinued.is_active = false;
    rig.catalog.put(discontinued);

    let err = rig
        .service
        .create_order(&owner(), vec![item("C", 1)], None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
    assert!(rig.store.is_empty());
}

#[tokio::test]
async fn test_quantity_rejection_is_atomic() {
    let rig = test_rig();
    rig.catalog
        .put(paint("P", "PNT-P", "9.99", &[5, 10, 15, 20]));

    // 7 is not in the allowed set: rejected, never rounded
    let err = rig
        .service
        .create_order(&owner(), vec![item("P", 7)], None)
        .await
        .unwrap_err();

    match err {
        OrderError::Validation(msg) => {
            assert!(msg.contains("PNT-P"));
            assert!(msg.contains("5, 10, 15, 20"));
        }
        other => panic!("expected Validation, got {:?}", other),
    }
    assert!(rig.store.is_empty());
}

#[tokio::test]
async fn test_first_failing_item_aborts_whole_cart() {
    let rig = rig_with_catalog();

    // A with valid quantity, then A again with a disallowed one
    let err = rig
        .service
        .create_order(&owner(), vec![item("A", 10), item("A", 7)], None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
    assert!(rig.store.is_empty());
}

#[tokio::test]
async fn test_zero_quantity_rejected() {
    let rig = rig_with_catalog();

    let err = rig
        .service
        .create_order(&owner(), vec![item("B", 0)], None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
    assert!(rig.store.is_empty());
}

#[tokio::test]
async fn test_duplicate_product_lines_allowed() {
    let rig = rig_with_catalog();

    let order = rig
        .service
        .create_order(&owner(), vec![item("B", 2), item("B", 3)], None)
        .await
        .unwrap();

    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.lines[0].product_id, "B");
    assert_eq!(order.lines[1].product_id, "B");
    assert_ne!(order.lines[0].line_id, order.lines[1].line_id);
    assert_eq!(order.total, dec("59.95"));
}

#[tokio::test]
async fn test_notes_stored_on_order() {
    let rig = rig_with_catalog();

    let order = rig
        .service
        .create_order(
            &owner(),
            vec![item("B", 1)],
            Some("Deliver to the back door".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(order.notes.as_deref(), Some("Deliver to the back door"));
}

#[tokio::test]
async fn test_snapshots_survive_catalog_price_change() {
    let rig = rig_with_catalog();

    let created = rig
        .service
        .create_order(&owner(), vec![item("A", 10)], None)
        .await
        .unwrap();

    // Catalog price changes after the fact
    rig.catalog.set_price("A", dec("99.99"));

    let fetched = rig.service.get_order(&owner(), &created.id).await.unwrap();
    assert_eq!(fetched.lines, created.lines);
    assert_eq!(fetched.lines[0].unit_price, dec("11.30"));
    assert_eq!(fetched.total, dec("113.00"));
}
