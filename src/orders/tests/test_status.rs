use super::*;
use crate::orders::error::OrderError;
use crate::orders::model::OrderStatus;

#[tokio::test]
async fn test_direct_jump_pending_to_shipped() {
    let rig = rig_with_catalog();
    let order = rig
        .service
        .create_order(&owner(), vec![item("A", 10)], None)
        .await
        .unwrap();

    // No intermediate confirmed/processing required
    let updated = rig
        .service
        .set_status(&admin(), &order.id, "shipped")
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn test_every_status_reachable_from_every_other() {
    let rig = rig_with_catalog();
    let order = rig
        .service
        .create_order(&owner(), vec![item("B", 1)], None)
        .await
        .unwrap();

    // Walk the full graph, including backwards moves
    for from in OrderStatus::ALL {
        for to in OrderStatus::ALL {
            rig.service
                .set_status(&admin(), &order.id, from.as_str())
                .await
                .unwrap();
            let updated = rig
                .service
                .set_status(&admin(), &order.id, to.as_str())
                .await
                .unwrap();
            assert_eq!(updated.status, to);
        }
    }
}

#[tokio::test]
async fn test_invalid_status_names_the_valid_set() {
    let rig = rig_with_catalog();
    let order = rig
        .service
        .create_order(&owner(), vec![item("B", 1)], None)
        .await
        .unwrap();

    let err = rig
        .service
        .set_status(&admin(), &order.id, "completed")
        .await
        .unwrap_err();

    match err {
        OrderError::Validation(msg) => {
            for name in [
                "pending",
                "confirmed",
                "processing",
                "shipped",
                "delivered",
                "cancelled",
            ] {
                assert!(msg.contains(name), "message should list {}: {}", name, msg);
            }
        }
        other => panic!("expected Validation, got {:?}", other),
    }

    // Status unchanged after rejection
    let unchanged = rig.service.get_order(&admin(), &order.id).await.unwrap();
    assert_eq!(unchanged.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_owner_cannot_change_status() {
    let rig = rig_with_catalog();
    let order = rig
        .service
        .create_order(&owner(), vec![item("B", 1)], None)
        .await
        .unwrap();

    let err = rig
        .service
        .set_status(&owner(), &order.id, "confirmed")
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));
}

#[tokio::test]
async fn test_status_change_on_missing_order_is_not_found() {
    let rig = rig_with_catalog();

    // Existence first: even an owner probing a hidden id sees NotFound
    let err = rig
        .service
        .set_status(&owner(), "ghost", "confirmed")
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
}

#[tokio::test]
async fn test_status_change_preserves_lines_and_total() {
    let rig = rig_with_catalog();
    let order = rig
        .service
        .create_order(&owner(), vec![item("A", 10), item("B", 5)], None)
        .await
        .unwrap();

    let updated = rig
        .service
        .set_status(&admin(), &order.id, "delivered")
        .await
        .unwrap();
    assert_eq!(updated.lines, order.lines);
    assert_eq!(updated.total, dec("172.95"));
}
