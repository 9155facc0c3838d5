//! Authorization guard for order operations
//!
//! Existence is always checked before permissions (the service layer only
//! calls into the guard with a loaded order), so a missing order yields
//! `NotFound` for every role and the error shape never reveals whether a
//! hidden order exists.
//!
//! | Operation          | Owner allowed when  | Admin           |
//! |--------------------|---------------------|-----------------|
//! | View               | always              | yes             |
//! | Remove item/cancel | status == pending   | yes, any status |
//! | Change status      | never               | yes, any status |

use super::error::{OrderError, OrderResult};
use super::model::{Actor, Order, OrderStatus};

/// View: owner or admin
pub fn ensure_can_view(order: &Order, actor: &Actor) -> OrderResult<()> {
    if actor.is_admin() || order.is_owned_by(&actor.user_id) {
        return Ok(());
    }
    Err(OrderError::Forbidden(
        "Not authorized to view this order".into(),
    ))
}

/// Mutation (item removal, cancellation): admin any status, owner only while
/// the order is still pending
pub fn ensure_can_modify(order: &Order, actor: &Actor) -> OrderResult<()> {
    if actor.is_admin() {
        return Ok(());
    }
    if !order.is_owned_by(&actor.user_id) {
        return Err(OrderError::Forbidden(
            "Not authorized to modify this order".into(),
        ));
    }
    if order.status != OrderStatus::Pending {
        return Err(OrderError::Forbidden(
            "Cannot modify order that is not pending".into(),
        ));
    }
    Ok(())
}

/// Status changes and hard deletes are admin-only
pub fn ensure_admin(actor: &Actor) -> OrderResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(OrderError::Forbidden("Admin access required".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::model::{Order, OrderLine};
    use rust_decimal::Decimal;

    fn pending_order(owner: &str) -> Order {
        let line = OrderLine::new("p1", "REF-1", "Matte White", "1L", 1, Decimal::new(1130, 2));
        Order::new(owner, vec![line], None)
    }

    #[test]
    fn test_owner_can_view_and_modify_pending() {
        let order = pending_order("u1");
        let owner = Actor::customer("u1");
        assert!(ensure_can_view(&order, &owner).is_ok());
        assert!(ensure_can_modify(&order, &owner).is_ok());
    }

    #[test]
    fn test_stranger_cannot_view_or_modify() {
        let order = pending_order("u1");
        let stranger = Actor::customer("u2");
        assert!(matches!(
            ensure_can_view(&order, &stranger),
            Err(OrderError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_can_modify(&order, &stranger),
            Err(OrderError::Forbidden(_))
        ));
    }

    #[test]
    fn test_owner_cannot_modify_non_pending() {
        let mut order = pending_order("u1");
        order.status = OrderStatus::Shipped;
        let owner = Actor::customer("u1");
        assert!(ensure_can_view(&order, &owner).is_ok());
        assert!(matches!(
            ensure_can_modify(&order, &owner),
            Err(OrderError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_can_modify_any_status() {
        let mut order = pending_order("u1");
        order.status = OrderStatus::Delivered;
        let admin = Actor::admin("root");
        assert!(ensure_can_modify(&order, &admin).is_ok());
        assert!(ensure_admin(&admin).is_ok());
    }

    #[test]
    fn test_customer_is_never_admin() {
        let customer = Actor::customer("u1");
        assert!(matches!(
            ensure_admin(&customer),
            Err(OrderError::Forbidden(_))
        ));
    }
}
