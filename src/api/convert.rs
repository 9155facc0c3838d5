//! API view types
//!
//! Orders store only the owner's user id; admin listings hydrate a small
//! owner summary at read time so responses stay self-describing without
//! denormalizing user data into the order rows.

use serde::Serialize;
use std::collections::HashMap;

use crate::db::repository::UserRepository;
use crate::orders::Order;
use crate::utils::{AppError, AppResult};

/// Owner summary embedded in admin order views
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Order plus its hydrated owner
#[derive(Debug, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub owner: Option<OwnerSummary>,
}

/// Hydrate a single order's owner
pub async fn hydrate_owner(users: &UserRepository, order: Order) -> AppResult<OrderView> {
    let owner = users
        .find_by_id(&order.user_id)
        .await
        .map_err(AppError::from)?
        .map(|u| OwnerSummary {
            id: u.id_string(),
            name: u.name,
            email: u.email,
        });
    Ok(OrderView { order, owner })
}

/// Hydrate owner summaries for a page of orders, one lookup per distinct user
pub async fn hydrate_owners(
    users: &UserRepository,
    orders: Vec<Order>,
) -> AppResult<Vec<OrderView>> {
    let mut cache: HashMap<String, Option<OwnerSummary>> = HashMap::new();

    let mut views = Vec::with_capacity(orders.len());
    for order in orders {
        if !cache.contains_key(&order.user_id) {
            let summary = users
                .find_by_id(&order.user_id)
                .await
                .map_err(AppError::from)?
                .map(|u| OwnerSummary {
                    id: u.id_string(),
                    name: u.name,
                    email: u.email,
                });
            cache.insert(order.user_id.clone(), summary);
        }
        let owner = cache.get(&order.user_id).cloned().flatten();
        views.push(OrderView { order, owner });
    }
    Ok(views)
}
