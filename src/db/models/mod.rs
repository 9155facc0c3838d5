//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod password_reset;
pub mod user;

// Catalog
pub mod product;

// Orders
pub mod order;

// Re-exports
pub use order::{ORDER_TABLE, OrderRecord};
pub use password_reset::{PasswordResetRequest, ResetStatus};
pub use product::{Product, ProductCreate, ProductId, ProductUpdate, default_allowed_quantities};
pub use user::{User, UserId, UserPublic};
