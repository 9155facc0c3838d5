//! Startup seeding
//!
//! A fresh database gets one admin account from the environment so the store
//! is administrable before any registration happens.

use crate::db::repository::UserRepository;
use crate::utils::AppError;

const DEFAULT_ADMIN_EMAIL: &str = "admin@lacquer.local";
const DEV_ADMIN_PASSWORD: &str = "admin123";

/// Create the default admin when the user table is empty
///
/// Without `ADMIN_PASSWORD`, development gets the well-known default;
/// production skips seeding instead.
pub async fn ensure_default_admin(
    users: &UserRepository,
    is_production: bool,
) -> Result<(), AppError> {
    if !users.is_empty().await.map_err(AppError::from)? {
        return Ok(());
    }

    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let password =
        match resolve_admin_password(std::env::var("ADMIN_PASSWORD").ok(), is_production)? {
            Some(p) => p,
            None => return Ok(()),
        };

    let admin = users
        .create("Administrator".to_string(), email, &password, "admin".to_string())
        .await
        .map_err(AppError::from)?;
    tracing::info!("Seeded default admin account {}", admin.email);
    Ok(())
}

fn resolve_admin_password(
    configured: Option<String>,
    is_production: bool,
) -> Result<Option<String>, AppError> {
    match configured {
        Some(p) if p.len() >= 8 => Ok(Some(p)),
        Some(_) => Err(AppError::Validation(
            "ADMIN_PASSWORD must be at least 8 characters".to_string(),
        )),
        None if is_production => {
            tracing::warn!("ADMIN_PASSWORD not set; skipping default admin creation");
            Ok(None)
        }
        None => {
            tracing::warn!(
                "ADMIN_PASSWORD not set; seeding admin with the development default password"
            );
            Ok(Some(DEV_ADMIN_PASSWORD.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_password_wins() {
        let resolved = resolve_admin_password(Some("super-secret-pass".into()), true).unwrap();
        assert_eq!(resolved.as_deref(), Some("super-secret-pass"));
    }

    #[test]
    fn test_short_password_is_rejected() {
        assert!(resolve_admin_password(Some("short".into()), false).is_err());
    }

    #[test]
    fn test_development_falls_back_to_default() {
        let resolved = resolve_admin_password(None, false).unwrap();
        assert_eq!(resolved.as_deref(), Some(DEV_ADMIN_PASSWORD));
    }

    #[test]
    fn test_production_skips_without_password() {
        assert_eq!(resolve_admin_password(None, true).unwrap(), None);
    }
}
