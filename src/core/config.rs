use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::utils::AppError;

/// Server configuration, sourced from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/lacquer".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Create a config with custom overrides (tests, embedded setups)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Path the embedded database lives under
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("lacquer.db")
    }

    /// Create the work directory tree (database + logs)
    pub fn ensure_work_dir_structure(&self) -> Result<(), AppError> {
        let work_dir = PathBuf::from(&self.work_dir);
        for dir in [&work_dir, &work_dir.join("logs")] {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::internal(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
