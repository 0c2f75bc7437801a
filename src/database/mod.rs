//! Database access layer with domain-specific DAOs
//!
//! This module provides direct database access without abstraction layers.
//! Each domain (products, purchases, sales) has its own DAO for focused
//! operations.

use crate::config::Config;
use crate::health::HealthChecker;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};
use thiserror::Error;

pub mod config;
pub mod dao;
pub mod entities;
pub mod migration;

pub use dao::{ProductsDao, PurchasesDao, SalesDao};

/// Database error types
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Record not found")]
    NotFound,
    #[error("Migration error: {0}")]
    Migration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database manager trait for dependency injection and testing
#[async_trait]
pub trait DatabaseManager: Send + Sync {
    /// Run database migrations
    async fn migrate(&self) -> DatabaseResult<()>;

    /// Health check for database connection
    async fn health_check(&self) -> DatabaseResult<()>;

    /// Get products DAO
    fn products(&self) -> ProductsDao;

    /// Get purchases DAO
    fn purchases(&self) -> PurchasesDao;

    /// Get sales DAO
    fn sales(&self) -> SalesDao;

    /// Get direct database connection (for migrations and admin operations)
    fn connection(&self) -> &DatabaseConnection;
}

/// Database connection manager implementation
pub struct DatabaseManagerImpl {
    pub connection: DatabaseConnection,
}

impl DatabaseManagerImpl {
    /// Create database manager from configuration
    pub async fn new_from_config(config: &Config) -> Result<Self, DatabaseError> {
        let mut options = ConnectOptions::new(config.database.url.clone());
        if config.database.url.contains(":memory:") {
            // A pooled in-memory SQLite database gives each connection its own schema
            options.max_connections(1).min_connections(1);
        } else {
            options.max_connections(config.database.max_connections);
        }

        let connection = sea_orm::Database::connect(options)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl DatabaseManager for DatabaseManagerImpl {
    /// Run database migrations
    async fn migrate(&self) -> DatabaseResult<()> {
        use crate::database::migration::Migrator;
        use sea_orm_migration::MigratorTrait;

        tracing::info!("Running database migrations");

        Migrator::up(&self.connection, None)
            .await
            .map_err(|e| DatabaseError::Migration(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Successfully completed all migrations");
        Ok(())
    }

    /// Health check for database connection
    async fn health_check(&self) -> DatabaseResult<()> {
        self.connection
            .ping()
            .await
            .map_err(|e| DatabaseError::Database(format!("db error: {}", e)))
    }

    /// Get products DAO
    fn products(&self) -> ProductsDao {
        ProductsDao::new(self.connection.clone())
    }

    /// Get purchases DAO
    fn purchases(&self) -> PurchasesDao {
        PurchasesDao::new(self.connection.clone())
    }

    /// Get sales DAO
    fn sales(&self) -> SalesDao {
        SalesDao::new(self.connection.clone())
    }

    /// Get direct database connection (for migrations and admin operations)
    fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

#[async_trait]
impl HealthChecker for DatabaseManagerImpl {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> crate::health::HealthCheckResult {
        match self.health_check().await {
            Ok(_) => crate::health::HealthCheckResult::healthy_with_details(serde_json::json!({
                "status": "healthy",
                "connection": "ok"
            })),
            Err(err) => crate::health::HealthCheckResult::unhealthy_with_details(
                "DB health check failed".to_string(),
                serde_json::json!({
                    "status": "unhealthy",
                    "error": err.to_string()
                }),
            ),
        }
    }
}
