use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
    pub duration_ms: Option<u64>,
}

impl HealthCheckResult {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            details: None,
            duration_ms: None,
        }
    }

    pub fn healthy_with_details(details: serde_json::Value) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            details: Some(details),
            duration_ms: None,
        }
    }

    pub fn unhealthy_with_details(message: String, details: serde_json::Value) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message),
            details: Some(details),
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

#[async_trait]
pub trait HealthChecker: Send + Sync {
    /// The name of this health check component
    fn name(&self) -> &str;

    /// Perform the health check
    async fn check(&self) -> HealthCheckResult;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallHealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub checks: HashMap<String, HealthCheckResult>,
    pub summary: HealthSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total_checks: usize,
    pub healthy_count: usize,
    pub unhealthy_count: usize,
    pub total_duration_ms: u64,
}

/// Aggregates health checks from registered components (database, etc.)
pub struct HealthService {
    checkers: Arc<RwLock<HashMap<String, Arc<dyn HealthChecker>>>>,
}

impl HealthService {
    pub fn new() -> Self {
        Self {
            checkers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a health checker for a specific component
    pub async fn register(&self, checker: Arc<dyn HealthChecker>) {
        let name = checker.name().to_string();
        let mut checkers = self.checkers.write().await;
        checkers.insert(name, checker);
    }

    /// Run all health checks or specific ones based on filter
    pub async fn check_health(&self, filter: Option<&str>) -> OverallHealthResponse {
        let checkers = self.checkers.read().await;
        let mut results = HashMap::new();
        let mut total_duration = 0u64;

        // Determine which checks to run
        let checks_to_run: Vec<_> = match filter {
            Some("all") => checkers.iter().collect(),
            Some(specific) => checkers
                .iter()
                .filter(|(name, _)| name.as_str() == specific)
                .collect(),
            None => vec![], // No specific checks requested, just basic liveness
        };

        for (name, checker) in checks_to_run {
            let start = Instant::now();
            let mut result = checker.check().await;
            let duration = start.elapsed().as_millis() as u64;
            result = result.with_duration(duration);
            total_duration += duration;
            results.insert(name.clone(), result);
        }

        let healthy_count = results
            .values()
            .filter(|r| r.status == HealthStatus::Healthy)
            .count();
        let unhealthy_count = results.len() - healthy_count;

        let status = if unhealthy_count > 0 {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };

        OverallHealthResponse {
            status,
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary: HealthSummary {
                total_checks: results.len(),
                healthy_count,
                unhealthy_count,
                total_duration_ms: total_duration,
            },
            checks: results,
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticChecker {
        name: String,
        healthy: bool,
    }

    #[async_trait]
    impl HealthChecker for StaticChecker {
        fn name(&self) -> &str {
            &self.name
        }

        async fn check(&self) -> HealthCheckResult {
            if self.healthy {
                HealthCheckResult::healthy()
            } else {
                HealthCheckResult::unhealthy_with_details(
                    "down".to_string(),
                    serde_json::json!({ "status": "unhealthy" }),
                )
            }
        }
    }

    #[tokio::test]
    async fn test_basic_health_runs_no_checks() {
        let service = HealthService::new();
        service
            .register(Arc::new(StaticChecker {
                name: "database".to_string(),
                healthy: true,
            }))
            .await;

        let response = service.check_health(None).await;
        assert_eq!(response.status, HealthStatus::Healthy);
        assert!(response.checks.is_empty());
    }

    #[tokio::test]
    async fn test_check_all() {
        let service = HealthService::new();
        service
            .register(Arc::new(StaticChecker {
                name: "database".to_string(),
                healthy: true,
            }))
            .await;

        let response = service.check_health(Some("all")).await;
        assert_eq!(response.summary.total_checks, 1);
        assert_eq!(response.summary.healthy_count, 1);
        assert_eq!(response.status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_unhealthy_component_degrades_overall_status() {
        let service = HealthService::new();
        service
            .register(Arc::new(StaticChecker {
                name: "database".to_string(),
                healthy: false,
            }))
            .await;

        let response = service.check_health(Some("all")).await;
        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(response.summary.unhealthy_count, 1);
    }

    #[tokio::test]
    async fn test_check_specific_component() {
        let service = HealthService::new();
        service
            .register(Arc::new(StaticChecker {
                name: "database".to_string(),
                healthy: true,
            }))
            .await;
        service
            .register(Arc::new(StaticChecker {
                name: "other".to_string(),
                healthy: false,
            }))
            .await;

        let response = service.check_health(Some("database")).await;
        assert_eq!(response.summary.total_checks, 1);
        assert_eq!(response.status, HealthStatus::Healthy);
    }
}
