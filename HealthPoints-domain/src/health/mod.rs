//! Domain layer health check functionality
//! This module reports whether the service and its storage are usable

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::warn;

use health_points_data::repository::DataPointRepositoryTrait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// At least one component is not functioning
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check that storage answers a trivial query
    async fn check_database_status(&self) -> Result<(), String>;
}

/// Health service that probes the data point repository
pub struct HealthService<R: DataPointRepositoryTrait> {
    repository: R,
}

impl<R: DataPointRepositoryTrait> HealthService<R> {
    /// Create a new health service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: DataPointRepositoryTrait> HealthServiceTrait for HealthService<R> {
    async fn get_system_health(&self) -> SystemHealth {
        let database = match self.check_database_status().await {
            Ok(()) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthComponent {
                    status: ComponentStatus::Unhealthy,
                    details: Some(e),
                }
            }
        };

        let api = HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        };

        let status = if database.status == ComponentStatus::Healthy {
            SystemStatus::Healthy
        } else {
            SystemStatus::Unhealthy
        };

        SystemHealth {
            status,
            components: HashMap::from([
                ("database".to_string(), database),
                ("api".to_string(), api),
            ]),
        }
    }

    async fn check_database_status(&self) -> Result<(), String> {
        self.repository
            .ping()
            .await
            .map_err(|e| format!("Database connection error: {}", e))
    }
}
