use std::sync::Arc;

use log::warn;
use serde::Serialize;

use crate::ServiceResult;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Ok,
    Ko,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HealthCheck {
    pub status: ApplicationStatus,
    pub message: String,
}

pub type ArcHealthCheckRepository = Arc<Box<dyn HealthCheckRepository + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait HealthCheckRepository {
    async fn count_connections(&self) -> ServiceResult<i64>;
}

pub type ArcHealthCheckService = Arc<Box<dyn HealthCheckService + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait HealthCheckService {
    async fn healthcheck(&self) -> HealthCheck;
}

pub struct HealthCheckServiceImpl {
    healthcheck_repository: ArcHealthCheckRepository,
}

impl HealthCheckServiceImpl {
    pub fn new(healthcheck_repository: ArcHealthCheckRepository) -> Self {
        Self {
            healthcheck_repository,
        }
    }
}

#[async_trait::async_trait]
impl HealthCheckService for HealthCheckServiceImpl {
    async fn healthcheck(&self) -> HealthCheck {
        let connections = match self.healthcheck_repository.count_connections().await {
            Ok(count) => count,
            Err(e) => {
                warn!("Healthcheck could not reach the store: {}", e);
                0
            }
        };
        if connections > 0 {
            HealthCheck {
                status: ApplicationStatus::Ok,
                message: "Welcome to the tennis ranking server!".to_string(),
            }
        } else {
            HealthCheck {
                status: ApplicationStatus::Ko,
                message: "The tennis ranking server is not fully functional, please check your configuration."
                    .to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ServiceError, player::MemoryPlayerRepository};

    use super::*;

    struct UnreachableStore;

    #[async_trait::async_trait]
    impl HealthCheckRepository for UnreachableStore {
        async fn count_connections(&self) -> ServiceResult<i64> {
            ServiceError::data_access("connection refused")
        }
    }

    #[tokio::test]
    async fn test_healthcheck_ok_with_live_store() {
        let repository: ArcHealthCheckRepository =
            Arc::new(Box::new(MemoryPlayerRepository::new()));
        let service = HealthCheckServiceImpl::new(repository);

        let health = service.healthcheck().await;
        assert_eq!(health.status, ApplicationStatus::Ok);
    }

    #[tokio::test]
    async fn test_healthcheck_ko_with_unreachable_store() {
        let repository: ArcHealthCheckRepository = Arc::new(Box::new(UnreachableStore));
        let service = HealthCheckServiceImpl::new(repository);

        let health = service.healthcheck().await;
        assert_eq!(health.status, ApplicationStatus::Ko);
    }
}
