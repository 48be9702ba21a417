use portfolio_core_health_contracts::{HealthService, HealthStatus};
use portfolio_email_contracts::Deliverer;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthServiceImpl<Deliverer> {
    deliverer: Deliverer,
}

impl<D> HealthServiceImpl<D> {
    pub fn new(deliverer: D) -> Self {
        Self { deliverer }
    }
}

impl<D> HealthService for HealthServiceImpl<D>
where
    D: Deliverer,
{
    async fn get_status(&self) -> HealthStatus {
        let email = self
            .deliverer
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err:#}"))
            .is_ok();

        HealthStatus { email }
    }
}

#[cfg(test)]
mod tests {
    use portfolio_email_contracts::MockDeliverer;

    use super::*;

    #[tokio::test]
    async fn healthy() {
        let sut = HealthServiceImpl::new(MockDeliverer::new().with_ping(true));
        assert_eq!(sut.get_status().await, HealthStatus { email: true });
    }

    #[tokio::test]
    async fn smtp_unreachable() {
        let sut = HealthServiceImpl::new(MockDeliverer::new().with_ping(false));
        assert_eq!(sut.get_status().await, HealthStatus { email: false });
    }
}
