use std::sync::Arc;

use shared::{
    abstract_trait::payment::{
        repository::{command::DynPaymentCommandRepository, query::DynPaymentQueryRepository},
        service::{
            command::DynPaymentCommandService, query::DynPaymentQueryService,
            stats::DynPaymentStatsService,
        },
    },
    config::ConnectionPool,
    repository::payment::{command::PaymentCommandRepository, query::PaymentQueryRepository},
    service::payment::{
        command::PaymentCommandService, query::PaymentQueryService, stats::PaymentStatsService,
    },
};

#[derive(Clone)]
pub struct PaymentQueryDeps {
    pub service: DynPaymentQueryService,
}

impl PaymentQueryDeps {
    pub async fn new(query: DynPaymentQueryRepository) -> Self {
        let service =
            Arc::new(PaymentQueryService::new(query).await) as DynPaymentQueryService;
        Self { service }
    }
}

#[derive(Clone)]
pub struct PaymentCommandDeps {
    pub service: DynPaymentCommandService,
}

impl PaymentCommandDeps {
    pub async fn new(command: DynPaymentCommandRepository) -> Self {
        let service =
            Arc::new(PaymentCommandService::new(command).await) as DynPaymentCommandService;
        Self { service }
    }
}

#[derive(Clone)]
pub struct PaymentStatsDeps {
    pub service: DynPaymentStatsService,
}

impl PaymentStatsDeps {
    pub async fn new(query: DynPaymentQueryRepository) -> Self {
        let service =
            Arc::new(PaymentStatsService::new(query).await) as DynPaymentStatsService;
        Self { service }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub payment_query: PaymentQueryDeps,
    pub payment_command: PaymentCommandDeps,
    pub payment_stats: PaymentStatsDeps,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("payment_query", &"PaymentQueryDeps")
            .field("payment_command", &"PaymentCommandDeps")
            .field("payment_stats", &"PaymentStatsDeps")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(db: ConnectionPool) -> Self {
        let query = Arc::new(PaymentQueryRepository::new(db.clone())) as DynPaymentQueryRepository;
        let command =
            Arc::new(PaymentCommandRepository::new(db)) as DynPaymentCommandRepository;

        Self::from_repositories(query, command).await
    }

    /// Wires the services over any pair of repositories, e.g. an in-memory
    /// store in tests.
    pub async fn from_repositories(
        query: DynPaymentQueryRepository,
        command: DynPaymentCommandRepository,
    ) -> Self {
        let payment_query = PaymentQueryDeps::new(query.clone()).await;
        let payment_command = PaymentCommandDeps::new(command).await;
        let payment_stats = PaymentStatsDeps::new(query).await;

        Self {
            payment_query,
            payment_command,
            payment_stats,
        }
    }
}
