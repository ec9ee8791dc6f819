use crate::di::DependenciesInject;
use shared::{
    abstract_trait::payment::repository::{
        command::DynPaymentCommandRepository, query::DynPaymentQueryRepository,
    },
    config::ConnectionPool,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
}

impl AppState {
    pub async fn new(pool: ConnectionPool) -> Self {
        let di_container = DependenciesInject::new(pool).await;

        Self { di_container }
    }

    pub async fn from_repositories(
        query: DynPaymentQueryRepository,
        command: DynPaymentCommandRepository,
    ) -> Self {
        let di_container = DependenciesInject::from_repositories(query, command).await;

        Self { di_container }
    }
}
