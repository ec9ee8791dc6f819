use crate::{
    abstract_trait::payment::{
        repository::query::DynPaymentQueryRepository, service::stats::PaymentStatsServiceTrait,
    },
    domain::{
        requests::payment::FindPaymentStats,
        responses::{ApiResponse, PaymentStatsResponse},
    },
    errors::ServiceError,
    model::payment::{PaymentCategory, PaymentModel, PaymentType},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebitStats {
    pub total: f64,
    pub by_category: BTreeMap<PaymentCategory, f64>,
    pub percent_by_category: BTreeMap<PaymentCategory, f64>,
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums debits per category and overall. Percentages come from the
/// unrounded sums; sums are rounded afterwards, each on its own, so the
/// rounded categories may differ from the rounded total by a cent. A total
/// that rounds to zero yields 0% for every category.
pub fn aggregate_debits<'a>(payments: impl IntoIterator<Item = &'a PaymentModel>) -> DebitStats {
    let mut total = 0.0;
    let mut by_category: BTreeMap<PaymentCategory, f64> = BTreeMap::new();

    for payment in payments
        .into_iter()
        .filter(|p| p.payment_type == PaymentType::Debt)
    {
        total += payment.value;
        *by_category.entry(payment.category).or_insert(0.0) += payment.value;
    }

    // A total that rounds to zero is reported as zero, so float residue left
    // by cancelling debits must not be divided by.
    let total_is_zero = round2(total) == 0.0;

    let percent_by_category = by_category
        .iter()
        .map(|(category, sum)| {
            let percent = if total_is_zero {
                0.0
            } else {
                round2(sum / total * 100.0)
            };
            (*category, percent)
        })
        .collect();

    by_category.values_mut().for_each(|sum| *sum = round2(*sum));

    DebitStats {
        total: round2(total),
        by_category,
        percent_by_category,
    }
}

pub struct PaymentStatsService {
    query: DynPaymentQueryRepository,
}

impl PaymentStatsService {
    pub async fn new(query: DynPaymentQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl PaymentStatsServiceTrait for PaymentStatsService {
    async fn get_stats(
        &self,
        req: &FindPaymentStats,
    ) -> Result<ApiResponse<PaymentStatsResponse>, ServiceError> {
        let (from, to) = req.period(Utc::now()).map_err(|errors| {
            error!("Validation failed: {errors:?}");
            ServiceError::Validation(errors)
        })?;

        info!("📊 Computing spending stats from {from} to {to}");

        let payments = self.query.find_in_period(from, to).await.map_err(|e| {
            error!("❌ Failed to fetch payments for stats: {e:?}");
            ServiceError::Repo(e)
        })?;

        let stats = aggregate_debits(&payments);

        info!(
            "✅ Aggregated {} payments | total debit: {}",
            payments.len(),
            stats.total
        );

        Ok(ApiResponse::success(
            "Payment stats retrieved successfully",
            PaymentStatsResponse {
                from,
                to,
                spendings_sum: stats.total,
                spendings_by_category_sum: stats.by_category,
                spendings_by_category_percent: stats.percent_by_category,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::payment::memory::InMemoryPaymentRepository;
    use chrono::{DateTime, TimeZone};
    use std::sync::Arc;
    use uuid::Uuid;

    fn at(month: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, month, 10, 12, 0, 0).unwrap()
    }

    fn payment(
        id: u128,
        value: f64,
        category: PaymentCategory,
        payment_type: PaymentType,
        date_occurred: DateTime<Utc>,
    ) -> PaymentModel {
        PaymentModel {
            id: Uuid::from_u128(id),
            value,
            category,
            payment_type,
            date_occurred,
        }
    }

    #[test]
    fn splits_debits_by_category() {
        let payments = [
            payment(1, 30.0, PaymentCategory::Food, PaymentType::Debt, at(1)),
            payment(2, 70.0, PaymentCategory::Housing, PaymentType::Debt, at(2)),
            payment(3, 500.0, PaymentCategory::Salary, PaymentType::Credit, at(3)),
        ];

        let stats = aggregate_debits(&payments);

        assert_eq!(stats.total, 100.0);
        assert_eq!(
            stats.by_category,
            BTreeMap::from([
                (PaymentCategory::Food, 30.0),
                (PaymentCategory::Housing, 70.0)
            ])
        );
        assert_eq!(
            stats.percent_by_category,
            BTreeMap::from([
                (PaymentCategory::Food, 30.0),
                (PaymentCategory::Housing, 70.0)
            ])
        );
    }

    #[test]
    fn no_debits_gives_empty_report() {
        let payments = [payment(1, 10.0, PaymentCategory::Salary, PaymentType::Credit, at(1))];

        let stats = aggregate_debits(&payments);

        assert_eq!(stats, DebitStats::default());
    }

    #[test]
    fn zero_total_reports_zero_percent() {
        let payments = [
            payment(1, 25.0, PaymentCategory::Food, PaymentType::Debt, at(1)),
            payment(2, -25.0, PaymentCategory::Shopping, PaymentType::Debt, at(1)),
        ];

        let stats = aggregate_debits(&payments);

        assert_eq!(stats.total, 0.0);
        assert!(stats.percent_by_category.values().all(|p| *p == 0.0));
        assert_eq!(stats.percent_by_category.len(), 2);
    }

    #[test]
    fn float_residue_of_cancelled_debits_reports_zero_percent() {
        let payments = [
            payment(1, 0.1, PaymentCategory::Food, PaymentType::Debt, at(1)),
            payment(2, 0.2, PaymentCategory::Food, PaymentType::Debt, at(2)),
            payment(3, -0.3, PaymentCategory::Shopping, PaymentType::Debt, at(3)),
        ];

        let stats = aggregate_debits(&payments);

        assert_eq!(stats.total, 0.0);
        assert_eq!(
            stats.percent_by_category,
            BTreeMap::from([
                (PaymentCategory::Food, 0.0),
                (PaymentCategory::Shopping, 0.0)
            ])
        );
        assert_eq!(stats.by_category[&PaymentCategory::Food], 0.3);
        assert_eq!(stats.by_category[&PaymentCategory::Shopping], -0.3);
    }

    #[test]
    fn percentages_use_unrounded_sums() {
        let payments = [
            payment(1, 0.004, PaymentCategory::Food, PaymentType::Debt, at(1)),
            payment(2, 0.004, PaymentCategory::Food, PaymentType::Debt, at(1)),
            payment(3, 1.0, PaymentCategory::Health, PaymentType::Debt, at(1)),
        ];

        let stats = aggregate_debits(&payments);

        // 0.008 / 1.008 = 0.79%, though the rounded category sum is 0.01.
        assert_eq!(stats.by_category[&PaymentCategory::Food], 0.01);
        assert_eq!(stats.percent_by_category[&PaymentCategory::Food], 0.79);
        assert_eq!(stats.percent_by_category[&PaymentCategory::Health], 99.21);
        assert_eq!(stats.total, 1.01);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(2.675_000_1), 2.68);
        assert_eq!(round2(-1.005_000_1), -1.01);
        assert_eq!(round2(0.125), 0.13);
    }

    #[tokio::test]
    async fn report_covers_half_open_period() {
        let start = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let repo = Arc::new(InMemoryPaymentRepository::with_payments([
            payment(1, 40.0, PaymentCategory::Food, PaymentType::Debt, start),
            payment(2, 60.0, PaymentCategory::Transport, PaymentType::Debt, at(6)),
            payment(3, 999.0, PaymentCategory::Food, PaymentType::Debt, end),
        ]));
        let service = PaymentStatsService::new(repo as DynPaymentQueryRepository).await;

        let req = FindPaymentStats {
            from: Some("2018-01-01".into()),
            to: Some("2019-01-01".into()),
        };
        let report = service.get_stats(&req).await.unwrap().data;

        assert_eq!(report.from, start);
        assert_eq!(report.to, end);
        assert_eq!(report.spendings_sum, 100.0);
        assert_eq!(
            report.spendings_by_category_percent[&PaymentCategory::Transport],
            60.0
        );
    }

    #[tokio::test]
    async fn inverted_period_is_a_validation_error() {
        let repo = Arc::new(InMemoryPaymentRepository::new());
        let service = PaymentStatsService::new(repo as DynPaymentQueryRepository).await;

        let req = FindPaymentStats {
            from: Some("2019-01-01".into()),
            to: Some("2018-01-01".into()),
        };

        assert!(matches!(
            service.get_stats(&req).await,
            Err(ServiceError::Validation(_))
        ));
    }
}
