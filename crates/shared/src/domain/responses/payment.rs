use crate::model::payment::{PaymentCategory, PaymentModel, PaymentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub value: f64,
    pub category: PaymentCategory,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub date_occurred: DateTime<Utc>,
}

impl From<PaymentModel> for PaymentResponse {
    fn from(model: PaymentModel) -> Self {
        Self {
            id: model.id,
            value: model.value,
            category: model.category,
            payment_type: model.payment_type,
            date_occurred: model.date_occurred,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPageResponse {
    /// Size of the whole collection, not of this page.
    pub total_count: i64,
    pub payments: Vec<PaymentResponse>,
    pub has_next: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatsResponse {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub spendings_sum: f64,
    #[schema(value_type = Object)]
    pub spendings_by_category_sum: BTreeMap<PaymentCategory, f64>,
    #[schema(value_type = Object)]
    pub spendings_by_category_percent: BTreeMap<PaymentCategory, f64>,
}
