use crate::{
    model::payment::{PaymentCategory, PaymentModel, PaymentType},
    utils::{ContinuationToken, first_query_values, parse_datetime},
};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindPaymentPage {
    /// Records per page; anything that is not a positive integer means 10.
    #[serde(rename = "pageSize", default)]
    #[param(value_type = Option<i64>)]
    pub page_size: Option<String>,

    /// Opaque token from the previous page; an unreadable token restarts
    /// from the first page.
    #[serde(rename = "continuationToken", default)]
    pub continuation_token: Option<String>,
}

impl FindPaymentPage {
    /// Reads the raw query string; a repeated parameter keeps its first value.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut values = first_query_values(raw);
        Self {
            page_size: values.remove("pageSize"),
            continuation_token: values.remove("continuationToken"),
        }
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|size| *size > 0)
            .map(|size| size.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn raw_token(&self) -> Option<&str> {
        self.continuation_token
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }
}

/// Storage-level window of the `(date_occurred, id)` scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSliceQuery {
    pub after: Option<ContinuationToken>,
    pub before: Option<DateTime<Utc>>,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(range(
        min = -1_000_000_000_000.0,
        max = 1_000_000_000_000.0,
        message = "value must be between -1e12 and 1e12"
    ))]
    pub value: f64,

    pub category: PaymentCategory,

    #[serde(rename = "type")]
    pub payment_type: PaymentType,

    pub date_occurred: DateTime<Utc>,
}

impl CreatePaymentRequest {
    pub fn to_model(&self, id: Uuid) -> PaymentModel {
        PaymentModel {
            id,
            value: self.value,
            category: self.category,
            payment_type: self.payment_type,
            date_occurred: self.date_occurred,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindPaymentStats {
    /// Inclusive lower bound (RFC 3339 or YYYY-MM-DD). Defaults to Jan 1 of
    /// the current year.
    #[serde(default)]
    pub from: Option<String>,

    /// Exclusive upper bound (RFC 3339 or YYYY-MM-DD). Defaults to one
    /// calendar year after `from`.
    #[serde(default)]
    pub to: Option<String>,
}

impl FindPaymentStats {
    /// Reads the raw query string; a repeated parameter keeps its first value.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut values = first_query_values(raw);
        Self {
            from: values.remove("from"),
            to: values.remove("to"),
        }
    }

    pub fn period(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>), Vec<String>> {
        let mut errors = Vec::new();

        let from = match self.from.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_datetime(raw).or_else(|| {
                errors.push(format!("from: invalid date '{raw}'"));
                None
            }),
            None => start_of_year(now.year()),
        };

        let to = match self.to.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_datetime(raw).or_else(|| {
                errors.push(format!("to: invalid date '{raw}'"));
                None
            }),
            None => from.and_then(|from| start_of_year(from.year() + 1)),
        };

        match (from, to) {
            (Some(from), Some(to)) if from < to => Ok((from, to)),
            (Some(_), Some(_)) => Err(vec!["from must be earlier than to".to_string()]),
            _ => {
                if errors.is_empty() {
                    errors.push("invalid period".to_string());
                }
                Err(errors)
            }
        }
    }
}

fn start_of_year(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}
