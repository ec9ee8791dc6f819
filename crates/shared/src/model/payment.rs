use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentModel {
    pub id: Uuid,
    pub value: f64,
    pub category: PaymentCategory,
    pub payment_type: PaymentType,
    pub date_occurred: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentCategory {
    Food,
    Transport,
    Housing,
    Utilities,
    Entertainment,
    Health,
    Shopping,
    Education,
    Salary,
    Other,
}

impl PaymentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentCategory::Food => "FOOD",
            PaymentCategory::Transport => "TRANSPORT",
            PaymentCategory::Housing => "HOUSING",
            PaymentCategory::Utilities => "UTILITIES",
            PaymentCategory::Entertainment => "ENTERTAINMENT",
            PaymentCategory::Health => "HEALTH",
            PaymentCategory::Shopping => "SHOPPING",
            PaymentCategory::Education => "EDUCATION",
            PaymentCategory::Salary => "SALARY",
            PaymentCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOOD" => Ok(PaymentCategory::Food),
            "TRANSPORT" => Ok(PaymentCategory::Transport),
            "HOUSING" => Ok(PaymentCategory::Housing),
            "UTILITIES" => Ok(PaymentCategory::Utilities),
            "ENTERTAINMENT" => Ok(PaymentCategory::Entertainment),
            "HEALTH" => Ok(PaymentCategory::Health),
            "SHOPPING" => Ok(PaymentCategory::Shopping),
            "EDUCATION" => Ok(PaymentCategory::Education),
            "SALARY" => Ok(PaymentCategory::Salary),
            "OTHER" => Ok(PaymentCategory::Other),
            other => Err(format!("unknown payment category '{other}'")),
        }
    }
}

/// `Debt` is the debit (outgoing) side; only debts are counted as spendings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PaymentType {
    #[serde(rename = "DEBT", alias = "DEBIT")]
    Debt,
    #[serde(rename = "CREDIT")]
    Credit,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Debt => "DEBT",
            PaymentType::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBT" | "DEBIT" => Ok(PaymentType::Debt),
            "CREDIT" => Ok(PaymentType::Credit),
            other => Err(format!("unknown payment type '{other}'")),
        }
    }
}
