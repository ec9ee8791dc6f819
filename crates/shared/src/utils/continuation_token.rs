use crate::model::payment::PaymentModel;
use chrono::{DateTime, SecondsFormat, Utc};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

const SEPARATOR: char = '|';

/// Resumption point of a `(date_occurred asc, id asc)` scan: the sort key of
/// the last payment handed out on the previous page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationToken {
    pub date_occurred: DateTime<Utc>,
    pub id: Uuid,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not valid hex")]
    Hex,
    #[error("token is not valid utf-8")]
    Utf8,
    #[error("token has no separator")]
    MissingSeparator,
    #[error("token timestamp is invalid")]
    Timestamp,
    #[error("token id is invalid")]
    Id,
}

impl ContinuationToken {
    pub fn new(date_occurred: DateTime<Utc>, id: Uuid) -> Self {
        Self { date_occurred, id }
    }

    pub fn sort_key(&self) -> (DateTime<Utc>, Uuid) {
        (self.date_occurred, self.id)
    }

    /// True when `payment` sorts strictly after this token.
    pub fn precedes(&self, payment: &PaymentModel) -> bool {
        (payment.date_occurred, payment.id) > self.sort_key()
    }
}

impl From<&PaymentModel> for ContinuationToken {
    fn from(payment: &PaymentModel) -> Self {
        Self::new(payment.date_occurred, payment.id)
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = format!(
            "{}{SEPARATOR}{}",
            self.date_occurred
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.id
        );
        f.write_str(&hex::encode(raw))
    }
}

impl FromStr for ContinuationToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim()).map_err(|_| TokenError::Hex)?;
        let raw = String::from_utf8(bytes).map_err(|_| TokenError::Utf8)?;

        let (timestamp, id) = raw
            .split_once(SEPARATOR)
            .ok_or(TokenError::MissingSeparator)?;

        let date_occurred = DateTime::parse_from_rfc3339(timestamp)
            .map_err(|_| TokenError::Timestamp)?
            .with_timezone(&Utc);
        let id = Uuid::parse_str(id).map_err(|_| TokenError::Id)?;

        Ok(Self { date_occurred, id })
    }
}
