use crate::{errors::RepositoryError, model::payment::PaymentModel};
use sqlx::{Row, postgres::PgRow};

pub(crate) fn payment_from_row(row: &PgRow) -> Result<PaymentModel, RepositoryError> {
    let category: String = row.try_get("category")?;
    let payment_type: String = row.try_get("payment_type")?;

    Ok(PaymentModel {
        id: row.try_get("id")?,
        value: row.try_get("value")?,
        category: category.parse().map_err(RepositoryError::Decode)?,
        payment_type: payment_type.parse().map_err(RepositoryError::Decode)?,
        date_occurred: row.try_get("date_occurred")?,
    })
}
