//! Types and queries for storing and loading invoices.

use crate::infra::{
    database::PgRepository,
    error::{ApiResult, ClientError},
    repository::{Record, Repository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, Instrument};
use utoipa::ToSchema;

/// A new invoice.
///
/// None of the fields are checked beyond being strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewInvoice {
    /// The customer's name.
    #[schema(example = "Jane")]
    pub name: String,
    /// The customer's mobile number.
    #[schema(example = "555")]
    pub mobile_no: String,
    /// The customer's email address.
    #[schema(example = "j@x.com")]
    pub email: String,
    /// The customer's address.
    #[schema(example = "1 Rd")]
    pub address: String,
    /// How the customer pays.
    #[schema(example = "cash")]
    pub billing_type: String,
}

/// An existing invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Invoice {
    /// The invoice's id.
    #[schema(example = 1)]
    pub id: i32,
    /// The customer's name.
    #[schema(example = "Jane")]
    pub name: String,
    /// The customer's mobile number.
    #[schema(example = "555")]
    pub mobile_no: String,
    /// The customer's email address.
    #[schema(example = "j@x.com")]
    pub email: String,
    /// The customer's address.
    #[schema(example = "1 Rd")]
    pub address: String,
    /// How the customer pays.
    #[schema(example = "cash")]
    pub billing_type: String,
    /// When the invoice was created.
    pub created_at: DateTime<Utc>,
    /// When the invoice was last changed.
    pub updated_at: DateTime<Utc>,
    /// When the invoice was deleted.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record for Invoice {
    type New = NewInvoice;
    const KIND: &'static str = "Invoice";

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, now: DateTime<Utc>, new: NewInvoice) -> Self {
        Invoice {
            id,
            name: new.name,
            mobile_no: new.mobile_no,
            email: new.email,
            address: new.address,
            billing_type: new.billing_type,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn assign(&mut self, from: &Self) {
        self.name = from.name.clone();
        self.mobile_no = from.mobile_no.clone();
        self.email = from.email.clone();
        self.address = from.address.clone();
        self.billing_type = from.billing_type.clone();
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
    }
}

#[async_trait]
impl Repository<Invoice> for PgRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ApiResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(self.db())
        .instrument(tracing::info_span!("fetch_all"))
        .await?;
        tracing::info!("Listed {} invoices", invoices.len());
        Ok(invoices)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> ApiResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(self.db())
        .instrument(tracing::info_span!("fetch_optional"))
        .await?;
        Ok(invoice)
    }

    #[instrument(skip(self))]
    async fn create(&self, new_invoice: NewInvoice) -> ApiResult<Invoice> {
        tracing::info!("Creating invoice {:?}", new_invoice);
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (name, mobile_no, email, address, billing_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new_invoice.name)
        .bind(new_invoice.mobile_no)
        .bind(new_invoice.email)
        .bind(new_invoice.address)
        .bind(new_invoice.billing_type)
        .fetch_one(self.db())
        .await?;
        tracing::info!("Created invoice {:?}", invoice);
        Ok(invoice)
    }

    #[instrument(skip(self))]
    async fn save(&self, invoice: &Invoice) -> ApiResult<Invoice> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET name = $2, mobile_no = $3, email = $4, address = $5, billing_type = $6,
                updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(invoice.id)
        .bind(&invoice.name)
        .bind(&invoice.mobile_no)
        .bind(&invoice.email)
        .bind(&invoice.address)
        .bind(&invoice.billing_type)
        .fetch_optional(self.db())
        .await?
        .ok_or(ClientError::NotFound(Invoice::KIND))?;
        Ok(invoice)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, invoice: &Invoice) -> ApiResult<()> {
        let rows = sqlx::query(
            r#"
            UPDATE invoices
            SET deleted_at = now(), updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(invoice.id)
        .execute(self.db())
        .await?;

        if rows.rows_affected() == 0 {
            return Err(ClientError::NotFound(Invoice::KIND))?;
        }

        Ok(())
    }
}
