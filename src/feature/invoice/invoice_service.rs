//! A service for interacting with invoices.

use super::invoice_repository::{Invoice, NewInvoice};
use crate::infra::{error::ApiResult, repository::Repository};
use tracing::instrument;

/// Creates a new invoice.
///
/// Invoices cannot be changed or deleted once created.
#[instrument(skip(repository))]
pub async fn create_invoice<R>(repository: &R, new_invoice: NewInvoice) -> ApiResult<Invoice>
where
    R: Repository<Invoice> + ?Sized,
{
    repository.create(new_invoice).await
}
