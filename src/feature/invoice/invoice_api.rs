//! The invoice API implementation.

use super::{
    invoice_repository::{Invoice, NewInvoice},
    invoice_service,
};
use crate::infra::{
    error::{ApiResult, ClientError},
    extract::Json,
    state::{AppState, Store},
};
use axum::{extract::State, Router};
use axum_extra::routing::{RouterExt, TypedPath};
use http::StatusCode;
use serde::Deserialize;
use tracing::instrument;

/// The invoice API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new().typed_post(create_invoice)
}

#[derive(Deserialize, TypedPath)]
#[typed_path("/invoices", rejection(ClientError))]
pub struct Invoices;

/// Creates a new invoice.
#[utoipa::path(
    post,
    path = "/invoices",
    request_body = NewInvoice,
    responses(
        (status = 201, description = "Created", body = Invoice),
        (status = 400, description = "Bad Request", body = crate::infra::error::ErrorBody),
        (status = 502, description = "Bad Gateway", body = crate::infra::error::ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn create_invoice(
    _: Invoices,
    State(invoices): State<Store<Invoice>>,
    Json(new_invoice): Json<NewInvoice>,
) -> ApiResult<(StatusCode, Json<Invoice>)> {
    let invoice = invoice_service::create_invoice(invoices.as_ref(), new_invoice).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}
