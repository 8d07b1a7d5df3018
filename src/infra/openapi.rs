//! OpenAPI configuration.

use crate::feature::{
    home::home_api,
    invoice::{invoice_api, invoice_repository},
    item::{item_api, item_repository},
};
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    info(title = "ABC Pharmacy"),
    paths(
        home_api::welcome,
        item_api::list_items,
        item_api::create_item,
        item_api::update_item,
        item_api::delete_item,
        invoice_api::create_invoice,
    ),
    components(
        schemas(
            home_api::Message,
            item_repository::NewItem,
            item_repository::Item,
            invoice_repository::NewInvoice,
            invoice_repository::Invoice,
            crate::infra::error::ErrorBody
        )
    )
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;
