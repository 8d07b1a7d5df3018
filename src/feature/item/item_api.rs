//! The item API implementation.

use super::{
    item_repository::{Item, NewItem},
    item_service,
};
use crate::{
    feature::home::home_api::Message,
    infra::{
        error::{ApiResult, ClientError},
        extract::Json,
        state::{AppState, Store},
    },
};
use axum::{extract::State, Router};
use axum_extra::routing::{RouterExt, TypedPath};
use http::StatusCode;
use serde::Deserialize;
use tracing::instrument;

/// The item API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .typed_get(list_items)
        .typed_post(create_item)
        .typed_put(update_item)
        .typed_delete(delete_item)
}

#[derive(Deserialize, TypedPath)]
#[typed_path("/items", rejection(ClientError))]
pub struct Items;

#[derive(Deserialize, TypedPath)]
#[typed_path("/items/:id", rejection(ClientError))]
pub struct ItemsId(i32);

/// Lists all items.
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "Success", body = [Item]),
        (status = 502, description = "Bad Gateway", body = crate::infra::error::ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn list_items(_: Items, State(items): State<Store<Item>>) -> ApiResult<Json<Vec<Item>>> {
    let items = item_service::list_items(items.as_ref()).await?;
    Ok(Json(items))
}

/// Creates a new item.
#[utoipa::path(
    post,
    path = "/items",
    request_body = NewItem,
    responses(
        (status = 201, description = "Created", body = Item),
        (status = 400, description = "Bad Request", body = crate::infra::error::ErrorBody),
        (status = 502, description = "Bad Gateway", body = crate::infra::error::ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn create_item(
    _: Items,
    State(items): State<Store<Item>>,
    Json(new_item): Json<NewItem>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = item_service::create_item(items.as_ref(), new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replaces the name, price and category of an item.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(("id" = i32, Path, description = "The item's id")),
    request_body = NewItem,
    responses(
        (status = 200, description = "Ok", body = Item),
        (status = 400, description = "Bad Request", body = crate::infra::error::ErrorBody),
        (status = 404, description = "Not Found", body = crate::infra::error::ErrorBody),
        (status = 502, description = "Bad Gateway", body = crate::infra::error::ErrorBody),
    )
)]
#[instrument(skip(items, changes))]
pub async fn update_item(
    ItemsId(id): ItemsId,
    State(items): State<Store<Item>>,
    changes: Result<Json<NewItem>, ClientError>,
) -> ApiResult<Json<Item>> {
    let changes = changes.map(|Json(changes)| changes);
    let item = item_service::update_item(items.as_ref(), id, changes).await?;
    Ok(Json(item))
}

/// Deletes an item.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = i32, Path, description = "The item's id")),
    responses(
        (status = 200, description = "Ok", body = Message),
        (status = 404, description = "Not Found", body = crate::infra::error::ErrorBody),
        (status = 502, description = "Bad Gateway", body = crate::infra::error::ErrorBody),
    )
)]
#[instrument(skip(items))]
pub async fn delete_item(
    ItemsId(id): ItemsId,
    State(items): State<Store<Item>>,
) -> ApiResult<Json<Message>> {
    item_service::delete_item(items.as_ref(), id).await?;
    Ok(Json(Message::new("Item deleted successfully")))
}
