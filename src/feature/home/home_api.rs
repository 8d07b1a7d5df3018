//! The welcome route.

use crate::infra::{extract::Json, state::AppState};
use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The home API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}

/// A plain message for the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    /// The message.
    #[schema(example = "Welcome to ABC Pharmacy")]
    message: String,
}

impl Message {
    /// Constructs a new message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

/// Greets the client.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Success", body = Message),
    )
)]
pub async fn welcome() -> Json<Message> {
    Json(Message::new("Welcome to ABC Pharmacy"))
}
