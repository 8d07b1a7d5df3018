//! Custom axum extractors.

use super::error::ClientError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::IntoResponse,
};
use serde::{de::DeserializeOwned, Serialize};

/// A custom JSON extractor since axum's does not let us customize the response.
///
/// Every way a body can fail to decode becomes a [`ClientError::BadRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> AsRef<T> for Json<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ClientError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Json(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Price {
        #[allow(dead_code)]
        unit_price: f64,
    }

    fn json_request(body: &'static str) -> Request {
        http::Request::post("/")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn wrong_field_type_is_a_bad_request() {
        let result = Json::<Price>::from_request(json_request(r#"{"unit_price": "x"}"#), &()).await;
        assert!(matches!(result, Err(ClientError::BadRequest(msg)) if !msg.is_empty()));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request() {
        let req = http::Request::post("/").body(Body::from(r#"{"unit_price": 1}"#)).unwrap();
        let result = Json::<Price>::from_request(req, &()).await;
        assert!(matches!(result, Err(ClientError::BadRequest(_))));
    }
}
