//! The `{message, data}` envelope every successful JSON response is wrapped in.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

const DEFAULT_MESSAGE: &str = "Successfully";

#[derive(Serialize)]
pub struct Response<T> {
    message: String,
    data: T,
}

impl<T> Response<T> {
    pub fn with_message(data: T, message: &str) -> Self {
        Self { message: message.to_string(), data }
    }
}

impl<T> From<T> for Response<T> {
    fn from(data: T) -> Self {
        Self { message: DEFAULT_MESSAGE.to_string(), data }
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::response::IntoResponse;
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn test_response_with_message() {
        let resp = Response::with_message("data_value", "User removed");
        assert_eq!(resp.message, "User removed");
        assert_eq!(resp.data, "data_value");
    }

    #[test]
    fn test_response_from() {
        let resp: Response<Vec<&str>> = Response::from(vec!["node", "react"]);
        assert_eq!(resp.message, "Successfully");
        assert_eq!(resp.data, vec!["node", "react"]);
    }

    #[tokio::test]
    async fn test_response_into_response() {
        let http_resp = Response::with_message(json!({ "success": true }), "User removed").into_response();

        assert_eq!(http_resp.status(), StatusCode::OK);

        let body_bytes = to_bytes(http_resp.into_body(), usize::MAX).await.unwrap();
        let json_val: Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(json_val, json!({ "message": "User removed", "data": { "success": true } }));
    }
}
