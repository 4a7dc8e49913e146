//! Extractors that report malformed input through [`AppError`] instead of
//! axum's plain-text rejections.

use axum::body::Body;
use axum::extract::{FromRequest, FromRequestParts, Json, Path};
use axum::http::Request;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::AppError;

pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::routing::{delete, post};
    use serde::{Deserialize, Serialize};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct EntryPath {
        kind: String,
        id: u64,
    }

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct ProfileBody {
        status: Option<String>,
        skills: Option<String>,
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn path_app() -> Router {
        Router::new().route(
            "/{kind}/{id}",
            delete(|AppPath(params): AppPath<EntryPath>| async move { format!("{}:{}", params.kind, params.id) }),
        )
    }

    #[tokio::test]
    async fn test_app_path_success() {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/experience/7")
            .body(Body::empty())
            .expect("failed to build request");

        let response = path_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"experience:7");
    }

    #[tokio::test]
    async fn test_app_path_error() {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/experience/not-a-number")
            .body(Body::empty())
            .expect("failed to build request");

        let response = path_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_app_json_success() {
        let request = Request::builder()
            .method(Method::POST)
            .header("content-type", "application/json")
            .body(Body::from(r#"{"status":"Developer","skills":"node, react"}"#))
            .unwrap();

        let AppJson(parsed) = AppJson::<ProfileBody>::from_request(request, &()).await.unwrap();

        assert_eq!(
            parsed,
            ProfileBody { status: Some("Developer".to_string()), skills: Some("node, react".to_string()) }
        );
    }

    #[tokio::test]
    async fn test_app_json_error_is_json_bad_request() {
        let app = Router::new().route("/", post(|AppJson(body): AppJson<ProfileBody>| async move { format!("{body:?}") }));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{invalid json}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_app_json_missing_content_type() {
        let request = Request::builder().method(Method::POST).body(Body::from("{}")).unwrap();

        let result = AppJson::<ProfileBody>::from_request(request, &()).await;

        assert!(matches!(result, Err(AppError::RequestFormat(_))));
    }
}
