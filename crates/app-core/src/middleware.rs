//! The authentication gate and the request/response logger.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

use super::error::AppError;
use super::jwt::{Claims, TokenManager};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Verifies the `Authorization: Bearer <token>` header and returns the caller's claims.
pub fn authenticate(headers: &HeaderMap, tm: &dyn TokenManager) -> Result<Claims, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing or invalid authorization header".to_string()))?;

    Ok(tm.validate_access_token(token)?)
}

/// Taking `Claims` as a handler argument makes the route private.
impl<S> FromRequestParts<S> for Claims
where
    Arc<dyn TokenManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tm = Arc::<dyn TokenManager>::from_ref(state);
        authenticate(&parts.headers, tm.as_ref())
    }
}

fn correlation_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

pub async fn request_response_logger(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let start_time = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let c_id = correlation_id(req.headers());
    req.extensions_mut().insert(c_id.clone());

    tracing::info!(
        _cID = c_id,
        method = %method,
        uri = %uri,
        version = ?version,
        "Incoming request"
    );

    let mut response = next.run(req).await;

    let duration_ms = start_time.elapsed().as_millis();
    let status = response.status();

    response.headers_mut().insert(
        HeaderName::from_static(REQUEST_ID_HEADER),
        HeaderValue::from_str(&c_id).unwrap_or_else(|_| HeaderValue::from_static("invalid-correlation-id")),
    );

    if status.is_server_error() {
        tracing::error!(_cID = c_id, method = %method, uri = %uri, status = %status, duration_ms, "Request completed with server error");
    } else if status.is_client_error() {
        tracing::warn!(_cID = c_id, method = %method, uri = %uri, status = %status, duration_ms, "Request completed with client error");
    } else {
        tracing::info!(_cID = c_id, method = %method, uri = %uri, status = %status, duration_ms, "Request completed successfully");
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Router, middleware};
    use tower::ServiceExt;

    use super::*;
    use crate::jwt::{JwtError, MockTokenManager};

    fn claims(sub: i64) -> Claims {
        Claims { sub, exp: 9999999999, jti: "".into(), iss: "".into(), aud: "".into(), iat: 1 }
    }

    async fn protected(claims: Claims) -> impl IntoResponse {
        format!("Hello, user: {}", claims.sub)
    }

    fn app(tm: MockTokenManager) -> Router {
        let tm: Arc<dyn TokenManager> = Arc::new(tm);
        Router::new().route("/protected", get(protected)).with_state(tm)
    }

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_claims_extractor_success() {
        let mut tm = MockTokenManager::new();
        tm.expect_validate_access_token()
            .withf(|token| token == "valid_token")
            .returning(|_| Ok(claims(123)));

        let response = app(tm).oneshot(request(Some("Bearer valid_token"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8(body_bytes.to_vec()).unwrap(), "Hello, user: 123");
    }

    #[tokio::test]
    async fn test_claims_extractor_invalid_token() {
        let mut tm = MockTokenManager::new();
        tm.expect_validate_access_token().returning(|_| Err(JwtError::InvalidToken));

        let response = app(tm).oneshot(request(Some("Bearer invalid_token"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_claims_extractor_missing_header_skips_validation() {
        let mut tm = MockTokenManager::new();
        tm.expect_validate_access_token().never();

        let response = app(tm).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authenticate_rejects_other_schemes() {
        let mut tm = MockTokenManager::new();
        tm.expect_validate_access_token().never();

        for value in ["Basic dXNlcjpwYXNz", "Bearer ", "bearer token", "token"] {
            let mut headers = HeaderMap::new();
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());

            assert!(matches!(authenticate(&headers, &tm), Err(AppError::Unauthorized(_))), "{value}");
        }
    }

    #[test]
    fn test_authenticate_maps_expired_token() {
        let mut tm = MockTokenManager::new();
        tm.expect_validate_access_token().returning(|_| Err(JwtError::TokenExpired));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer stale"));

        assert!(matches!(authenticate(&headers, &tm), Err(AppError::Jwt(JwtError::TokenExpired))));
    }

    #[tokio::test]
    async fn test_request_response_logger_propagates_request_id() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(request_response_logger));

        let request = Request::builder().uri("/ping").header(REQUEST_ID_HEADER, "abc-123").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn test_request_response_logger_generates_request_id() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(request_response_logger));

        let response = app.oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap()).await.unwrap();

        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }
}
