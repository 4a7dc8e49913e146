//! Folds axum's extractor rejections into [`AppError::RequestFormat`].

use axum::extract::rejection::{JsonRejection, PathRejection};

use super::error::AppError;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::RequestFormat(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::RequestFormat(rejection.body_text())
    }
}
