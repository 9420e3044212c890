//! HTTP handlers (DTO boundary).

pub mod reports;
pub mod request;

use crate::error::{AppError, Unavailable};
use crate::infra::StoreHandle;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreHandle>,
}

impl AppState {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/request", post(request::submit))
        .route("/reports", get(reports::list))
        .with_state(state)
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(Unavailable::SchemaMissing(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unexpected(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_serde())).into_response()
    }
}
