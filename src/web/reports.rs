//! `GET /reports`: listing for the reports page.

use super::AppState;
use crate::app::{list_requests, ReportListing, ReportStatus, REPORTS_UNAVAILABLE_MESSAGE};
use axum::extract::State;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Json<ReportListing> {
    let store = state.store.clone();
    match tokio::task::spawn_blocking(move || list_requests(&store)).await {
        Ok(listing) => Json(listing),
        Err(e) => {
            log::error!("Reports task failed: {}", e);
            Json(ReportListing {
                requests: Vec::new(),
                status: ReportStatus::Failed {
                    message: REPORTS_UNAVAILABLE_MESSAGE.to_string(),
                },
            })
        }
    }
}
