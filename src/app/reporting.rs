//! Reports page query.

use crate::domain::ItRequest;
use crate::error::AppError;
use crate::infra::StoreHandle;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Shown instead of internal error text when the listing cannot be read.
pub const REPORTS_UNAVAILABLE_MESSAGE: &str = "Reports are temporarily unavailable.";

/// A request as shown on the reports page; `created_at` is display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItRequestView {
    pub id: i64,
    pub requisition_code: String,
    pub date_of_request: String,
    pub type_of_system: String,
    pub quantity: String,
    pub model: Option<String>,
    pub proposed_configuration: Option<String>,
    pub requested_by: String,
    pub purpose_of_request: String,
    pub username_designation: String,
    pub email_id_request: Option<String>,
    pub date_of_joining: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ItRequest> for ItRequestView {
    fn from(r: ItRequest) -> Self {
        Self {
            created_at: format_created_at(&r.created_at),
            id: r.id,
            requisition_code: r.requisition_code,
            date_of_request: r.date_of_request,
            type_of_system: r.type_of_system,
            quantity: r.quantity,
            model: r.model,
            proposed_configuration: r.proposed_configuration,
            requested_by: r.requested_by,
            purpose_of_request: r.purpose_of_request,
            username_designation: r.username_designation,
            email_id_request: r.email_id_request,
            date_of_joining: r.date_of_joining,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    StoreUnavailable { message: String },
    Failed { message: String },
}

#[derive(Debug, Serialize)]
pub struct ReportListing {
    pub requests: Vec<ItRequestView>,
    pub status: ReportStatus,
}

impl ReportListing {
    fn degraded(status: ReportStatus) -> Self {
        Self {
            requests: Vec::new(),
            status,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ReportStatus::Ok
    }
}

/// Every request, newest first. Never fails: an unusable store yields an
/// empty listing with a status saying why.
pub fn list_requests(store: &StoreHandle) -> ReportListing {
    let mut rows = match store.select_all() {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("Reports unavailable, returning empty listing: {}", e);
            let status = match &e {
                AppError::StoreUnavailable(_) => ReportStatus::StoreUnavailable {
                    message: e.user_message(),
                },
                _ => ReportStatus::Failed {
                    message: REPORTS_UNAVAILABLE_MESSAGE.to_string(),
                },
            };
            return ReportListing::degraded(status);
        }
    };

    // Unparseable timestamps are None and sort after every dated row.
    rows.sort_by_key(|r| (Reverse(parse_timestamp(&r.created_at)), Reverse(r.id)));

    ReportListing {
        requests: rows.into_iter().map(ItRequestView::from).collect(),
        status: ReportStatus::Ok,
    }
}

/// `"2025-08-16T19:00:00.000Z"` becomes `"Aug 16, 2025, 07:00 PM"` (UTC).
pub fn format_created_at(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.format(DISPLAY_FORMAT).to_string(),
        None => "Unknown".to_string(),
    }
}

/// RFC 3339, or SQLite's `CURRENT_TIMESTAMP` form taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
