//! Application use cases.

mod intake;
mod reporting;

pub use intake::{
    submit_request, submit_request_at, validate_required, SubmitReceipt, SUBMIT_SUCCESS_MESSAGE,
};
pub use reporting::{
    format_created_at, list_requests, ItRequestView, ReportListing, ReportStatus,
    REPORTS_UNAVAILABLE_MESSAGE,
};
