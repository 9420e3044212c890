//! Request intake use case.

use crate::domain::{requisition_code_for, ItRequest, NewItRequest, REQUIRED_FIELDS};
use crate::error::AppError;
use crate::infra::StoreHandle;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::HashMap;

pub const SUBMIT_SUCCESS_MESSAGE: &str =
    "IT request submitted successfully! Check the Reports page to see your request.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub success: bool,
    pub id: i64,
    pub requisition_code: String,
    pub message: String,
    pub request: ItRequest,
}

/// Validate `fields`, then persist one request stamped with the current time.
pub fn submit_request(
    store: &StoreHandle,
    fields: &HashMap<String, String>,
) -> Result<SubmitReceipt, AppError> {
    submit_request_at(store, fields, Utc::now())
}

/// Same as [`submit_request`] with an explicit clock.
pub fn submit_request_at(
    store: &StoreHandle,
    fields: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<SubmitReceipt, AppError> {
    let [
        requested_by,
        date_of_request,
        type_of_system,
        quantity,
        purpose_of_request,
        username_designation,
    ] = validate_required(fields)?;

    // Code prefix and displayed createdAt both use the UTC date.
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let code = requisition_code_for(now.date_naive(), &mut rand::rng());
    let new = NewItRequest {
        requisition_code: code,
        date_of_request,
        type_of_system,
        quantity,
        model: optional(fields, "model"),
        proposed_configuration: optional(fields, "proposedConfiguration"),
        requested_by,
        purpose_of_request,
        username_designation,
        email_id_request: optional(fields, "emailIdRequest"),
        date_of_joining: optional(fields, "dateOfJoining"),
        created_at: stamp.clone(),
        updated_at: stamp,
    };

    let id = store.insert(&new).map_err(|e| {
        log::error!("Error saving IT request: {}", e);
        e
    })?;
    log::info!(
        "IT request inserted: id={} code={}",
        id,
        new.requisition_code
    );

    Ok(SubmitReceipt {
        success: true,
        id,
        requisition_code: new.requisition_code.clone(),
        message: SUBMIT_SUCCESS_MESSAGE.to_string(),
        request: new.into_persisted(id),
    })
}

/// Trimmed required values in `REQUIRED_FIELDS` order, or the first one
/// that is missing or blank.
pub fn validate_required(
    fields: &HashMap<String, String>,
) -> Result<[String; 6], AppError> {
    let mut values: [String; 6] = Default::default();
    for (slot, name) in values.iter_mut().zip(REQUIRED_FIELDS) {
        *slot = required(fields, name)?;
    }
    Ok(values)
}

fn present<'a>(fields: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn required(fields: &HashMap<String, String>, name: &str) -> Result<String, AppError> {
    present(fields, name)
        .map(str::to_string)
        .ok_or_else(|| AppError::missing_field(name))
}

fn optional(fields: &HashMap<String, String>, name: &str) -> Option<String> {
    present(fields, name).map(str::to_string)
}
