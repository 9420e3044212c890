//! IT equipment request record.

use serde::{Deserialize, Serialize};

/// Form fields that must be present and non-blank, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "requestedBy",
    "dateOfRequest",
    "typeOfSystem",
    "quantity",
    "purposeOfRequest",
    "usernameDesignation",
];

/// A persisted row of `it_requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItRequest {
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

/// Everything needed to insert a row; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItRequest {
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

impl NewItRequest {
    pub fn into_persisted(self, id: i64) -> ItRequest {
        ItRequest {
            id,
            requisition_code: self.requisition_code,
            date_of_request: self.date_of_request,
            type_of_system: self.type_of_system,
            quantity: self.quantity,
            model: self.model,
            proposed_configuration: self.proposed_configuration,
            requested_by: self.requested_by,
            purpose_of_request: self.purpose_of_request,
            username_designation: self.username_designation,
            email_id_request: self.email_id_request,
            date_of_joining: self.date_of_joining,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
