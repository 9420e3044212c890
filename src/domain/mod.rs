//! Domain types and pure rules.

pub mod it_request;
pub mod requisition_code;

pub use it_request::{ItRequest, NewItRequest, REQUIRED_FIELDS};
pub use requisition_code::{generate_requisition_code, requisition_code_for};
