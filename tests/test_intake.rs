//! Request intake integration tests

use app_lib::app::{submit_request, submit_request_at, validate_required, SUBMIT_SUCCESS_MESSAGE};
use app_lib::domain::REQUIRED_FIELDS;
use app_lib::error::{AppError, Unavailable};
use app_lib::infra::db::init_test_db;
use app_lib::infra::{StoreHandle, StoreLocation};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;

// ──────────────────────── Helper ────────────────────────

fn john_doe() -> HashMap<String, String> {
    [
        ("requestedBy", "John Doe"),
        ("dateOfRequest", "2025-08-16"),
        ("typeOfSystem", "Laptop"),
        ("quantity", "1"),
        ("purposeOfRequest", "Dev work"),
        ("usernameDesignation", "Senior Developer"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn is_requisition_code(code: &str) -> bool {
    let b = code.as_bytes();
    b.len() == 11
        && code.starts_with("IT")
        && b[6] == b'-'
        && b[2..6].iter().all(u8::is_ascii_digit)
        && b[7..].iter().all(u8::is_ascii_digit)
}

// ══════════════════════════════════════════════════════════
//  validation
// ══════════════════════════════════════════════════════════

#[test]
fn empty_submission_cites_requested_by() {
    let store = init_test_db();
    let err = submit_request(&store, &HashMap::new()).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(err.field(), Some("requestedBy"));
    assert_eq!(err.user_message(), "requestedBy is required");
}

#[test]
fn each_missing_required_field_is_named_and_nothing_written() {
    let store = init_test_db();
    for field in REQUIRED_FIELDS {
        let mut fields = john_doe();
        fields.remove(field);
        let err = submit_request(&store, &fields).unwrap_err();
        assert_eq!(err.field(), Some(field));
        assert_eq!(store.count().unwrap(), 0);
    }
}

#[test]
fn blank_required_field_counts_as_missing() {
    let store = init_test_db();
    let mut fields = john_doe();
    fields.insert("quantity".into(), "   ".into());
    let err = submit_request(&store, &fields).unwrap_err();
    assert_eq!(err.field(), Some("quantity"));
}

#[test]
fn first_missing_field_in_form_order_wins() {
    let store = init_test_db();
    let mut fields = john_doe();
    fields.remove("usernameDesignation");
    fields.remove("typeOfSystem");
    let err = submit_request(&store, &fields).unwrap_err();
    assert_eq!(err.field(), Some("typeOfSystem"));
}

#[test]
fn validation_happens_before_store_is_touched() {
    let store = StoreHandle::new(StoreLocation::Memory);
    let err = submit_request(&store, &HashMap::new()).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(!store.is_connected());
}

// ══════════════════════════════════════════════════════════
//  successful submission
// ══════════════════════════════════════════════════════════

#[test]
fn valid_submission_appends_one_row() {
    let store = init_test_db();
    let receipt = submit_request(&store, &john_doe()).unwrap();
    assert!(receipt.success);
    assert_eq!(receipt.message, SUBMIT_SUCCESS_MESSAGE);
    assert_eq!(receipt.id, receipt.request.id);
    assert_eq!(receipt.requisition_code, receipt.request.requisition_code);
    assert_eq!(store.count().unwrap(), 1);

    let rows = store.select_all().unwrap();
    assert_eq!(rows[0], receipt.request);
    assert_eq!(rows[0].requested_by, "John Doe");
    assert_eq!(rows[0].type_of_system, "Laptop");
    assert!(is_requisition_code(&rows[0].requisition_code));
}

#[test]
fn ids_strictly_increase() {
    let store = init_test_db();
    let mut last = 0;
    for _ in 0..5 {
        let receipt = submit_request(&store, &john_doe()).unwrap();
        assert!(receipt.request.id > last);
        last = receipt.request.id;
    }
    assert_eq!(store.count().unwrap(), 5);
}

#[test]
fn optional_fields_absent_are_none_not_empty() {
    let store = init_test_db();
    let mut fields = john_doe();
    fields.insert("model".into(), "".into());
    fields.insert("emailIdRequest".into(), "  ".into());
    let receipt = submit_request(&store, &fields).unwrap();
    let row = &store.select_all().unwrap()[0];
    assert_eq!(row.model, None);
    assert_eq!(row.email_id_request, None);
    assert_eq!(row.proposed_configuration, None);
    assert_eq!(row.date_of_joining, None);
    assert_eq!(receipt.request.model, None);
}

#[test]
fn optional_fields_and_trimming_are_persisted() {
    let store = init_test_db();
    let mut fields = john_doe();
    fields.insert("requestedBy".into(), "  John Doe  ".into());
    fields.insert("model".into(), "Dell Inspiron 15".into());
    fields.insert("proposedConfiguration".into(), "16GB RAM".into());
    fields.insert("emailIdRequest".into(), "john.doe@company.com".into());
    fields.insert("dateOfJoining".into(), "2024-01-15".into());
    submit_request(&store, &fields).unwrap();

    let row = &store.select_all().unwrap()[0];
    assert_eq!(row.requested_by, "John Doe");
    assert_eq!(row.model.as_deref(), Some("Dell Inspiron 15"));
    assert_eq!(row.proposed_configuration.as_deref(), Some("16GB RAM"));
    assert_eq!(row.email_id_request.as_deref(), Some("john.doe@company.com"));
    assert_eq!(row.date_of_joining.as_deref(), Some("2024-01-15"));
}

#[test]
fn timestamps_are_stamped_from_clock() {
    let store = init_test_db();
    let now = Utc.with_ymd_and_hms(2025, 8, 16, 19, 0, 0).unwrap();
    let receipt = submit_request_at(&store, &john_doe(), now).unwrap();
    assert_eq!(receipt.request.created_at, "2025-08-16T19:00:00.000Z");
    assert_eq!(receipt.request.updated_at, receipt.request.created_at);
    assert!(receipt.request.requisition_code.starts_with("IT2508-"));
}

#[test]
fn requisition_code_month_follows_utc_created_at() {
    let store = init_test_db();
    let late = Utc.with_ymd_and_hms(2025, 8, 31, 23, 30, 0).unwrap();
    let receipt = submit_request_at(&store, &john_doe(), late).unwrap();
    assert!(
        receipt.requisition_code.starts_with("IT2508-"),
        "{}",
        receipt.requisition_code
    );
    let listing = app_lib::app::list_requests(&store);
    assert!(listing.requests[0].created_at.starts_with("Aug 31, 2025"));
}

#[test]
fn validated_values_come_back_trimmed_in_form_order() {
    let mut fields = john_doe();
    fields.insert("typeOfSystem".into(), "  Laptop ".into());
    let values = validate_required(&fields).unwrap();
    assert_eq!(
        values,
        [
            "John Doe",
            "2025-08-16",
            "Laptop",
            "1",
            "Dev work",
            "Senior Developer"
        ]
        .map(String::from)
    );
}

#[test]
fn unknown_fields_are_ignored() {
    let store = init_test_db();
    let mut fields = john_doe();
    fields.insert("favouriteColour".into(), "green".into());
    assert!(submit_request(&store, &fields).is_ok());
}

// ══════════════════════════════════════════════════════════
//  persistence failures
// ══════════════════════════════════════════════════════════

#[test]
fn unreachable_store_is_failure_not_success() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let store = StoreHandle::new(StoreLocation::File(blocker.join("app.db")));

    let err = submit_request(&store, &john_doe()).unwrap_err();
    assert!(matches!(
        err,
        AppError::StoreUnavailable(Unavailable::Connect(_))
    ));
    assert_eq!(
        err.user_message(),
        "Database connection not available. Please try again later."
    );
}

#[test]
fn unsupported_location_is_failure() {
    let store = StoreHandle::new(StoreLocation::parse("libsql://db.example.com"));
    let err = submit_request(&store, &john_doe()).unwrap_err();
    assert_eq!(err.code(), "STORE_UNAVAILABLE");
}

#[test]
fn missing_table_is_reported_as_uninitialized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requests.db");
    let store = StoreHandle::new(StoreLocation::File(path.clone()));
    store.ensure_schema().unwrap();

    let other = rusqlite::Connection::open(&path).unwrap();
    other.execute_batch("DROP TABLE it_requests").unwrap();
    drop(other);

    let err = submit_request(&store, &john_doe()).unwrap_err();
    assert!(matches!(
        err,
        AppError::StoreUnavailable(Unavailable::SchemaMissing(_))
    ));
    assert_eq!(
        err.user_message(),
        "Database not properly initialized. Please contact IT support."
    );
}
