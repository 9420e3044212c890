//! `POST /request`: the intake form action.

use super::AppState;
use crate::app::{submit_request, SubmitReceipt};
use crate::error::AppError;
use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// The form posts every answer as one JSON object in `answers`.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub answers: String,
}

pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Json<SubmitReceipt>, AppError> {
    let fields = parse_answers(&form.answers)?;
    let store = state.store.clone();
    let receipt = tokio::task::spawn_blocking(move || submit_request(&store, &fields))
        .await
        .map_err(|e| AppError::Unexpected(format!("intake task failed: {}", e)))??;
    Ok(Json(receipt))
}

/// Flatten the `answers` JSON object into string fields.
///
/// Numbers and booleans are stringified, nulls are dropped. A blank value is
/// an empty submission.
pub fn parse_answers(raw: &str) -> Result<HashMap<String, String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    let value: Value = serde_json::from_str(raw).map_err(|e| AppError::Validation {
        field: "answers".into(),
        message: format!("answers is not valid JSON: {}", e),
    })?;
    let Value::Object(map) = value else {
        return Err(AppError::Validation {
            field: "answers".into(),
            message: "answers must be a JSON object".into(),
        });
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, v)| {
            let text = match v {
                Value::Null => return None,
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => other.to_string(),
            };
            Some((key, text))
        })
        .collect())
}
