//! Human-readable requisition codes: `IT{YY}{MM}-{RRRR}`.

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;

/// Code for today's UTC date with a thread-local random suffix.
///
/// Codes are not checked against existing rows; two requests in the same
/// month can collide.
pub fn generate_requisition_code() -> String {
    requisition_code_for(Utc::now().date_naive(), &mut rand::rng())
}

/// Deterministic for a fixed date and seeded `rng`.
pub fn requisition_code_for<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> String {
    let yy = date.year().rem_euclid(100);
    let suffix: u16 = rng.random_range(0..10_000);
    format!("IT{:02}{:02}-{:04}", yy, date.month(), suffix)
}
