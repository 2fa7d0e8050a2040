//! Event model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A calendar event.
///
/// `category_id` is never validated against the categories table: deleting
/// a category can leave events pointing at a missing id, and such events
/// drop out of the joined report views.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// When the event starts, second precision
    pub start_time: NaiveDateTime,

    /// Free-text details
    pub details: String,

    /// Length in minutes, non-negative
    pub duration_minutes: f64,

    /// Owning category id
    pub category_id: i64,
}
