//! Report models.
//!
//! Busy time is a property of a query's result order, not of the event
//! itself: the same event carries a different `busy_time` in every view,
//! and re-running a view with a different filter changes every downstream
//! value.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of a calendar report: an event joined to its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarItem {
    /// Source event id
    pub event_id: i64,

    /// Source category id
    pub category_id: i64,

    /// Category display text at query time
    pub category: String,

    /// Event details
    pub short_description: String,

    /// When the event starts
    pub start_time: NaiveDateTime,

    /// Length in minutes
    pub duration_minutes: f64,

    /// Running duration total over the items emitted so far in this view
    pub busy_time: f64,
}

/// The items of one `YYYY-MM` month bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarItemsByMonth {
    /// `YYYY-MM` key
    pub month: String,

    /// Items of the month, chronological
    pub items: Vec<CalendarItem>,

    /// Duration sum over `items`
    pub total_busy_time: f64,
}

/// The items of one category within the queried range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarItemsByCategory {
    /// Category display text
    pub category: String,

    /// Items of the category, ordered by event details
    pub items: Vec<CalendarItem>,

    /// Duration sum over `items`
    pub total_busy_time: f64,
}

/// One category's share of one month in the category×month matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMonthSlice {
    /// The category's items within the month
    pub items: Vec<CalendarItem>,

    /// Duration sum over `items`
    pub total_busy_time: f64,
}

/// One month of the category×month matrix.
///
/// A category has an entry only if it has at least one event in the
/// month; the map iterates in alphabetical category order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthReport {
    /// `YYYY-MM` key
    pub month: String,

    /// Duration sum over the whole month
    pub total_busy_time: f64,

    /// Per-category items and subtotals
    pub categories: BTreeMap<String, CategoryMonthSlice>,
}

/// Grand totals per category across every month of the matrix.
///
/// A category has an entry only if it had at least one event anywhere in
/// range. Zero-event categories are omitted, never reported as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalsReport {
    /// Category display text to grand total
    pub per_category: BTreeMap<String, f64>,
}

/// The full category×month matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMonthReport {
    /// One record per month, chronological
    pub months: Vec<MonthReport>,

    /// Grand totals across `months`
    pub totals: TotalsReport,
}
