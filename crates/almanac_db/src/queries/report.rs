//! Calendar report queries.
//!
//! Four views over the joined events/categories tables: chronological,
//! per month, per category, and the category×month matrix. Busy time is a
//! running duration total over each view's own result order, so the same
//! event carries different values across views and filters.
//!
//! All four views share the same filter parameters: an optional inclusive
//! start/end range (open ends fall back to far-past/far-future sentinels)
//! and an optional single-category restriction. An unmatched filter yields
//! empty results, never an error.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};

use crate::datetime::{month_bounds, range_end, range_start};
use crate::error::DbResult;
use crate::models::{
    CalendarItem, CalendarItemsByCategory, CalendarItemsByMonth, CategoryMonthReport,
    CategoryMonthSlice, MonthReport, TotalsReport,
};

use super::category::list_categories;

/// Joined row shape shared by the item queries.
#[derive(Debug, FromRow)]
struct ItemRow {
    event_id: i64,
    category_id: i64,
    category: String,
    details: String,
    start_time: NaiveDateTime,
    duration_minutes: f64,
}

const ITEM_COLUMNS: &str = r#"
SELECT e.EventId AS event_id, e.CategoryId AS category_id, c.Description AS category,
       e.Details AS details, e.StartDateTime AS start_time,
       e.DurationInMinutes AS duration_minutes
FROM events e
JOIN categories c ON e.CategoryId = c.CategoryId
"#;

fn category_clause(category: Option<i64>) -> &'static str {
    if category.is_some() {
        "AND e.CategoryId = ?"
    } else {
        ""
    }
}

fn with_running_busy_time(rows: Vec<ItemRow>) -> Vec<CalendarItem> {
    let mut busy_time = 0.0;
    rows.into_iter()
        .map(|row| {
            busy_time += row.duration_minutes;
            CalendarItem {
                event_id: row.event_id,
                category_id: row.category_id,
                category: row.category,
                short_description: row.details,
                start_time: row.start_time,
                duration_minutes: row.duration_minutes,
                busy_time,
            }
        })
        .collect()
}

/// Chronological calendar items within the (inclusive) range.
///
/// Items are ordered by start time (event id as a stable tie-break) and
/// each item's `busy_time` is the running duration total over the
/// filtered, ordered sequence.
pub async fn get_calendar_items(
    pool: &SqlitePool,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    category: Option<i64>,
) -> DbResult<Vec<CalendarItem>> {
    let sql = format!(
        "{ITEM_COLUMNS} WHERE e.StartDateTime >= ? AND e.StartDateTime <= ? {} \
         ORDER BY e.StartDateTime ASC, e.EventId ASC",
        category_clause(category),
    );
    let mut query = sqlx::query_as::<_, ItemRow>(&sql)
        .bind(range_start(start))
        .bind(range_end(end));
    if let Some(id) = category {
        query = query.bind(id);
    }

    let rows = query.fetch_all(pool).await?;
    Ok(with_running_busy_time(rows))
}

/// Calendar items bucketed by `YYYY-MM` month, chronological.
///
/// The bucket set is the distinct months of the rows matching the
/// range/filter; each bucket is then queried over its whole month window,
/// so a range boundary that cuts into a month still yields that month's
/// full item list.
pub async fn get_calendar_items_by_month(
    pool: &SqlitePool,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    category: Option<i64>,
) -> DbResult<Vec<CalendarItemsByMonth>> {
    let sql = format!(
        "SELECT DISTINCT substr(e.StartDateTime, 1, 7) FROM events e \
         JOIN categories c ON e.CategoryId = c.CategoryId \
         WHERE e.StartDateTime >= ? AND e.StartDateTime <= ? {} \
         ORDER BY 1 ASC",
        category_clause(category),
    );
    let mut query = sqlx::query_scalar::<_, String>(&sql)
        .bind(range_start(start))
        .bind(range_end(end));
    if let Some(id) = category {
        query = query.bind(id);
    }
    let months = query.fetch_all(pool).await?;

    let mut groups = Vec::with_capacity(months.len());
    for month in months {
        let (month_start, month_end) = month_bounds(&month)?;
        let items = get_calendar_items(pool, Some(month_start), Some(month_end), category).await?;
        let total_busy_time = items.iter().map(|item| item.duration_minutes).sum();
        groups.push(CalendarItemsByMonth {
            month,
            items,
            total_busy_time,
        });
    }
    Ok(groups)
}

/// Calendar items grouped by category description.
///
/// Range bounds are exclusive here, unlike every other view: an event
/// sitting exactly on a bound is left out. Groups are ordered by category
/// description, items within a group by event details, and `busy_time`
/// keeps running across the whole traversal.
pub async fn get_calendar_items_by_category(
    pool: &SqlitePool,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    category: Option<i64>,
) -> DbResult<Vec<CalendarItemsByCategory>> {
    let sql = format!(
        "{ITEM_COLUMNS} WHERE e.StartDateTime > ? AND e.StartDateTime < ? {} \
         ORDER BY c.Description ASC, e.Details ASC, e.EventId ASC",
        category_clause(category),
    );
    let mut query = sqlx::query_as::<_, ItemRow>(&sql)
        .bind(range_start(start))
        .bind(range_end(end));
    if let Some(id) = category {
        query = query.bind(id);
    }
    let items = with_running_busy_time(query.fetch_all(pool).await?);

    // Input is pre-sorted by category, so consecutive rows fold into groups
    let mut groups: Vec<CalendarItemsByCategory> = Vec::new();
    for item in items {
        match groups.last_mut() {
            Some(group) if group.category == item.category => {
                group.total_busy_time += item.duration_minutes;
                group.items.push(item);
            }
            _ => {
                groups.push(CalendarItemsByCategory {
                    category: item.category.clone(),
                    total_busy_time: item.duration_minutes,
                    items: vec![item],
                });
            }
        }
    }
    Ok(groups)
}

/// The category×month matrix: for each month, every category's items and
/// subtotal; plus grand totals per category across all months.
///
/// A category appears in a month record, and in the totals, only if it
/// has at least one event there. Zero-event categories are omitted, never
/// reported as 0, even when the categories table knows them.
pub async fn get_calendar_report_by_category_and_month(
    pool: &SqlitePool,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    category: Option<i64>,
) -> DbResult<CategoryMonthReport> {
    let by_month = get_calendar_items_by_month(pool, start, end, category).await?;

    let mut grand_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut months = Vec::with_capacity(by_month.len());
    for group in by_month {
        let mut categories: BTreeMap<String, CategoryMonthSlice> = BTreeMap::new();
        for item in group.items {
            *grand_totals.entry(item.category.clone()).or_insert(0.0) += item.duration_minutes;
            let slice = categories
                .entry(item.category.clone())
                .or_insert_with(|| CategoryMonthSlice {
                    items: Vec::new(),
                    total_busy_time: 0.0,
                });
            slice.total_busy_time += item.duration_minutes;
            slice.items.push(item);
        }
        months.push(MonthReport {
            month: group.month,
            total_busy_time: group.total_busy_time,
            categories,
        });
    }

    // Walk the known categories and copy a grand total only when one
    // accumulated: absence of an entry is the contract for zero events
    let mut per_category = BTreeMap::new();
    for known in list_categories(pool).await? {
        if let Some(total) = grand_totals.get(&known.description) {
            per_category.insert(known.description, *total);
        }
    }

    Ok(CategoryMonthReport {
        months,
        totals: TotalsReport { per_category },
    })
}
