//! Storage models.
//!
//! Row types map directly to database tables via sqlx; the report types
//! are projections built by the reporting queries and are never persisted.

mod category;
mod event;
mod report;

pub use category::{Category, CategoryType, CategoryTypeRow};
pub use event::Event;
pub use report::{
    CalendarItem, CalendarItemsByCategory, CalendarItemsByMonth, CategoryMonthReport,
    CategoryMonthSlice, MonthReport, TotalsReport,
};
