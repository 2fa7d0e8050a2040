//! Almanac storage layer
//!
//! Single-file SQLite storage for a home calendar/budgeting application:
//! category types, categories, and events, plus the report queries that
//! reshape the events table into chronological, per-month, per-category,
//! and category×month views.
//!
//! # Architecture
//!
//! - **One calendar per file** - each calendar is a standalone SQLite
//!   database owned by a [`CalendarDb`] handle
//! - **Repositories as free query functions** - CRUD lives in [`queries`]
//!   and operates on the handle's pool
//! - **Reports as projections** - the report types in [`models`] are never
//!   persisted, and busy time depends on each query's result order
//!
//! A handle keeps a single live connection, and [`CalendarDb::close`]
//! resolves only after the file lock is released. Sharing one calendar
//! file between several handles or processes is unsupported.
//!
//! # Usage
//!
//! ```rust,ignore
//! use almanac_db::CalendarDb;
//!
//! let db = CalendarDb::create_new("path/to/calendar.db").await?;
//! ```

pub mod connection;
pub mod datetime;
pub mod error;
pub mod models;
pub mod queries;
mod schema;

pub use connection::{CalendarDb, DbStats};
pub use error::{DbError, DbResult};

// Re-export key model types for convenience
pub use models::{
    CalendarItem, CalendarItemsByCategory, CalendarItemsByMonth, Category, CategoryMonthReport,
    CategoryMonthSlice, CategoryType, CategoryTypeRow, Event, MonthReport, TotalsReport,
};
