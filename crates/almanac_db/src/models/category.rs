//! Category and category-type models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Coarse classification assignable to a category.
///
/// Stored as the integer id of the matching `categoryTypes` row, which is
/// seeded once at database creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum CategoryType {
    /// A scheduled event with a start time and duration
    Event = 1,
    /// A holiday
    Holiday = 2,
    /// An availability window
    Availability = 3,
    /// An event spanning the whole day
    AllDayEvent = 4,
}

impl CategoryType {
    /// Every type, in seeded id order.
    pub const ALL: [CategoryType; 4] = [
        CategoryType::Event,
        CategoryType::Holiday,
        CategoryType::Availability,
        CategoryType::AllDayEvent,
    ];

    /// Label seeded into the `categoryTypes` table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Event => "Event",
            Self::Holiday => "Holiday",
            Self::Availability => "Availability",
            Self::AllDayEvent => "AllDayEvent",
        }
    }
}

/// A row of the `categoryTypes` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CategoryTypeRow {
    /// Unique identifier
    pub id: i64,

    /// Type label
    pub description: String,
}

/// A user-defined tag for events (e.g. "Work", "Vacation").
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, assigned by the store and stable once assigned
    pub id: i64,

    /// Display text; not required to be unique
    pub description: String,

    /// Coarse classification
    pub category_type: CategoryType,
}
