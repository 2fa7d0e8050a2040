//! Category repository queries.

use sqlx::SqlitePool;

use crate::error::{DbError, DbResult};
use crate::models::{Category, CategoryType, CategoryTypeRow};

/// The fixed default set applied by [`set_default_categories`], in id
/// order starting from 1.
pub const DEFAULT_CATEGORIES: [(&str, CategoryType); 12] = [
    ("School", CategoryType::Event),
    ("Work", CategoryType::Event),
    ("Personal", CategoryType::Event),
    ("Medical", CategoryType::Event),
    ("Sleep", CategoryType::Availability),
    ("On call", CategoryType::Availability),
    ("Canadian Holidays", CategoryType::Holiday),
    ("US Holidays", CategoryType::Holiday),
    ("Vacation", CategoryType::AllDayEvent),
    ("Wellness days", CategoryType::AllDayEvent),
    ("Birthdays", CategoryType::AllDayEvent),
    ("Non Standard", CategoryType::Event),
];

const SELECT_CATEGORY: &str = r#"
SELECT CategoryId AS id, Description AS description, CategoryTypeId AS category_type
FROM categories
"#;

/// List all categories, oldest first.
pub async fn list_categories(pool: &SqlitePool) -> DbResult<Vec<Category>> {
    let sql = format!("{SELECT_CATEGORY} ORDER BY CategoryId ASC");
    let categories = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(categories)
}

/// Get a category by id.
pub async fn get_category(pool: &SqlitePool, id: i64) -> DbResult<Category> {
    let sql = format!("{SELECT_CATEGORY} WHERE CategoryId = ?");
    sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::not_found("Category", id.to_string()))
}

/// Create a new category and return it.
pub async fn add_category(
    pool: &SqlitePool,
    description: &str,
    category_type: CategoryType,
) -> DbResult<Category> {
    if description.trim().is_empty() {
        return Err(DbError::invalid_data(
            "category description must not be empty",
        ));
    }

    let result = sqlx::query("INSERT INTO categories (Description, CategoryTypeId) VALUES (?, ?)")
        .bind(description)
        .bind(category_type)
        .execute(pool)
        .await?;

    Ok(Category {
        id: result.last_insert_rowid(),
        description: description.to_string(),
        category_type,
    })
}

/// Delete a category. Deleting an absent id is not an error; events
/// pointing at the id are left in place.
pub async fn delete_category(pool: &SqlitePool, id: i64) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE CategoryId = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Replace all categories with the default set.
///
/// Resets the id sequence first, so the defaults always land on ids 1..N
/// no matter what was in the table before.
pub async fn set_default_categories(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query("DELETE FROM categories").execute(pool).await?;
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'categories'")
        .execute(pool)
        .await?;

    for (description, category_type) in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO categories (Description, CategoryTypeId) VALUES (?, ?)")
            .bind(description)
            .bind(category_type)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// List the category types, in seeded order.
pub async fn list_category_types(pool: &SqlitePool) -> DbResult<Vec<CategoryTypeRow>> {
    let rows = sqlx::query_as::<_, CategoryTypeRow>(
        "SELECT CategoryTypeId AS id, Description AS description FROM categoryTypes ORDER BY CategoryTypeId ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
