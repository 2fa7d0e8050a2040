//! Event repository queries.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::datetime::fmt_datetime;
use crate::error::{DbError, DbResult};
use crate::models::Event;

const SELECT_EVENT: &str = r#"
SELECT EventId AS id, StartDateTime AS start_time, Details AS details,
       DurationInMinutes AS duration_minutes, CategoryId AS category_id
FROM events
"#;

/// List all events, oldest id first.
pub async fn list_events(pool: &SqlitePool) -> DbResult<Vec<Event>> {
    let sql = format!("{SELECT_EVENT} ORDER BY EventId ASC");
    let events = sqlx::query_as::<_, Event>(&sql).fetch_all(pool).await?;
    Ok(events)
}

/// Get an event by id.
pub async fn get_event(pool: &SqlitePool, id: i64) -> DbResult<Event> {
    let sql = format!("{SELECT_EVENT} WHERE EventId = ?");
    sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::not_found("Event", id.to_string()))
}

/// Create a new event and return it.
///
/// The category id is not checked against the categories table.
pub async fn add_event(
    pool: &SqlitePool,
    start_time: NaiveDateTime,
    category_id: i64,
    duration_minutes: f64,
    details: &str,
) -> DbResult<Event> {
    check_duration(duration_minutes)?;

    let result = sqlx::query(
        "INSERT INTO events (StartDateTime, Details, DurationInMinutes, CategoryId) VALUES (?, ?, ?, ?)",
    )
    .bind(fmt_datetime(start_time))
    .bind(details)
    .bind(duration_minutes)
    .bind(category_id)
    .execute(pool)
    .await?;

    Ok(Event {
        id: result.last_insert_rowid(),
        start_time,
        details: details.to_string(),
        duration_minutes,
        category_id,
    })
}

/// Replace every mutable field of an event.
pub async fn update_event(
    pool: &SqlitePool,
    id: i64,
    start_time: NaiveDateTime,
    category_id: i64,
    duration_minutes: f64,
    details: &str,
) -> DbResult<()> {
    check_duration(duration_minutes)?;

    let result = sqlx::query(
        "UPDATE events SET StartDateTime = ?, Details = ?, DurationInMinutes = ?, CategoryId = ? WHERE EventId = ?",
    )
    .bind(fmt_datetime(start_time))
    .bind(details)
    .bind(duration_minutes)
    .bind(category_id)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Event", id.to_string()));
    }
    Ok(())
}

/// Move an event to another category, leaving every other field alone.
pub async fn update_event_category(pool: &SqlitePool, id: i64, category_id: i64) -> DbResult<()> {
    let result = sqlx::query("UPDATE events SET CategoryId = ? WHERE EventId = ?")
        .bind(category_id)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Event", id.to_string()));
    }
    Ok(())
}

/// Delete an event. Deleting an absent id is not an error.
pub async fn delete_event(pool: &SqlitePool, id: i64) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM events WHERE EventId = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn check_duration(duration_minutes: f64) -> DbResult<()> {
    if duration_minutes < 0.0 {
        return Err(DbError::invalid_data("event duration must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::CalendarDb;
    use crate::datetime::parse_datetime;

    async fn setup_test_db() -> CalendarDb {
        CalendarDb::open_in_memory().await.unwrap()
    }

    fn ts(text: &str) -> NaiveDateTime {
        parse_datetime(text).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get_event() {
        let db = setup_test_db().await;

        let added = add_event(db.pool(), ts("2020-01-09 13:45:30"), 9, 1440.0, "Honolulu")
            .await
            .unwrap();
        assert_eq!(added.id, 1);

        let event = get_event(db.pool(), 1).await.unwrap();
        assert_eq!(event.start_time, ts("2020-01-09 13:45:30"));
        assert_eq!(event.category_id, 9);
        assert_eq!(event.duration_minutes, 1440.0);
        assert_eq!(event.details, "Honolulu");
    }

    #[tokio::test]
    async fn test_timestamps_are_stored_as_fixed_format_text() {
        let db = setup_test_db().await;

        add_event(db.pool(), ts("2020-01-09 13:45:30"), 1, 60.0, "Meeting")
            .await
            .unwrap();

        let stored: String = sqlx::query_scalar("SELECT StartDateTime FROM events WHERE EventId = 1")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stored, "2020-01-09 13:45:30");
    }

    #[tokio::test]
    async fn test_sequential_ids_from_empty_store() {
        let db = setup_test_db().await;

        for i in 1..=5 {
            let added = add_event(
                db.pool(),
                ts("2020-01-01 10:00:00"),
                1,
                30.0,
                &format!("Event {i}"),
            )
            .await
            .unwrap();
            assert_eq!(added.id, i);
        }
        assert_eq!(list_events(db.pool()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_dangling_category_id_is_permitted() {
        let db = setup_test_db().await;

        add_event(db.pool(), ts("2020-01-01 10:00:00"), 777, 30.0, "Orphan")
            .await
            .unwrap();
        let event = get_event(db.pool(), 1).await.unwrap();
        assert_eq!(event.category_id, 777);
    }

    #[tokio::test]
    async fn test_add_event_rejects_negative_duration() {
        let db = setup_test_db().await;

        let err = add_event(db.pool(), ts("2020-01-01 10:00:00"), 1, -5.0, "Bad")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidData { .. }));
        assert!(list_events(db.pool()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_event_replaces_all_fields() {
        let db = setup_test_db().await;

        add_event(db.pool(), ts("2020-01-01 10:00:00"), 1, 30.0, "Before")
            .await
            .unwrap();
        update_event(db.pool(), 1, ts("2021-06-15 08:30:00"), 2, 45.5, "After")
            .await
            .unwrap();

        let event = get_event(db.pool(), 1).await.unwrap();
        assert_eq!(event.start_time, ts("2021-06-15 08:30:00"));
        assert_eq!(event.category_id, 2);
        assert_eq!(event.duration_minutes, 45.5);
        assert_eq!(event.details, "After");
    }

    #[tokio::test]
    async fn test_update_absent_event_fails() {
        let db = setup_test_db().await;

        let err = update_event(db.pool(), 42, ts("2020-01-01 10:00:00"), 1, 30.0, "X")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { entity_type, .. } if entity_type == "Event"));

        let err = update_event_category(db.pool(), 42, 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_event_category_only_moves_the_category() {
        let db = setup_test_db().await;

        add_event(db.pool(), ts("2020-01-01 10:00:00"), 1, 30.0, "Meeting")
            .await
            .unwrap();
        update_event_category(db.pool(), 1, 5).await.unwrap();

        let event = get_event(db.pool(), 1).await.unwrap();
        assert_eq!(event.category_id, 5);
        assert_eq!(event.details, "Meeting");
        assert_eq!(event.duration_minutes, 30.0);
    }

    #[tokio::test]
    async fn test_delete_absent_event_is_a_noop() {
        let db = setup_test_db().await;

        add_event(db.pool(), ts("2020-01-01 10:00:00"), 1, 30.0, "Keep")
            .await
            .unwrap();

        assert!(!delete_event(db.pool(), 99).await.unwrap());
        let events = list_events(db.pool()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].details, "Keep");
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let db = setup_test_db().await;

        let err = get_event(db.pool(), 7).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
