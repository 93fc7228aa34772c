//! Quote row queries

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::db::models::{Quote, QuoteStatus};
use crate::Result;

const QUOTE_COLUMNS: &str = "id, text, author, status, rating, submitted_at";

/// Insert a new quote in `Pending` status, returning its assigned id
pub async fn insert_quote(pool: &SqlitePool, text: &str, author: &str) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO quotes (text, author, status, rating, submitted_at)
         VALUES (?, ?, ?, 0, ?)",
    )
    .bind(text)
    .bind(author)
    .bind(QuoteStatus::Pending.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Fetch a quote by id
pub async fn find_quote(pool: &SqlitePool, id: i64) -> Result<Option<Quote>> {
    let row = sqlx::query(&format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| quote_from_row(&r)).transpose()
}

/// Check whether a quote exists (id-only projection)
pub async fn quote_exists(pool: &SqlitePool, id: i64) -> Result<bool> {
    let row = sqlx::query("SELECT id FROM quotes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Fetch one page of quotes, newest first
///
/// When a cursor is given, the page starts strictly after it: the cursor row
/// itself is excluded, so already-issued page boundaries stay stable while
/// new quotes arrive at the head of the ordering.
pub async fn list_page(pool: &SqlitePool, limit: i64, cursor: Option<i64>) -> Result<Vec<Quote>> {
    let rows = match cursor {
        Some(cursor) => {
            sqlx::query(&format!(
                "SELECT {QUOTE_COLUMNS} FROM quotes WHERE id < ? ORDER BY id DESC LIMIT ?"
            ))
            .bind(cursor)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY id DESC LIMIT ?"
            ))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(quote_from_row).collect()
}

fn quote_from_row(row: &SqliteRow) -> Result<Quote> {
    let status: String = row.try_get("status")?;
    let submitted_at: DateTime<Utc> = row.try_get("submitted_at")?;

    Ok(Quote {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
        author: row.try_get("author")?,
        status: QuoteStatus::parse(&status)?,
        rating: row.try_get("rating")?,
        submitted_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;

    #[tokio::test]
    async fn insert_then_find_returns_pending_row() {
        let pool = connect_memory().await.unwrap();

        let id = insert_quote(&pool, "A", "B").await.unwrap();
        assert_eq!(id, 1);

        let quote = find_quote(&pool, id).await.unwrap().unwrap();
        assert_eq!(quote.text, "A");
        assert_eq!(quote.author, "B");
        assert_eq!(quote.status, QuoteStatus::Pending);
        assert_eq!(quote.rating, 0);
    }

    #[tokio::test]
    async fn find_missing_quote_is_none() {
        let pool = connect_memory().await.unwrap();
        assert!(find_quote(&pool, 42).await.unwrap().is_none());
        assert!(!quote_exists(&pool, 42).await.unwrap());
    }

    #[tokio::test]
    async fn list_page_is_newest_first_and_cursor_excludes_row() {
        let pool = connect_memory().await.unwrap();
        for i in 1..=15 {
            insert_quote(&pool, &format!("q{i}"), "author").await.unwrap();
        }

        let first = list_page(&pool, 10, None).await.unwrap();
        let ids: Vec<i64> = first.iter().map(|q| q.id).collect();
        assert_eq!(ids, (6..=15).rev().collect::<Vec<i64>>());

        let second = list_page(&pool, 10, Some(6)).await.unwrap();
        let ids: Vec<i64> = second.iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=5).rev().collect::<Vec<i64>>());
        assert!(ids.iter().all(|&id| id < 6));

        let third = list_page(&pool, 10, Some(1)).await.unwrap();
        assert!(third.is_empty());
    }
}
