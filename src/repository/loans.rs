//! Loans repository: borrowing records and the book status they drive

use chrono::Utc;
use sqlx::{error::ErrorKind, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookStatus,
        borrowing::{ActiveBorrow, Borrowing, HistoryEntry, OutstandingBorrow},
    },
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Lend a book to a member.
    ///
    /// The book is claimed with a conditional update (`available` → `borrowed`)
    /// and the borrowing row is inserted in the same transaction. Any failure
    /// drops the transaction, which rolls both statements back.
    pub async fn borrow(&self, member_id: i32, book_id: i32) -> AppResult<Borrowing> {
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query("UPDATE books SET status = $1 WHERE book_id = $2 AND status = $3")
            .bind(BookStatus::Borrowed)
            .bind(book_id)
            .bind(BookStatus::Available)
            .execute(&mut *tx)
            .await?;

        if claimed.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE book_id = $1)")
                    .bind(book_id)
                    .fetch_one(&mut *tx)
                    .await?;
            tx.rollback().await?;

            return Err(if exists {
                AppError::BusinessRule(format!("Book {} is not available", book_id))
            } else {
                AppError::NotFound(format!("Book {} not found", book_id))
            });
        }

        let record = sqlx::query_as::<_, Borrowing>(
            r#"
            INSERT INTO borrowing (member_id, book_id, borrow_date)
            VALUES ($1, $2, $3)
            RETURNING borrow_id, member_id, book_id, borrow_date, return_date
            "#,
        )
        .bind(member_id)
        .bind(book_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::on_constraint(e, |kind| match kind {
                ErrorKind::ForeignKeyViolation => {
                    Some(AppError::NotFound(format!("Member {} not found", member_id)))
                }
                // Open-borrow index: the book is out although its status said otherwise
                ErrorKind::UniqueViolation => {
                    Some(AppError::BusinessRule(format!("Book {} is not available", book_id)))
                }
                _ => None,
            })
        })?;

        tx.commit().await?;

        Ok(record)
    }

    /// Close the member's open borrowing of a book and mark the book available.
    ///
    /// Returns the closed record, or `None` when no open borrowing matched. The
    /// book is marked available unless another member still holds it.
    pub async fn return_book(&self, member_id: i32, book_id: i32) -> AppResult<Option<Borrowing>> {
        let mut tx = self.pool.begin().await?;

        let closed = sqlx::query_as::<_, Borrowing>(
            r#"
            UPDATE borrowing
            SET return_date = $1
            WHERE member_id = $2 AND book_id = $3 AND return_date IS NULL
            RETURNING borrow_id, member_id, book_id, borrow_date, return_date
            "#,
        )
        .bind(Utc::now())
        .bind(member_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE books SET status = $1
            WHERE book_id = $2
              AND NOT EXISTS (
                  SELECT 1 FROM borrowing WHERE book_id = $2 AND return_date IS NULL
              )
            "#,
        )
        .bind(BookStatus::Available)
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(closed)
    }

    /// Books a member currently holds
    pub async fn get_active_for_member(&self, member_id: i32) -> AppResult<Vec<ActiveBorrow>> {
        let rows = sqlx::query_as::<_, ActiveBorrow>(
            r#"
            SELECT b.book_id, b.title, b.author, b.cover_url, br.borrow_date
            FROM borrowing br
            JOIN books b ON br.book_id = b.book_id
            WHERE br.member_id = $1 AND br.return_date IS NULL
            ORDER BY br.borrow_date DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every borrowing of a member, most recent first
    pub async fn get_history_for_member(&self, member_id: i32) -> AppResult<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT b.title, br.borrow_date, br.return_date
            FROM borrowing br
            JOIN books b ON br.book_id = b.book_id
            WHERE br.member_id = $1
            ORDER BY br.borrow_date DESC, br.borrow_id DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All open borrowings with the holder's name, most recent first
    pub async fn get_all_active(&self) -> AppResult<Vec<OutstandingBorrow>> {
        let rows = sqlx::query_as::<_, OutstandingBorrow>(
            r#"
            SELECT br.borrow_id, b.title, b.cover_url, m.full_name, br.borrow_date
            FROM borrowing br
            JOIN books b ON br.book_id = b.book_id
            JOIN members m ON br.member_id = m.member_id
            WHERE br.return_date IS NULL
            ORDER BY br.borrow_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
