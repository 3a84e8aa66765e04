//! Borrowing records and the views built from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrowing row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrowing {
    pub borrow_id: i32,
    pub member_id: i32,
    pub book_id: i32,
    pub borrow_date: DateTime<Utc>,
    /// `None` while the book is still out
    pub return_date: Option<DateTime<Utc>>,
}

/// Borrow or return request
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct LoanRequest {
    pub member_id: i32,
    pub book_id: i32,
}

/// A book a member currently holds
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActiveBorrow {
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub borrow_date: DateTime<Utc>,
}

/// One line of a member's borrowing history
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HistoryEntry {
    pub title: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// Library-wide view of who holds which book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OutstandingBorrow {
    pub borrow_id: i32,
    pub title: String,
    pub cover_url: Option<String>,
    pub full_name: String,
    pub borrow_date: DateTime<Utc>,
}
