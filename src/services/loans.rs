//! Loan management service

use crate::{
    error::AppResult,
    models::borrowing::{ActiveBorrow, Borrowing, HistoryEntry, OutstandingBorrow},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow an available book
    pub async fn borrow(&self, member_id: i32, book_id: i32) -> AppResult<Borrowing> {
        let record = self.repository.loans.borrow(member_id, book_id).await?;
        tracing::info!(
            "Member {} borrowed book {} (borrow {})",
            member_id,
            book_id,
            record.borrow_id
        );
        Ok(record)
    }

    /// Return a book. Succeeds even when the member had no open borrowing of it.
    pub async fn return_book(&self, member_id: i32, book_id: i32) -> AppResult<()> {
        match self.repository.loans.return_book(member_id, book_id).await? {
            Some(record) => tracing::info!(
                "Member {} returned book {} (borrow {})",
                member_id,
                book_id,
                record.borrow_id
            ),
            None => tracing::warn!(
                "Member {} returned book {} without an open borrowing",
                member_id,
                book_id
            ),
        }
        Ok(())
    }

    /// Books a member currently holds
    pub async fn list_active_borrows(&self, member_id: i32) -> AppResult<Vec<ActiveBorrow>> {
        self.repository.loans.get_active_for_member(member_id).await
    }

    /// A member's full borrowing history
    pub async fn list_history(&self, member_id: i32) -> AppResult<Vec<HistoryEntry>> {
        self.repository.loans.get_history_for_member(member_id).await
    }

    /// Every open borrowing in the library
    pub async fn list_all_active_borrows(&self) -> AppResult<Vec<OutstandingBorrow>> {
        self.repository.loans.get_all_active().await
    }
}
