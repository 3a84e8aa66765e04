//! Members repository

use sqlx::{error::ErrorKind, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::member::{Member, MemberSummary, Role},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get member by username (exact match)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, password, full_name, role, created_at
            FROM members
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Insert a member with the `user` role.
    ///
    /// Username uniqueness is left to the `members_username_key` constraint, so
    /// two concurrent registrations cannot both succeed.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        full_name: &str,
    ) -> AppResult<MemberSummary> {
        sqlx::query_as::<_, MemberSummary>(
            r#"
            INSERT INTO members (username, password, full_name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING member_id, username, full_name, role, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(Role::User)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::on_constraint(e, |kind| match kind {
                ErrorKind::UniqueViolation => {
                    Some(AppError::BadRequest("Username is already taken".to_string()))
                }
                _ => None,
            })
        })
    }

    /// List members, newest first, without password hashes
    pub async fn list(&self) -> AppResult<Vec<MemberSummary>> {
        let members = sqlx::query_as::<_, MemberSummary>(
            r#"
            SELECT member_id, username, full_name, role, created_at
            FROM members
            ORDER BY member_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}
