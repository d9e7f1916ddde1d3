//! Repository for the `banks` table.

use sqlx::PgPool;

use balance_core::types::DbId;

use crate::models::bank::{Bank, CreateBank};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, code, token, certificate_url, created_at, updated_at";

/// Provides CRUD operations for bank links.
pub struct BankRepo;

impl BankRepo {
    /// Insert a new bank link, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBank) -> Result<Bank, sqlx::Error> {
        let query = format!(
            "INSERT INTO banks (user_id, code, token, certificate_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bank>(&query)
            .bind(input.user_id)
            .bind(&input.code)
            .bind(&input.token)
            .bind(&input.certificate_url)
            .fetch_one(pool)
            .await
    }

    /// Fetch a bank link by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bank>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM banks WHERE id = $1");
        sqlx::query_as::<_, Bank>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bank links for a user, newest first.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Bank>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM banks WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Bank>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a bank link. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM banks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
