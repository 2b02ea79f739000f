//! Company repository
//!
//! `code` is caller-supplied and never rewritten by an update.

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Company record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Company repository
pub struct CompanyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every company in database order.
    pub async fn list(&self) -> Result<Vec<Company>, DbError> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(companies)
    }

    /// Insert a company. A duplicate `code` fails on the primary key.
    pub async fn create(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Company, DbError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING code, name, description
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        Ok(company)
    }

    pub async fn get(&self, code: &str) -> Result<Option<Company>, DbError> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(company)
    }

    /// Update `name` and `description`. Returns `None` when no row matches.
    pub async fn update(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Company>, DbError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET name = $1, description = $2
            WHERE code = $3
            RETURNING code, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(company)
    }

    pub async fn exists(&self, code: &str) -> Result<bool, DbError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Delete a company. Returns `false` if nothing was removed.
    pub async fn delete(&self, code: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
