//! Invoice repository
//!
//! `paid`, `add_date` and `paid_date` are filled by column defaults;
//! only `amt` is writable after creation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use super::{Company, DbError};

/// Invoice record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

/// Minimal projection used by the invoice listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// Invoice joined with the company that owns it
#[derive(Debug, Clone)]
pub struct InvoiceWithCompany {
    pub invoice: Invoice,
    pub company: Company,
}

/// Invoice repository
pub struct InvoiceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<InvoiceSummary>, DbError> {
        let invoices =
            sqlx::query_as::<_, InvoiceSummary>("SELECT id, comp_code FROM invoices")
                .fetch_all(self.pool)
                .await?;

        Ok(invoices)
    }

    /// Every invoice billed to `comp_code`, oldest id first.
    pub async fn list_for_company(&self, comp_code: &str) -> Result<Vec<Invoice>, DbError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, comp_code, amt, paid, add_date, paid_date
            FROM invoices
            WHERE comp_code = $1
            ORDER BY id
            "#,
        )
        .bind(comp_code)
        .fetch_all(self.pool)
        .await?;

        Ok(invoices)
    }

    /// Insert an invoice. An unknown `comp_code` fails on the foreign key.
    pub async fn create(&self, comp_code: &str, amt: f64) -> Result<Invoice, DbError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (comp_code, amt)
            VALUES ($1, $2)
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(comp_code)
        .bind(amt)
        .fetch_one(self.pool)
        .await?;

        Ok(invoice)
    }

    /// Fetch an invoice together with its company in one query.
    pub async fn get_with_company(&self, id: i32) -> Result<Option<InvoiceWithCompany>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT
                i.id,
                i.comp_code,
                i.amt,
                i.paid,
                i.add_date,
                i.paid_date,
                c.code,
                c.name,
                c.description
            FROM invoices i
            JOIN companies c ON c.code = i.comp_code
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| InvoiceWithCompany {
            invoice: Invoice {
                id: r.get("id"),
                comp_code: r.get("comp_code"),
                amt: r.get("amt"),
                paid: r.get("paid"),
                add_date: r.get("add_date"),
                paid_date: r.get("paid_date"),
            },
            company: Company {
                code: r.get("code"),
                name: r.get("name"),
                description: r.get("description"),
            },
        }))
    }

    /// Change the amount. Returns `None` when no row matches.
    pub async fn update_amount(&self, id: i32, amt: f64) -> Result<Option<Invoice>, DbError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices SET amt = $1
            WHERE id = $2
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(amt)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM invoices WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Delete an invoice. Returns `false` if nothing was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
