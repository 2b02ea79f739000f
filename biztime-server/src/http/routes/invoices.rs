//! Invoice endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Invoice, InvoiceSummary, InvoiceWithCompany};
use crate::http::dates::{http_date, iso_timestamp};
use crate::http::error::ApiError;
use crate::http::extractors::{InvoiceId, JsonBody};
use crate::http::routes::companies::CompanyResponse;
use crate::http::server::AppState;

/// Create invoice request
#[derive(Deserialize)]
pub struct CreateInvoiceRequest {
    pub comp_code: String,
    pub amt: f64,
}

/// Update invoice request
#[derive(Deserialize)]
pub struct UpdateInvoiceRequest {
    pub amt: f64,
}

/// Listing projection
#[derive(Debug, Serialize)]
pub struct InvoiceSummaryResponse {
    pub id: i32,
    pub comp_code: String,
}

impl From<InvoiceSummary> for InvoiceSummaryResponse {
    fn from(i: InvoiceSummary) -> Self {
        Self {
            id: i.id,
            comp_code: i.comp_code,
        }
    }
}

/// Invoice response for create and update
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: String,
    pub paid_date: Option<String>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            comp_code: i.comp_code,
            amt: i.amt,
            paid: i.paid,
            add_date: iso_timestamp(i.add_date),
            paid_date: i.paid_date.map(iso_timestamp),
        }
    }
}

/// Single invoice with its company nested
#[derive(Debug, Serialize)]
pub struct InvoiceDetailResponse {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: String,
    pub paid_date: Option<String>,
    pub company: CompanyResponse,
}

impl From<InvoiceWithCompany> for InvoiceDetailResponse {
    fn from(found: InvoiceWithCompany) -> Self {
        let InvoiceWithCompany { invoice, company } = found;
        Self {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: http_date(invoice.add_date),
            paid_date: invoice.paid_date.map(iso_timestamp),
            company: CompanyResponse::from(company),
        }
    }
}

#[derive(Serialize)]
pub struct InvoiceList {
    pub invoices: Vec<InvoiceSummaryResponse>,
}

#[derive(Serialize)]
pub struct InvoiceEnvelope<T> {
    pub invoice: T,
}

#[derive(Serialize)]
pub struct InvoiceDeleted {
    pub status: &'static str,
}

/// GET /invoices - list id and company code of every invoice
async fn list_invoices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InvoiceList>, ApiError> {
    let invoices = state.db.invoices().list().await?;

    Ok(Json(InvoiceList {
        invoices: invoices
            .into_iter()
            .map(InvoiceSummaryResponse::from)
            .collect(),
    }))
}

/// POST /invoices - create an unpaid invoice
async fn create_invoice(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceEnvelope<InvoiceResponse>>), ApiError> {
    let invoice = state
        .db
        .invoices()
        .create(&req.comp_code, req.amt)
        .await?;
    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");

    Ok((
        StatusCode::CREATED,
        Json(InvoiceEnvelope {
            invoice: InvoiceResponse::from(invoice),
        }),
    ))
}

/// GET /invoices/{id} - an invoice and the company it belongs to
async fn get_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<InvoiceEnvelope<InvoiceDetailResponse>>, ApiError> {
    let found = state
        .db
        .invoices()
        .get_with_company(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Cannot find invoice with the id: {}", id)))?;

    Ok(Json(InvoiceEnvelope {
        invoice: InvoiceDetailResponse::from(found),
    }))
}

/// PUT /invoices/{id} - change the amount
async fn update_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
    JsonBody(req): JsonBody<UpdateInvoiceRequest>,
) -> Result<Json<InvoiceEnvelope<InvoiceResponse>>, ApiError> {
    let invoice = state
        .db
        .invoices()
        .update_amount(id, req.amt)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Cannot update invoice with id: {}", id)))?;

    Ok(Json(InvoiceEnvelope {
        invoice: InvoiceResponse::from(invoice),
    }))
}

/// DELETE /invoices/{id}
async fn delete_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<InvoiceDeleted>, ApiError> {
    let missing = || ApiError::not_found(format!("Cannot delete invoice with id: {}", id));
    let invoices = state.db.invoices();

    if !invoices.exists(id).await? {
        return Err(missing());
    }
    if !invoices.delete(id).await? {
        return Err(missing());
    }
    tracing::info!(id, "invoice deleted");

    Ok(Json(InvoiceDeleted { status: "deleted" }))
}

/// Invoice routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::Company;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn invoice() -> Invoice {
        Invoice {
            id: 3,
            comp_code: "sam".into(),
            amt: 2500.0,
            paid: false,
            add_date: Utc.with_ymd_and_hms(2026, 10, 19, 9, 5, 7).unwrap(),
            paid_date: None,
        }
    }

    #[test]
    fn created_invoice_is_unpaid_with_null_paid_date() {
        let value = serde_json::to_value(InvoiceResponse::from(invoice())).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "comp_code": "sam",
                "amt": 2500.0,
                "paid": false,
                "add_date": "2026-10-19T09:05:07.000Z",
                "paid_date": null
            })
        );
    }

    #[test]
    fn detail_nests_company_and_uses_http_date() {
        let found = InvoiceWithCompany {
            invoice: invoice(),
            company: Company {
                code: "sam".into(),
                name: "Sam's Club".into(),
                description: "Warehouse clubs".into(),
            },
        };

        let value = serde_json::to_value(InvoiceEnvelope {
            invoice: InvoiceDetailResponse::from(found),
        })
        .unwrap();

        assert_eq!(value["invoice"]["add_date"], "Mon, 19 Oct 2026 09:05:07 GMT");
        assert_eq!(
            value["invoice"]["company"],
            json!({
                "code": "sam",
                "name": "Sam's Club",
                "description": "Warehouse clubs"
            })
        );
        assert!(value["invoice"].get("comp_code").is_none());
    }

    #[test]
    fn summary_is_id_and_company_code_only() {
        let value = serde_json::to_value(InvoiceSummaryResponse::from(InvoiceSummary {
            id: 3,
            comp_code: "sam".into(),
        }))
        .unwrap();
        assert_eq!(value, json!({ "id": 3, "comp_code": "sam" }));
    }
}
