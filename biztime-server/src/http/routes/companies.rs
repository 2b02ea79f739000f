//! Company endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Company, Invoice};
use crate::http::dates::iso_timestamp;
use crate::http::error::ApiError;
use crate::http::extractors::{CompanyCode, JsonBody};
use crate::http::server::AppState;

/// Create company request
#[derive(Deserialize)]
pub struct CreateCompanyRequest {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Update company request; `code` comes from the path
#[derive(Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: String,
    pub description: String,
}

/// Company response
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub code: String,
    pub name: String,
    pub description: String,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            code: c.code,
            name: c.name,
            description: c.description,
        }
    }
}

/// Company with every invoice billed to it
#[derive(Debug, Serialize)]
pub struct CompanyDetailResponse {
    #[serde(flatten)]
    pub company: CompanyResponse,
    pub invoices: Vec<CompanyInvoiceResponse>,
}

/// Invoice as embedded under its company
#[derive(Debug, Serialize)]
pub struct CompanyInvoiceResponse {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: String,
    pub paid_date: Option<String>,
}

impl From<Invoice> for CompanyInvoiceResponse {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            amt: i.amt,
            paid: i.paid,
            add_date: iso_timestamp(i.add_date),
            paid_date: i.paid_date.map(iso_timestamp),
        }
    }
}

#[derive(Serialize)]
pub struct CompanyList {
    pub companies: Vec<CompanyResponse>,
}

#[derive(Serialize)]
pub struct CompanyEnvelope<T> {
    pub company: T,
}

#[derive(Serialize)]
pub struct CompanyDeleted {
    pub msg: &'static str,
}

/// GET /companies - list all companies
async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CompanyList>, ApiError> {
    let companies = state.db.companies().list().await?;

    Ok(Json(CompanyList {
        companies: companies.into_iter().map(CompanyResponse::from).collect(),
    }))
}

/// POST /companies - create a company
async fn create_company(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyEnvelope<CompanyResponse>>), ApiError> {
    let company = state
        .db
        .companies()
        .create(&req.code, &req.name, &req.description)
        .await?;
    tracing::info!(code = %company.code, "company created");

    Ok((
        StatusCode::CREATED,
        Json(CompanyEnvelope {
            company: CompanyResponse::from(company),
        }),
    ))
}

/// GET /companies/{code} - a company and all of its invoices
async fn get_company(
    State(state): State<Arc<AppState>>,
    CompanyCode(code): CompanyCode,
) -> Result<Json<CompanyEnvelope<CompanyDetailResponse>>, ApiError> {
    let company = state
        .db
        .companies()
        .get(&code)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Company with code {} cannot be found", code)))?;

    let invoices = state.db.invoices().list_for_company(&company.code).await?;

    Ok(Json(CompanyEnvelope {
        company: CompanyDetailResponse {
            company: CompanyResponse::from(company),
            invoices: invoices.into_iter().map(CompanyInvoiceResponse::from).collect(),
        },
    }))
}

/// PUT /companies/{code} - replace name and description
async fn update_company(
    State(state): State<Arc<AppState>>,
    CompanyCode(code): CompanyCode,
    JsonBody(req): JsonBody<UpdateCompanyRequest>,
) -> Result<Json<CompanyEnvelope<CompanyResponse>>, ApiError> {
    let company = state
        .db
        .companies()
        .update(&code, &req.name, &req.description)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Company with code {} cannot be found", code)))?;

    Ok(Json(CompanyEnvelope {
        company: CompanyResponse::from(company),
    }))
}

/// DELETE /companies/{code}
async fn delete_company(
    State(state): State<Arc<AppState>>,
    CompanyCode(code): CompanyCode,
) -> Result<Json<CompanyDeleted>, ApiError> {
    let missing = || ApiError::not_found(format!("Cannot delete Company with code {}", code));
    let companies = state.db.companies();

    if !companies.exists(&code).await? {
        return Err(missing());
    }
    // A concurrent delete can still win between the check and here.
    if !companies.delete(&code).await? {
        return Err(missing());
    }
    tracing::info!(%code, "company deleted");

    Ok(Json(CompanyDeleted {
        msg: "Company Deleted",
    }))
}

/// Company routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{code}",
            get(get_company).put(update_company).delete(delete_company),
        )
}
