//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;

/// JSON body whose rejections go through `ApiError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Company code from path; undecodable segments become a JSON 400.
pub struct CompanyCode(pub String);

impl<S> FromRequestParts<S> for CompanyCode
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(code) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(code))
    }
}

/// Extract a numeric invoice id from path.
///
/// A path segment that is not an integer cannot name an invoice, so it
/// is reported as not found.
pub struct InvoiceId(pub i32);

impl<S> FromRequestParts<S> for InvoiceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found("Cannot find invoice without an id"))?;

        raw.parse::<i32>()
            .map(Self)
            .map_err(|_| ApiError::not_found(format!("Cannot find invoice with the id: {}", raw)))
    }
}
