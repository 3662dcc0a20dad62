//! Catalog API handler

use crate::session::catalog::{self, Industry, Persona};
use axum::response::Json;
use serde::Serialize;

/// Catalog response
#[derive(Serialize)]
pub struct CatalogResponse {
    /// Available personas
    pub personas: &'static [Persona],
    /// Available industries
    pub industries: &'static [Industry],
}

/// GET /api/catalog - List personas and industries for the session form
pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        personas: catalog::personas(),
        industries: catalog::industries(),
    })
}
