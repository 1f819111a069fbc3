use axum::Json;
use serde::Serialize;

use crate::models::profile::{Sector, SkillLevel};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorEntry {
    pub sector: Sector,
    pub suggested_skills: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub sectors: Vec<SectorEntry>,
    pub levels: Vec<SkillLevel>,
}

/// GET /api/v1/catalog
/// Choices offered by the assessment form.
pub async fn catalog_handler() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        sectors: Sector::ALL
            .iter()
            .map(|&sector| SectorEntry {
                sector,
                suggested_skills: sector.suggested_skills(),
            })
            .collect(),
        levels: SkillLevel::ALL.to_vec(),
    })
}
