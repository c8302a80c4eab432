//! Request and response bodies for the FormForge API

use formforge_core::{FieldPlacement, PageInfo, PageSize, SavedLayout};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    /// Name the upload was stored under
    pub filename: String,
    pub original_name: String,
    pub pdf_base64: String,
    pub page_count: u32,
    pub pages: Vec<PageInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectRequest {
    pub pdf_base64: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromLayoutRequest {
    pub fields: Vec<FieldPlacement>,
    /// Falls back to the configured default page size
    #[serde(default)]
    pub page_size: Option<PageSize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromExistingRequest {
    pub pdf_base64: String,
    pub fields: Vec<FieldPlacement>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLayoutRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldPlacement>,
    #[serde(default)]
    pub page_size: Option<PageSize>,
}

#[derive(Serialize)]
pub struct SaveLayoutResponse {
    pub success: bool,
    pub layout: SavedLayout,
    pub message: &'static str,
}
