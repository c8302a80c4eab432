//! HTTP handlers for the FormForge API

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use formforge_core::{
    augment_existing, build_from_layout, inspect, validate_fields, DocumentInfo, FormForgeError,
    Layout, Rendered, SavedLayout,
};
use tracing::info;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;
use crate::upload::{self, PDF_MIME};

/// Number of fields the engine skipped, on build and augment responses
pub const SKIPPED_HEADER: &str = "x-formforge-skipped";

const UPLOAD_PART: &str = "pdf";

/// Handler: GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "formforge-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /api/pdf/upload
pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_PART) {
            continue;
        }
        if field.content_type() != Some(PDF_MIME) {
            return Err(ApiError::InvalidRequest(
                "Only PDF files are allowed".to_string(),
            ));
        }
        let original_name = field.file_name().unwrap_or("upload.pdf").to_string();
        let bytes = field.bytes().await?;
        upload = Some((original_name, bytes));
        break;
    }

    let (original_name, bytes) =
        upload.ok_or_else(|| ApiError::InvalidRequest("No file uploaded".to_string()))?;
    if bytes.len() > state.config.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge(format!(
            "File exceeds the {} byte upload limit",
            state.config.max_upload_bytes
        )));
    }

    let bytes = bytes.to_vec();
    let (bytes, pdf_info) = run_blocking("Failed to process PDF", move || {
        let pdf_info = inspect(&bytes)?;
        Ok((bytes, pdf_info))
    })
    .await?;

    let filename = upload::store(&state.config.upload_dir(), &bytes).await?;
    info!(
        file = %filename,
        original = %original_name,
        pages = pdf_info.page_count,
        "Accepted upload"
    );

    Ok(Json(UploadResponse {
        success: true,
        filename,
        original_name,
        pdf_base64: BASE64.encode(&bytes),
        page_count: pdf_info.page_count,
        pages: pdf_info.pages,
    }))
}

/// Handler: POST /api/pdf/inspect
pub async fn inspect_pdf(
    payload: Result<Json<InspectRequest>, JsonRejection>,
) -> Result<Json<DocumentInfo>, ApiError> {
    let Json(req) = payload?;
    let bytes = decode_pdf(&req.pdf_base64)?;

    let pdf_info = run_blocking("Failed to read PDF", move || inspect(&bytes)).await?;
    Ok(Json(pdf_info))
}

/// Handler: POST /api/pdf/generate-from-layout
pub async fn generate_from_layout(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateFromLayoutRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let page_size = req
        .page_size
        .unwrap_or_else(|| state.config.default_page_size());
    let layout = Layout::new(page_size, req.fields);
    layout
        .validate()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    info!(
        fields = layout.fields.len(),
        width = page_size.width,
        height = page_size.height,
        "Generating form from layout"
    );

    let options = state.config.build_options();
    let rendered = run_blocking("Failed to generate PDF", move || {
        build_from_layout(&layout, &options)
    })
    .await?;

    Ok(pdf_attachment("formforge-form.pdf", rendered))
}

/// Handler: POST /api/pdf/generate-from-existing
pub async fn generate_from_existing(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateFromExistingRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let bytes = decode_pdf(&req.pdf_base64)?;
    validate_fields(&req.fields).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    info!(
        fields = req.fields.len(),
        size = bytes.len(),
        "Adding fields to existing PDF"
    );

    let options = state.config.augment_options();
    let fields = req.fields;
    let rendered = run_blocking("Failed to modify PDF", move || {
        augment_existing(&bytes, &fields, &options)
    })
    .await?;

    Ok(pdf_attachment("formforge-edited.pdf", rendered))
}

/// Handler: POST /api/pdf/save-layout
pub async fn save_layout(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveLayoutRequest>, JsonRejection>,
) -> Result<Json<SaveLayoutResponse>, ApiError> {
    let Json(req) = payload?;
    let page_size = req
        .page_size
        .unwrap_or_else(|| state.config.default_page_size());
    let layout = SavedLayout::new(req.name, Layout::new(page_size, req.fields));

    info!(
        name = layout.name.as_deref().unwrap_or("<unnamed>"),
        fields = layout.fields.len(),
        "Saved layout"
    );

    Ok(Json(SaveLayoutResponse {
        success: true,
        layout,
        message: "Layout saved successfully",
    }))
}

fn decode_pdf(encoded: &str) -> Result<Vec<u8>, ApiError> {
    if encoded.is_empty() {
        return Err(ApiError::InvalidRequest("Missing PDF data".to_string()));
    }
    BASE64
        .decode(encoded)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid PDF base64: {}", e)))
}

/// Run PDF work off the async runtime
async fn run_blocking<T, F>(context: &'static str, job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, FormForgeError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("PDF worker failed: {}", e)))?
        .map_err(|source| ApiError::generation(context, source))
}

fn pdf_attachment(filename: &str, rendered: Rendered) -> Response {
    (
        [
            (header::CONTENT_TYPE, PDF_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (
                HeaderName::from_static(SKIPPED_HEADER),
                rendered.report.skipped_count().to_string(),
            ),
        ],
        rendered.bytes,
    )
        .into_response()
}
