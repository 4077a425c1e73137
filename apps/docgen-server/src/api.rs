//! API handlers for the docgen server
//!
//! Provides REST endpoints for:
//! - Template listing
//! - Payload validation
//! - Document generation

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use docx_engine::{get_template, list_templates, validate, TemplateInfo};
use issue_types::DocumentData;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "docgen-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Template list response
#[derive(Serialize)]
pub struct TemplateListResponse {
    pub success: bool,
    pub templates: Vec<TemplateInfo>,
    pub count: usize,
}

/// Handler: GET /api/templates
pub async fn handle_list_templates() -> Json<TemplateListResponse> {
    let templates = list_templates();
    let count = templates.len();

    Json(TemplateListResponse {
        success: true,
        templates,
        count,
    })
}

/// Validation response
#[derive(Serialize)]
pub struct ValidateResponse {
    pub success: bool,
    pub valid: bool,
    pub missing_fields: Vec<String>,
}

/// Handler: POST /api/templates/:id/validate
pub async fn handle_validate(
    Path(id): Path<String>,
    Json(data): Json<DocumentData>,
) -> Result<Json<ValidateResponse>, ServerError> {
    let template = get_template(&id)?;
    let report = validate(template, &data);
    debug!("Validated {}: {:?}", id, report.missing_fields);

    Ok(Json(ValidateResponse {
        success: true,
        valid: report.valid,
        missing_fields: report
            .missing_fields
            .iter()
            .map(|field| field.name().to_string())
            .collect(),
    }))
}

/// Generation request body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateApiRequest {
    pub template_id: String,
    #[serde(default)]
    pub data: DocumentData,
}

/// Generation response
#[derive(Serialize)]
pub struct GenerateApiResponse {
    pub success: bool,
    /// Base64-encoded `.docx`
    pub data: String,
    pub mime_type: String,
    pub filename: String,
    pub size_bytes: usize,
}

/// Handler: POST /api/documents
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateApiRequest>,
) -> Result<Json<GenerateApiResponse>, ServerError> {
    info!(
        "Generate request: template={}, issues={}",
        req.template_id,
        req.data.issues.len()
    );

    if req.data.issues.len() > state.max_issues {
        return Err(ServerError::InvalidRequest(format!(
            "Too many issues: {} (limit {})",
            req.data.issues.len(),
            state.max_issues
        )));
    }

    // Fail fast on unknown ids before touching the blocking pool
    get_template(&req.template_id)?;

    let GenerateApiRequest { template_id, data } = req;
    let result = tokio::time::timeout(
        Duration::from_millis(state.timeout_ms),
        tokio::task::spawn_blocking(move || docx_engine::generate(&template_id, &data)),
    )
    .await;

    let document = match result {
        Ok(Ok(result)) => result.map_err(|e| {
            warn!("Generation failed: {}", e);
            ServerError::from(e)
        })?,
        Ok(Err(join_error)) => {
            return Err(ServerError::Internal(format!(
                "Generation task panicked: {}",
                join_error
            )));
        }
        Err(_timeout) => {
            return Err(ServerError::Timeout(state.timeout_ms));
        }
    };

    let (bytes, mime_type, filename) = document.into_parts();
    let size_bytes = bytes.len();
    info!("Generated {} ({} bytes)", filename, size_bytes);

    Ok(Json(GenerateApiResponse {
        success: true,
        data: STANDARD.encode(&bytes),
        mime_type: mime_type.to_string(),
        filename,
        size_bytes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = handle_health().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "docgen-server");
    }

    #[tokio::test]
    async fn test_list_templates() {
        let response = handle_list_templates().await;
        assert!(response.success);
        assert_eq!(response.count, 3);
        assert!(response
            .templates
            .iter()
            .any(|t| t.id == "patrol-record"));
    }

    #[tokio::test]
    async fn test_validate_unknown_template() {
        let result = handle_validate(
            Path("weekly-report".to_string()),
            Json(DocumentData::default()),
        )
        .await;
        assert!(matches!(result, Err(ServerError::TemplateNotFound(_))));
    }
}
