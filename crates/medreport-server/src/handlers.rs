//! HTTP request handlers for the report analysis service.
//!
//! Implements the upload, chat and health endpoints using axum. Extraction
//! and analysis are blocking work and run on tokio's blocking pool.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use medreport_analyzer::{AnalysisError, Analyzer};
use medreport_domain::{LlmProvider, MedicalAnalysis};
use medreport_extractor::{allowed_file, PdfTextExtractor, FILE_TYPE_NOT_ALLOWED, NO_TEXT_MESSAGE};
use medreport_llm::LlmError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Provider type held by the server
pub type SharedProvider = Box<dyn LlmProvider<Error = LlmError> + Send + Sync>;

/// Shared application state
///
/// Read-only after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Report analyzer
    pub analyzer: Arc<Analyzer<SharedProvider>>,
    /// PDF text extractor
    pub extractor: PdfTextExtractor,
    /// Whether an API key was found at startup
    pub api_key_configured: bool,
    /// Largest accepted upload body (bytes)
    pub max_upload_bytes: usize,
}

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-text report or question
    #[serde(default)]
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model label
    pub model: String,
    /// Whether an API key was found at startup
    pub api_key_configured: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request data
    BadRequest(String),
    /// Uploaded file is not an allowed type
    UnsupportedFileType,
    /// PDF contained no extractable text
    NoExtractableText,
    /// Multipart body could not be read
    Upload(MultipartError),
    /// Request body rejected before reaching the handler
    Rejected {
        /// Status chosen by the extractor
        status: StatusCode,
        /// Extractor's explanation
        message: String,
    },
    /// Analyzer returned an error descriptor
    Analysis(AnalysisError),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UnsupportedFileType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                FILE_TYPE_NOT_ALLOWED.to_string(),
            ),
            AppError::NoExtractableText => {
                (StatusCode::UNPROCESSABLE_ENTITY, NO_TEXT_MESSAGE.to_string())
            }
            AppError::Upload(e) => (e.status(), e.body_text()),
            AppError::Rejected { status, message } => (status, message),
            AppError::Analysis(e @ AnalysisError::EmptyInput) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Analysis(e @ AnalysisError::Failed(_)) => {
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        AppError::Analysis(e)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Upload(e)
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// GET / - Upload form
async fn index() -> Html<&'static str> {
    Html(UPLOAD_PAGE_HTML)
}

/// POST /analyze - Analyze an uploaded PDF report
async fn analyze_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MedicalAnalysis>, AppError> {
    let mut multipart = multipart?;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let bytes = field.bytes().await?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file part selected".to_string()))?;

    if filename.is_empty() {
        return Err(AppError::BadRequest("No selected file".to_string()));
    }
    if !allowed_file(&filename) {
        info!("Rejected upload '{}': file type not allowed", filename);
        return Err(AppError::UnsupportedFileType);
    }

    info!("Received upload '{}' ({} bytes)", filename, bytes.len());

    let extractor = state.extractor;
    let report_text = run_blocking(move || extractor.extract_text(&bytes)).await?;

    if report_text.is_empty() {
        warn!("No extractable text in '{}'", filename);
        return Err(AppError::NoExtractableText);
    }

    let analyzer = Arc::clone(&state.analyzer);
    let analysis = run_blocking(move || analyzer.analyze(&report_text)).await??;

    Ok(Json(analysis))
}

/// POST /chat - Analyze free text with the same contract as uploads
async fn chat(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<MedicalAnalysis>, AppError> {
    let Json(request) = request?;
    let analyzer = Arc::clone(&state.analyzer);
    let analysis = run_blocking(move || analyzer.analyze(&request.message)).await??;
    Ok(Json(analysis))
}

/// GET /health - Service health
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let status = if state.api_key_configured {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthCheckResponse {
        status: status.to_string(),
        model: state.analyzer.model_name().to_string(),
        api_key_configured: state.api_key_configured,
    })
}

/// Run blocking work off the async executor
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalError(format!("Task join error: {}", e)))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    let body_limit = state.max_upload_bytes;

    AxumRouter::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_upload))
        .route("/chat", post(chat))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

const UPLOAD_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Medical Report Analyzer</title>
</head>
<body>
<h1>Medical Report Analyzer</h1>
<p>Upload a PDF lab or imaging report. The analysis is informational only and is not medical advice.</p>
<form action="/analyze" method="post" enctype="multipart/form-data">
<input type="file" name="file" accept=".pdf,application/pdf">
<button type="submit">Analyze</button>
</form>
</body>
</html>
"#;
