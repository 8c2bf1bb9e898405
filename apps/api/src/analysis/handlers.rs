//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::normalize::Document;
use crate::analysis::report::render_text_report;
use crate::analysis::scoring::ScoreReport;
use crate::errors::AppError;
use crate::extract::{extract_resume_text, SourceFormat};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub jd_text: String,
}

/// POST /api/v1/analyze
///
/// Scores pasted resume text against a job description and returns the
/// full `ScoreReport`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let report = analyze(&state, &request.resume_text, &request.jd_text, SourceFormat::RawText).await?;
    Ok(Json(report))
}

/// POST /api/v1/analyze/upload
///
/// Multipart variant: a `resume` file field (PDF or TXT) plus a `jd_text`
/// text field. Extracted text flows through the same scoring pass.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoreReport>, AppError> {
    let mut resume: Option<(String, SourceFormat)> = None;
    let mut jd_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| {
                        AppError::Validation("'resume' field must be a file upload".to_string())
                    })?
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read resume upload: {e}")))?;
                info!("Received resume upload '{filename}' ({} bytes)", bytes.len());
                resume = Some(extract_resume_text(&filename, &bytes)?);
            }
            Some("jd_text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read jd_text: {e}")))?;
                jd_text = Some(text);
            }
            _ => {} // unknown fields are ignored
        }
    }

    let (resume_text, format) =
        resume.ok_or_else(|| AppError::Validation("missing 'resume' file field".to_string()))?;
    let jd_text =
        jd_text.ok_or_else(|| AppError::Validation("missing 'jd_text' field".to_string()))?;

    let report = analyze(&state, &resume_text, &jd_text, format).await?;
    Ok(Json(report))
}

/// POST /api/v1/analyze/export
///
/// Same scoring pass as /analyze, rendered as a downloadable plain-text
/// checklist instead of JSON.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Response, AppError> {
    let report = analyze(&state, &request.resume_text, &request.jd_text, SourceFormat::RawText).await?;
    let body = render_text_report(&report);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resumefit_checklist.txt\"",
            ),
        ],
        body,
    )
        .into_response())
}

/// Shared scoring pass: validates raw inputs, normalizes, delegates to the
/// configured scorer.
async fn analyze(
    state: &AppState,
    resume_text: &str,
    jd_text: &str,
    format: SourceFormat,
) -> Result<ScoreReport, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let resume = Document::from_raw(resume_text);
    let jd = Document::from_raw(jd_text);

    let report = state
        .scorer
        .score(&resume, &jd, format, state.config.top_keywords)
        .await?;

    info!(
        "Scored {} resume against {}-term JD: {:.2}",
        format.label(),
        jd.tokens.len(),
        report.match_score
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::scoring::TfidfMatchScorer;
    use crate::config::Config;
    use crate::routes::build_router;
    use crate::state::AppState;

    fn test_router() -> axum::Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            top_keywords: 40,
            max_upload_bytes: 1024 * 1024,
        };
        build_router(AppState {
            config,
            scorer: Arc::new(TfidfMatchScorer),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn test_analyze_returns_score_report() {
        let response = test_router()
            .oneshot(json_request(
                "/api/v1/analyze",
                json!({
                    "resume_text": "Python developer with SQL experience",
                    "jd_text": "Looking for Python developer"
                }),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        let score = payload["match_score"].as_f64().expect("match_score");
        assert!(score > 0.5, "score was {score}");
        assert_eq!(payload["scorer_backend"], "tfidf");
        assert_eq!(payload["ats_checks"].as_array().expect("checks").len(), 6);
    }

    #[tokio::test]
    async fn test_analyze_empty_resume_is_400() {
        let response = test_router()
            .oneshot(json_request(
                "/api/v1/analyze",
                json!({"resume_text": "  ", "jd_text": "Rust engineer"}),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = json_body(response).await;
        assert_eq!(payload["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_stop_words_only_is_422() {
        let response = test_router()
            .oneshot(json_request(
                "/api/v1/analyze",
                json!({"resume_text": "Rust engineer", "jd_text": "looking for the"}),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = json_body(response).await;
        assert_eq!(payload["error"]["code"], "INSUFFICIENT_INPUT");
    }

    #[tokio::test]
    async fn test_export_returns_plain_text_checklist() {
        let response = test_router()
            .oneshot(json_request(
                "/api/v1/analyze/export",
                json!({
                    "resume_text": "Python developer with SQL experience",
                    "jd_text": "Looking for Python developer"
                }),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));

        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let text = String::from_utf8(bytes.to_vec()).expect("utf8");
        assert!(text.contains("ResumeFit ATS Checklist"));
        assert!(text.contains("Match Score:"));
    }

    #[tokio::test]
    async fn test_upload_txt_resume_scores() {
        let boundary = "----resumefit-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"resume.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Python developer with SQL experience\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"jd_text\"\r\n\r\n\
             Looking for Python developer\r\n\
             --{boundary}--\r\n"
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request");

        let response = test_router().oneshot(request).await.expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert!(payload["match_score"].as_f64().expect("score") > 0.5);

        // txt upload should surface the plain-text file-format warning
        let checks = payload["ats_checks"].as_array().expect("checks");
        let format_check = checks
            .iter()
            .find(|c| c["name"] == "File Format")
            .expect("file format check");
        assert_eq!(format_check["passed"], false);
    }

    #[tokio::test]
    async fn test_upload_missing_jd_is_400() {
        let boundary = "----resumefit-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"resume.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Python developer\r\n\
             --{boundary}--\r\n"
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request");

        let response = test_router().oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_unsupported_extension_is_415() {
        let boundary = "----resumefit-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"resume.docx\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             irrelevant\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"jd_text\"\r\n\r\n\
             Rust engineer\r\n\
             --{boundary}--\r\n"
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request");

        let response = test_router().oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .expect("request");

        let response = test_router().oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["status"], "ok");
    }
}
