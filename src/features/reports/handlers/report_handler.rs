use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{IntakeResponseDto, MapReportDto, ReportResponseDto};
use crate::features::reports::models::ReportStatus;
use crate::features::reports::routes::ReportsState;
use crate::features::reports::services::IntakeSubmission;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a new damage report
///
/// Multipart form with a required `file` part (the photo) and optional
/// `lokasi`, `latitude` and `longitude` text parts. Malformed
/// coordinates are dropped rather than rejected.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Report accepted", body = ApiResponse<IntakeResponseDto>),
        (status = 400, description = "Missing or empty photo"),
        (status = 422, description = "Photo could not be classified"),
        (status = 503, description = "Classifier model not loaded")
    ),
    tag = "reports"
)]
pub async fn submit_report(
    State(state): State<ReportsState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<IntakeResponseDto>>)> {
    let submission = collect_submission(multipart).await?;
    let report = state.intake.submit(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(IntakeResponseDto::from(report)),
            Some("Laporan diterima".to_string()),
            None,
        )),
    ))
}

/// Pull the submission fields out of the multipart form.
///
/// The photo is required; `lokasi` falls back to "Tanpa Lokasi" when
/// absent or blank; unparseable coordinate text is treated as absent.
async fn collect_submission(mut multipart: Multipart) -> Result<IntakeSubmission> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut location_text: Option<String> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
                file = Some((filename, data.to_vec()));
            }
            Some("lokasi") => {
                location_text = field.text().await.ok().filter(|t| !t.trim().is_empty());
            }
            Some("latitude") => {
                latitude = field
                    .text()
                    .await
                    .ok()
                    .and_then(|t| t.trim().parse().ok());
            }
            Some("longitude") => {
                longitude = field
                    .text()
                    .await
                    .ok()
                    .and_then(|t| t.trim().parse().ok());
            }
            _ => {}
        }
    }

    let (original_filename, data) =
        file.ok_or_else(|| AppError::BadRequest("A photo is required".to_string()))?;
    if original_filename.is_empty() || data.is_empty() {
        return Err(AppError::BadRequest("A photo is required".to_string()));
    }

    Ok(IntakeSubmission {
        original_filename,
        data,
        location_text: location_text.unwrap_or_else(|| "Tanpa Lokasi".to_string()),
        latitude,
        longitude,
    })
}

/// List all reports for the triage table, most urgent first
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Reports retrieved successfully", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    State(state): State<ReportsState>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state.reports.list_by_priority().await?;
    let total = reports.len() as i64;

    let data: Vec<ReportResponseDto> = reports
        .into_iter()
        .map(|r| {
            let coords = state.geo.display_coords(r.latitude, r.longitude);
            ReportResponseDto::from_report(r, coords)
        })
        .collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// List reports as map markers
#[utoipa::path(
    get,
    path = "/api/reports/map",
    responses(
        (status = 200, description = "Map markers retrieved successfully", body = ApiResponse<Vec<MapReportDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn map_reports(
    State(state): State<ReportsState>,
) -> Result<Json<ApiResponse<Vec<MapReportDto>>>> {
    let reports = state.reports.list_for_map().await?;
    let total = reports.len() as i64;

    let data: Vec<MapReportDto> = reports
        .into_iter()
        .map(|r| {
            let coords = state.geo.display_coords(r.latitude, r.longitude);
            MapReportDto::from_report(r, coords)
        })
        .collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Apply a triage action to a report
///
/// `proses` moves the report to "Sedang Dikerjakan", `selesai` to
/// "Selesai"; any other verb resets it to "Menunggu".
#[utoipa::path(
    post,
    path = "/api/reports/{id}/action/{action}",
    params(
        ("id" = String, Path, description = "Report id"),
        ("action" = String, Path, description = "Triage action verb")
    ),
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn report_action(
    State(state): State<ReportsState>,
    Path((id, action)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let status = ReportStatus::from_action(&action);
    let report = state.reports.set_status(&id, status).await?;

    let coords = state.geo.display_coords(report.latitude, report.longitude);
    Ok(Json(ApiResponse::success(
        Some(ReportResponseDto::from_report(report, coords)),
        Some(format!("Status set to {status}")),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    const BOUNDARY: &str = "laporjalan-test-boundary";

    async fn collect(multipart: Multipart) -> Result<Json<serde_json::Value>> {
        let submission = collect_submission(multipart).await?;
        Ok(Json(serde_json::json!({
            "original_filename": submission.original_filename,
            "location_text": submission.location_text,
            "latitude": submission.latitude,
            "longitude": submission.longitude,
        })))
    }

    fn app() -> Router {
        Router::new().route("/api/reports", post(collect))
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(filename: &str, bytes: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n{bytes}\r\n"
        )
    }

    fn form_request(parts: &[String]) -> Request<Body> {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        Request::builder()
            .method("POST")
            .uri("/api/reports")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn malformed_coordinates_are_treated_as_absent() {
        let response = app()
            .oneshot(form_request(&[
                file_part("jalan.jpg", "jpegbytes"),
                text_part("lokasi", "Jl. Sudirman"),
                text_part("latitude", "abc"),
                text_part("longitude", "106.8456"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["latitude"], serde_json::Value::Null);
        assert_eq!(body["longitude"], 106.8456);
        assert_eq!(body["location_text"], "Jl. Sudirman");
    }

    #[tokio::test]
    async fn missing_or_blank_location_falls_back_to_default() {
        let response = app()
            .oneshot(form_request(&[file_part("jalan.jpg", "jpegbytes")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["location_text"], "Tanpa Lokasi");

        let response = app()
            .oneshot(form_request(&[
                file_part("jalan.jpg", "jpegbytes"),
                text_part("lokasi", "   "),
            ]))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["location_text"], "Tanpa Lokasi");
    }

    #[tokio::test]
    async fn missing_file_is_a_validation_error() {
        let response = app()
            .oneshot(form_request(&[text_part("lokasi", "Jl. Sudirman")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn empty_file_is_a_validation_error() {
        let response = app()
            .oneshot(form_request(&[file_part("jalan.jpg", "")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
