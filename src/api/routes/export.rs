//! Report export endpoints
//!
//! Exports format the same snapshot the health endpoint serves; there is no
//! additional logic here.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::api::{
    error::{ApiError, ApiResult},
    state::ApiState,
};

fn format_latency(latency_ms: Option<u64>) -> String {
    latency_ms.map_or_else(|| String::from("N/A"), |l| format!("{l}ms"))
}

/// GET /export-csv
///
/// The health snapshot as a downloadable CSV report
pub async fn export_csv(State(state): State<ApiState>) -> ApiResult<Response> {
    let entries = state.registry.read().await.snapshot_all().await;

    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["domain", "url", "availability", "avgLatency"])
        .map_err(|err| ApiError::Internal(format!("Failed to write CSV header: {}", err)))?;

    for entry in entries {
        writer
            .write_record([
                entry.domain,
                entry.url,
                entry.availability.to_string(),
                entry
                    .avg_latency_ms
                    .map_or_else(|| String::from("N/A"), |latency| latency.to_string()),
            ])
            .map_err(|err| ApiError::Internal(format!("Failed to write CSV row: {}", err)))?;
    }

    let data = writer
        .into_inner()
        .map_err(|err| ApiError::Internal(format!("Failed to flush CSV: {}", err)))?;
    let csv = String::from_utf8(data)
        .map_err(|err| ApiError::Internal(format!("CSV output was not UTF-8: {}", err)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"health-status-report.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// GET /export-pdf
///
/// The health snapshot as a downloadable PDF report, one line per target
pub async fn export_pdf(State(state): State<ApiState>) -> ApiResult<Response> {
    let entries = state.registry.read().await.snapshot_all().await;

    // A4 portrait
    let (doc, first_page, first_layer) =
        PdfDocument::new("Health Status Report", Mm(210.0), Mm(297.0), "report");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ApiError::Internal(format!("Failed to load PDF font: {}", err)))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text("Health Status Report", 25.0, Mm(60.0), Mm(270.0), &font);

    let mut y = 250.0;
    for entry in entries {
        if y < 20.0 {
            let (page, page_layer) = doc.add_page(Mm(210.0), Mm(297.0), "report");
            layer = doc.get_page(page).get_layer(page_layer);
            y = 270.0;
        }

        layer.use_text(
            format!(
                "Domain: {}, Availability: {}%, Avg Latency: {}",
                entry.domain,
                entry.availability,
                format_latency(entry.avg_latency_ms),
            ),
            12.0,
            Mm(20.0),
            Mm(y),
            &font,
        );
        y -= 10.0;
    }

    let data = doc
        .save_to_bytes()
        .map_err(|err| ApiError::Internal(format!("Failed to render PDF: {}", err)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"health-status-report.pdf\"",
            ),
        ],
        data,
    )
        .into_response())
}
