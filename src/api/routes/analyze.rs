use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use crate::api::upload::{allowed_file, TempUpload};
use crate::api::AppState;
use crate::errors::CityScanError;
use crate::models::AggregateReport;
use tracing::info;

struct ImagePart {
    filename: String,
    bytes: Bytes,
}

/// First multipart field named `image`. A part without a filename reads as an empty one.
async fn read_image_part(multipart: &mut Multipart) -> Result<Option<ImagePart>, CityScanError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CityScanError::Upload(format!("Invalid multipart body: {}", e.body_text())))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| CityScanError::Upload(format!("Invalid multipart body: {}", e.body_text())))?;
        return Ok(Some(ImagePart { filename, bytes }));
    }
    Ok(None)
}

pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AggregateReport>, CityScanError> {
    let mut multipart = multipart
        .map_err(|_| CityScanError::Upload("No image file part in the request".into()))?;

    let part = read_image_part(&mut multipart)
        .await?
        .ok_or_else(|| CityScanError::Upload("No image file part in the request".into()))?;

    if part.filename.is_empty() {
        return Err(CityScanError::Upload("No selected image file".into()));
    }
    if !allowed_file(&part.filename) {
        return Err(CityScanError::Upload("File type not allowed".into()));
    }

    let upload = TempUpload::persist(&state.upload_dir, &part.filename, &part.bytes).await?;
    info!(
        filename = %part.filename,
        stored = %upload.path().display(),
        bytes = part.bytes.len(),
        "Image upload received"
    );

    // `upload` is dropped (and the file deleted) on every return path below
    let report = state.orchestrator.analyze(upload.path()).await?;
    Ok(Json(report))
}
