use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use gallery_types::{raw_extension, ImageExtension, WorkView};
use gallery_upload::{FileUpload, UploadForm, SUCCESS_MESSAGE};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Body of a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub work_id: String,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let extensions: Vec<&str> = ImageExtension::ALL.iter().map(|e| e.as_str()).collect();
    Json(json!({
        "name": "gallery-server",
        "version": env!("CARGO_PKG_VERSION"),
        "allowed_extensions": extensions,
        "max_upload_size": state.max_upload_size,
    }))
}

/// `POST /upload`: store one submission.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<(StatusCode, Json<UploadResponse>)> {
    debug!("received upload");
    let form = read_form(&mut multipart).await?;

    // The body is fully read at this point; the submission runs to
    // completion even if the client goes away.
    let uploads = state.uploads.clone();
    let id = tokio::task::spawn_blocking(move || uploads.submit(form))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            work_id: id.to_string(),
        }),
    ))
}

/// Collect the multipart body into an [`UploadForm`].
///
/// Parts with a filename are files, the rest are text. Unknown and repeated
/// fields are ignored.
async fn read_form(multipart: &mut Multipart) -> ServerResult<UploadForm> {
    let mut form = UploadForm::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field.file_name().map(str::to_owned) {
            Some(filename) => {
                let data = field.bytes().await?;
                debug!(field = %name, %filename, bytes = data.len(), "received file part");
                form.set_file(&name, FileUpload::new(filename, data));
            }
            None => {
                let text = field.text().await?;
                form.set_text(&name, text);
            }
        }
    }
    Ok(form)
}

/// `GET /works`: every usable record, in upload order.
pub async fn works_handler(State(state): State<AppState>) -> ServerResult<Json<Vec<WorkView>>> {
    let uploads = state.uploads.clone();
    let projection = tokio::task::spawn_blocking(move || uploads.list())
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;
    debug!(count = projection.views.len(), "listing works");
    Ok(Json(projection.views))
}

/// `GET /uploads/*filename`: raw bytes of a stored image.
pub async fn file_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ServerResult<Response> {
    debug!(%filename, "file requested");
    let content = state.uploads.content().clone();
    let name = filename.clone();
    let data = tokio::task::spawn_blocking(move || content.get(&name))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    let content_type = raw_extension(&filename)
        .and_then(ImageExtension::parse)
        .map_or("application/octet-stream", |ext| ext.content_type());
    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}

/// `GET /`: the landing page.
pub async fn index_handler(State(state): State<AppState>) -> Response {
    match tokio::fs::read(&state.index_path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!(path = %state.index_path.display(), error = %e, "landing page unavailable");
            (StatusCode::NOT_FOUND, "Homepage not found.").into_response()
        }
    }
}
