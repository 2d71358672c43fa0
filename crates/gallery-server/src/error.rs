use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gallery_store::StoreError;
use gallery_upload::UploadError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Shown for every server-side failure; details stay in the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "伺服器內部錯誤，無法儲存檔案或資料";
pub const NOT_FOUND_MESSAGE: &str = "檔案未找到";
pub const BAD_FORM_MESSAGE: &str = "無法解析上傳表單";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// JSON body of every failed API call.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl ServerError {
    /// Status code and client-facing message.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Upload(UploadError::Validation(e)) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Store(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
            }
            Self::Multipart(e) => (e.status(), BAD_FORM_MESSAGE.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ErrorBody::new(message))).into_response()
    }
}
