use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    response::IntoResponse,
    routing::post,
};

use crate::{
    AppState,
    errors::AppError,
    media::MediaStore,
    responses::{AppResponse, SuccessResponse},
};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepts one file and hands it to the media store. The record referencing
/// the returned URL is written by a later call; a blob whose registration
/// never completes is simply orphaned.
async fn upload_file(
    State(media): State<MediaStore>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return AppError::MissingUploadFile.into_response(),
            Err(e) => {
                tracing::error!("failed to read multipart body: {}", e);
                return AppError::UploadFailed.into_response();
            }
        };
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("failed to read upload: {}", e);
                return AppError::UploadFailed.into_response();
            }
        };
        return match media.store(data.to_vec(), &file_name).await {
            Ok(url) => AppResponse::Success {
                payload: SuccessResponse::FileUploaded { url },
            }
            .into_response(),
            Err(e) => e.into_response(),
        };
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/uploads", post(upload_file))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
