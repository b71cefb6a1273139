use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{config::CloudinaryConfig, errors::AppError};

/// Media store collaborator: takes a blob, hands back a retrieval URL.
/// With Cloudinary credentials configured this performs an unsigned preset
/// upload; without them it generates a placeholder URL for local development.
#[derive(Clone)]
pub enum MediaStore {
    Cloudinary {
        client: reqwest::Client,
        config: CloudinaryConfig,
    },
    Placeholder,
}

#[derive(Deserialize)]
struct CloudinaryUpload {
    secure_url: String,
}

impl MediaStore {
    pub fn new(client: reqwest::Client, config: Option<CloudinaryConfig>) -> Self {
        match config {
            Some(config) => Self::Cloudinary { client, config },
            None => {
                tracing::info!("no media store credentials, using placeholder URLs");
                Self::Placeholder
            }
        }
    }

    pub async fn store(&self, data: Vec<u8>, file_name: &str) -> Result<String, AppError> {
        match self {
            Self::Cloudinary { client, config } => {
                let url = format!(
                    "https://api.cloudinary.com/v1_1/{}/image/upload",
                    config.cloud_name
                );
                let form = Form::new()
                    .text("upload_preset", config.upload_preset.clone())
                    .part("file", Part::bytes(data).file_name(file_name.to_string()));
                let response = client.post(&url).multipart(form).send().await.map_err(|e| {
                    tracing::error!("media store request failed: {}", e);
                    AppError::UploadFailed
                })?;
                if !response.status().is_success() {
                    tracing::error!("media store rejected upload: {}", response.status());
                    return Err(AppError::UploadFailed);
                }
                let upload: CloudinaryUpload = response.json().await.map_err(|e| {
                    tracing::error!("bad media store response: {}", e);
                    AppError::UploadFailed
                })?;
                Ok(upload.secure_url)
            }
            Self::Placeholder => Ok(format!(
                "https://picsum.photos/seed/{}/400/400",
                Utc::now().timestamp_millis()
            )),
        }
    }
}
