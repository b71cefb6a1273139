use axum::{
    Json as AxumJson,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    errors::AppError,
    models::player::RegistrationState,
    repositories::player_repo::{DbPlayer, PaymentTotals},
    services::admin_service::PlayerPage,
};

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
#[serde(rename_all = "camelCase")]
pub enum AppResponse {
    Error { error: ErrorResponse },
    Success { payload: SuccessResponse },
}

pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    AxumJson<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(json) => Ok(Json(json.0)),
            Err(rej) => match rej {
                JsonRejection::JsonDataError(_) => Err(AppError::JsonDataError),
                JsonRejection::JsonSyntaxError(e) => Err(AppError::JsonSyntaxError(e.to_string())),
                JsonRejection::MissingJsonContentType(_) => Err(AppError::MissingContentType),
                _ => Err(AppError::JsonUnknownError),
            },
        }
    }
}

/// A registration record as returned on the wire, with the lifecycle state
/// computed from the payment fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: i64,
    pub name: String,
    pub player_image_url: String,
    pub valid_document_url: String,
    pub email: Option<String>,
    pub mobile: String,
    pub dob: String,
    pub age: i64,
    pub adhar: Option<String>,
    pub category: String,
    pub upi_or_barcode: Option<String>,
    pub payment_screenshot_url: Option<String>,
    pub payment_status: bool,
    pub achievements: Option<String>,
    pub playing_style: String,
    pub remark: Option<String>,
    pub state: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<DbPlayer> for PlayerRecord {
    fn from(value: DbPlayer) -> Self {
        let state = RegistrationState::derive(
            value.payment_status,
            value.upi_or_barcode.as_deref(),
            value.payment_screenshot_url.as_deref(),
        );
        Self {
            id: value.id,
            name: value.name,
            player_image_url: value.player_image_url,
            valid_document_url: value.valid_document_url,
            email: value.email,
            mobile: value.mobile,
            dob: value.dob,
            age: value.age,
            adhar: value.adhar,
            category: value.category,
            upi_or_barcode: value.upi_or_barcode,
            payment_screenshot_url: value.payment_screenshot_url,
            payment_status: value.payment_status,
            achievements: value.achievements,
            playing_style: value.playing_style,
            remark: value.remark,
            state: state.to_string(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total: i64,
    pub paid: i64,
    pub unpaid: i64,
}

impl From<PaymentTotals> for PaymentStats {
    fn from(value: PaymentTotals) -> Self {
        Self {
            total: value.paid + value.unpaid,
            paid: value.paid,
            unpaid: value.unpaid,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing)]
    pub status_code: StatusCode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(rename_all_fields = "camelCase")]
#[serde(tag = "type")]
pub enum SuccessResponse {
    PlayerCreated {
        player: PlayerRecord,
    },
    PlayerUpdated {
        player: PlayerRecord,
    },
    Player {
        player: PlayerRecord,
    },
    PlayerPage {
        total: i64,
        page: i64,
        limit: i64,
        total_pages: i64,
        results: Vec<PlayerRecord>,
        stats: PaymentStats,
    },
    PlayerDeleted {
        id: i64,
    },
    FileUploaded {
        url: String,
    },
}

impl From<PlayerPage> for AppResponse {
    fn from(value: PlayerPage) -> Self {
        Self::Success {
            payload: SuccessResponse::PlayerPage {
                total: value.total,
                page: value.page,
                limit: value.limit,
                total_pages: value.total_pages,
                results: value.results.into_iter().map(PlayerRecord::from).collect(),
                stats: value.totals.into(),
            },
        }
    }
}

impl IntoResponse for AppResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppResponse::Error { error: e } => (e.status_code, AxumJson(e)).into_response(),
            AppResponse::Success {
                payload: SuccessResponse::PlayerCreated { .. },
            } => (StatusCode::CREATED, AxumJson(self)).into_response(),
            AppResponse::Success { payload: _ } => (StatusCode::OK, AxumJson(self)).into_response(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPlayingStyle(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            AppError::PaymentStatusLocked => StatusCode::BAD_REQUEST,
            AppError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::MissingUploadFile => StatusCode::BAD_REQUEST,
            AppError::UploadFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::JsonUnknownError => StatusCode::BAD_REQUEST,
            AppError::MissingContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonDataError => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {}", self);
        }
        AppResponse::Error {
            error: ErrorResponse {
                code: self.code(),
                message: format!("{}", self),
                field: self.field(),
                status_code,
            },
        }
        .into_response()
    }
}
