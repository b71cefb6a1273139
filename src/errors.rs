use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized. Invalid or missing admin token.")]
    Unauthorized,
    #[error("Missing required field: `{0}`")]
    MissingField(&'static str),
    #[error("Category `{0}` is not valid, possible values are: 20-30, 35+, 40+, 45+, 50+ and 55+")]
    InvalidCategory(String),
    #[error("Playing style `{0}` is not valid, possible values are: OFFENSIVE, DEFENSIVE and UNKNOWN")]
    InvalidPlayingStyle(String),
    #[error("Invalid date of birth `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Payment status cannot be reverted once confirmed")]
    PaymentStatusLocked,
    #[error("Player with id `{0}` does not exist")]
    PlayerNotFound(i64),
    #[error("Too many registrations from this address, please try again later")]
    RateLimited,
    #[error("No file uploaded")]
    MissingUploadFile,
    #[error("Upload failed")]
    UploadFailed,
    #[error("Unknown JSON Error")]
    JsonUnknownError,
    #[error("Missing JSON content-type header")]
    MissingContentType,
    #[error("JSON Syntax error: {0}")]
    JsonSyntaxError(String),
    #[error("Invalid JSON data")]
    JsonDataError,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn code(&self) -> String {
        match self {
            AppError::Unauthorized => String::from("Unauthorized"),
            AppError::MissingField(_) => String::from("MissingField"),
            AppError::InvalidCategory(_) => String::from("InvalidCategory"),
            AppError::InvalidPlayingStyle(_) => String::from("InvalidPlayingStyle"),
            AppError::InvalidDate(_) => String::from("InvalidDate"),
            AppError::PaymentStatusLocked => String::from("PaymentStatusLocked"),
            AppError::PlayerNotFound(_) => String::from("PlayerNotFound"),
            AppError::RateLimited => String::from("RateLimited"),
            AppError::MissingUploadFile => String::from("MissingUploadFile"),
            AppError::UploadFailed => String::from("UploadFailed"),
            AppError::JsonUnknownError => String::from("JsonUnknownError"),
            AppError::MissingContentType => String::from("MissingContentType"),
            AppError::JsonSyntaxError(_) => String::from("JsonSyntaxError"),
            AppError::JsonDataError => String::from("JsonDataError"),
            AppError::Database(_) => String::from("DatabaseError"),
        }
    }

    /// The offending field for validation failures, surfaced in the error payload.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AppError::MissingField(field) => Some(*field),
            AppError::InvalidCategory(_) => Some("category"),
            AppError::InvalidPlayingStyle(_) => Some("playingStyle"),
            AppError::InvalidDate(_) => Some("dob"),
            _ => None,
        }
    }
}
