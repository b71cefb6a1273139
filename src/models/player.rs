use std::fmt::Display;

use chrono::NaiveDate;

use crate::{errors::AppError, payloads::NewRegistration};

/// Age-bracket labels a player registers under. Fixed set, nothing else accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    TwentyToThirty,
    ThirtyFivePlus,
    FortyPlus,
    FortyFivePlus,
    FiftyPlus,
    FiftyFivePlus,
}

impl Category {
    pub fn parse<S: AsRef<str>>(str: S) -> Result<Self, AppError> {
        match str.as_ref().trim() {
            "20-30" => Ok(Self::TwentyToThirty),
            "35+" => Ok(Self::ThirtyFivePlus),
            "40+" => Ok(Self::FortyPlus),
            "45+" => Ok(Self::FortyFivePlus),
            "50+" => Ok(Self::FiftyPlus),
            "55+" => Ok(Self::FiftyFivePlus),
            other => Err(AppError::InvalidCategory(other.to_string())),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::TwentyToThirty => write!(f, "20-30"),
            Category::ThirtyFivePlus => write!(f, "35+"),
            Category::FortyPlus => write!(f, "40+"),
            Category::FortyFivePlus => write!(f, "45+"),
            Category::FiftyPlus => write!(f, "50+"),
            Category::FiftyFivePlus => write!(f, "55+"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayingStyle {
    Offensive,
    Defensive,
    #[default]
    Unknown,
}

impl PlayingStyle {
    pub fn parse<S: AsRef<str>>(str: S) -> Result<Self, AppError> {
        match str.as_ref().trim() {
            "OFFENSIVE" => Ok(Self::Offensive),
            "DEFENSIVE" => Ok(Self::Defensive),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(AppError::InvalidPlayingStyle(other.to_string())),
        }
    }
}

impl Display for PlayingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayingStyle::Offensive => write!(f, "OFFENSIVE"),
            PlayingStyle::Defensive => write!(f, "DEFENSIVE"),
            PlayingStyle::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Lifecycle of a registration record. A record starts as a draft after the
/// phase-1 submission and becomes finalized once any payment field lands on it,
/// so drafts abandoned between the two steps stay queryable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationState {
    Draft,
    Finalized,
}

impl RegistrationState {
    pub fn derive(
        payment_status: bool,
        upi_or_barcode: Option<&str>,
        payment_screenshot_url: Option<&str>,
    ) -> Self {
        if payment_status || upi_or_barcode.is_some() || payment_screenshot_url.is_some() {
            Self::Finalized
        } else {
            Self::Draft
        }
    }

    pub fn parse<S: AsRef<str>>(str: S) -> Option<Self> {
        match str.as_ref().trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "finalized" => Some(Self::Finalized),
            _ => None,
        }
    }
}

impl Display for RegistrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationState::Draft => write!(f, "DRAFT"),
            RegistrationState::Finalized => write!(f, "FINALIZED"),
        }
    }
}

/// A phase-1 submission that passed validation, ready to insert.
#[derive(Debug)]
pub struct NewPlayer {
    pub name: String,
    pub player_image_url: String,
    pub valid_document_url: String,
    pub email: Option<String>,
    pub mobile: String,
    pub dob: String,
    pub age: i64,
    pub adhar: Option<String>,
    pub category: Category,
}

impl NewPlayer {
    /// Validates the raw intake payload. Required fields must be present and
    /// non-blank, dob must be an ISO date, category must be in the fixed set.
    /// Age is taken as submitted and not cross-checked against dob.
    pub fn validate(payload: NewRegistration) -> Result<Self, AppError> {
        let name = required_text(payload.name, "name")?;
        let mobile = required_text(payload.mobile, "mobile")?;
        let player_image_url = required_text(payload.player_image_url, "playerImageUrl")?;
        let valid_document_url = required_text(payload.valid_document_url, "validDocumentUrl")?;
        let dob = required_text(payload.dob, "dob")?;
        if NaiveDate::parse_from_str(&dob, "%Y-%m-%d").is_err() {
            return Err(AppError::InvalidDate(dob));
        }
        let age = payload.age.ok_or(AppError::MissingField("age"))?;
        let category = Category::parse(payload.category.ok_or(AppError::MissingField("category"))?)?;
        Ok(Self {
            name,
            player_image_url,
            valid_document_url,
            email: payload.email.filter(|e| !e.trim().is_empty()),
            mobile,
            dob,
            age,
            adhar: payload.adhar.filter(|a| !a.trim().is_empty()),
            category,
        })
    }
}

fn required_text(
    value: Option<String>,
    field: &'static str,
) -> Result<String, AppError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(AppError::MissingField(field)),
    }
}
