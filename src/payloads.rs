use serde::Deserialize;

/// Phase-1 intake submission. Everything is optional at the wire level so
/// validation can report the missing field instead of a generic body error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub name: Option<String>,
    pub player_image_url: Option<String>,
    pub valid_document_url: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub dob: Option<String>,
    pub age: Option<i64>,
    pub adhar: Option<String>,
    pub category: Option<String>,
}

/// Phase-2 payload. Only these fields may be written by the public
/// finalize endpoint; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub upi_or_barcode: Option<String>,
    pub payment_screenshot_url: Option<String>,
    pub payment_status: Option<bool>,
    pub achievements: Option<String>,
    pub playing_style: Option<String>,
    pub remark: Option<String>,
}

/// Admin partial update. An explicit whitelist over the full record, so the
/// endpoint never writes fields that are not part of the schema.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub player_image_url: Option<String>,
    pub valid_document_url: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub dob: Option<String>,
    pub age: Option<i64>,
    pub adhar: Option<String>,
    pub category: Option<String>,
    pub upi_or_barcode: Option<String>,
    pub payment_screenshot_url: Option<String>,
    pub payment_status: Option<bool>,
    pub achievements: Option<String>,
    pub playing_style: Option<String>,
    pub remark: Option<String>,
}

/// Admin list query string. Numeric parameters arrive as raw strings and are
/// parsed defensively: garbage falls back to defaults rather than erroring.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub payment_status: Option<String>,
    pub age_min: Option<String>,
    pub age_max: Option<String>,
    pub style: Option<String>,
    pub state: Option<String>,
}
