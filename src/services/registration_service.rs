use crate::{
    errors::AppError,
    models::player::{NewPlayer, PlayingStyle},
    payloads::{NewRegistration, PaymentDetails, PlayerUpdate},
    repositories::player_repo::{self, DbPlayer},
};

/// Phase 1: validates the intake payload and persists a draft record with
/// payment status false. The photo and document URLs are expected to have
/// been obtained from the media store already.
pub async fn create_registration(
    pool: &sqlx::SqlitePool,
    payload: NewRegistration,
) -> Result<DbPlayer, AppError> {
    let player = NewPlayer::validate(payload)?;
    let id = player_repo::create_player(pool, &player).await?;
    tracing::info!("registered player {} ({})", id, player.name);
    player_repo::get_player(pool, id)
        .await?
        .ok_or(AppError::PlayerNotFound(id))
}

/// Phase 2: attaches payment and descriptive data to an existing record.
/// Only the `PaymentDetails` whitelist is written; everything set in phase 1
/// stays untouched. Calling it again overwrites the previous payment round
/// in place, but a confirmed payment status can never be reverted.
pub async fn finalize_registration(
    pool: &sqlx::SqlitePool,
    id: i64,
    details: PaymentDetails,
) -> Result<DbPlayer, AppError> {
    let current = player_repo::get_player(pool, id)
        .await?
        .ok_or(AppError::PlayerNotFound(id))?;
    if let Some(style) = &details.playing_style {
        PlayingStyle::parse(style)?;
    }
    if current.payment_status && details.payment_status == Some(false) {
        return Err(AppError::PaymentStatusLocked);
    }
    let update = PlayerUpdate {
        upi_or_barcode: details.upi_or_barcode,
        payment_screenshot_url: details.payment_screenshot_url,
        payment_status: details.payment_status,
        achievements: details.achievements,
        playing_style: details.playing_style,
        remark: details.remark,
        ..Default::default()
    };
    player_repo::update_player(pool, id, &update).await?;
    player_repo::get_player(pool, id)
        .await?
        .ok_or(AppError::PlayerNotFound(id))
}
