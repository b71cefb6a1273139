use crate::{
    config::AppConfig,
    errors::AppError,
    models::player::{Category, PlayingStyle, RegistrationState},
    payloads::{ListQuery, PlayerUpdate},
    repositories::player_repo::{self, DbPlayer, PaymentTotals, PlayerFilter, SortSpec},
};

/// One page of the admin listing plus the global payment totals.
#[derive(Debug)]
pub struct PlayerPage {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub results: Vec<DbPlayer>,
    pub totals: PaymentTotals,
}

fn parse_page(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}

fn build_filter(query: &ListQuery) -> PlayerFilter {
    PlayerFilter {
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        category: query.category.clone().filter(|c| !c.trim().is_empty()),
        payment_status: query
            .payment_status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .map(|status| status == "true"),
        style: query.style.clone().filter(|s| !s.trim().is_empty()),
        age_min: query.age_min.as_deref().and_then(|a| a.parse().ok()),
        age_max: query.age_max.as_deref().and_then(|a| a.parse().ok()),
        state: query.state.as_deref().and_then(RegistrationState::parse),
    }
}

pub async fn list_players(
    pool: &sqlx::SqlitePool,
    config: &AppConfig,
    query: ListQuery,
) -> Result<PlayerPage, AppError> {
    let page = parse_page(query.page.as_deref(), 1);
    let limit = parse_page(query.limit.as_deref(), config.page_size);
    let sort = SortSpec::parse(query.sort.as_deref());
    let filter = build_filter(&query);
    let offset = (page - 1) * limit;
    let results = player_repo::list_players(pool, &filter, sort, limit, offset).await?;
    let total = player_repo::count_players(pool, &filter).await?;
    // Totals stay global on purpose, the dashboard header is not scoped by filters.
    let totals = player_repo::payment_totals(pool).await?;
    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
    Ok(PlayerPage {
        total,
        page,
        limit,
        total_pages,
        results,
        totals,
    })
}

pub async fn get_player(pool: &sqlx::SqlitePool, id: i64) -> Result<DbPlayer, AppError> {
    player_repo::get_player(pool, id)
        .await?
        .ok_or(AppError::PlayerNotFound(id))
}

/// Whitelisted partial update over the full record. Enum-valued fields are
/// validated when present, and a confirmed payment status cannot be
/// reverted back to unpaid.
pub async fn update_player(
    pool: &sqlx::SqlitePool,
    id: i64,
    update: PlayerUpdate,
) -> Result<DbPlayer, AppError> {
    let current = player_repo::get_player(pool, id)
        .await?
        .ok_or(AppError::PlayerNotFound(id))?;
    if let Some(category) = &update.category {
        Category::parse(category)?;
    }
    if let Some(style) = &update.playing_style {
        PlayingStyle::parse(style)?;
    }
    if let Some(dob) = &update.dob {
        if chrono::NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
            return Err(AppError::InvalidDate(dob.clone()));
        }
    }
    if current.payment_status && update.payment_status == Some(false) {
        return Err(AppError::PaymentStatusLocked);
    }
    player_repo::update_player(pool, id, &update).await?;
    player_repo::get_player(pool, id)
        .await?
        .ok_or(AppError::PlayerNotFound(id))
}

pub async fn delete_player(pool: &sqlx::SqlitePool, id: i64) -> Result<(), AppError> {
    let rows = player_repo::delete_player(pool, id).await?;
    if rows == 0 {
        return Err(AppError::PlayerNotFound(id));
    }
    tracing::info!("deleted player {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => query.page = value,
                "limit" => query.limit = value,
                "sort" => query.sort = value,
                "search" => query.search = value,
                "category" => query.category = value,
                "paymentStatus" => query.payment_status = value,
                "ageMin" => query.age_min = value,
                "ageMax" => query.age_max = value,
                "style" => query.style = value,
                "state" => query.state = value,
                other => panic!("unknown query key {other}"),
            }
        }
        query
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_list_defaults(pool: sqlx::SqlitePool) {
        let config = AppConfig::for_tests();
        let page = list_players(&pool, &config, ListQuery::default())
            .await
            .expect("list ok");
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 20);
        assert_eq!(page.total, 8);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.results.len(), 8);
        assert_eq!(page.totals.paid + page.totals.unpaid, page.total);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_list_garbage_paging_falls_back(pool: sqlx::SqlitePool) {
        let config = AppConfig::for_tests();
        let page = list_players(
            &pool,
            &config,
            query(&[("page", "abc"), ("limit", "-5")]),
        )
        .await
        .expect("list ok");
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 20);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_list_total_pages_is_ceiling(pool: sqlx::SqlitePool) {
        let config = AppConfig::for_tests();
        let page = list_players(&pool, &config, query(&[("limit", "3"), ("page", "3")]))
            .await
            .expect("list ok");
        assert_eq!(page.total, 8);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results.len(), 2);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_list_blank_payment_status_is_no_filter(pool: sqlx::SqlitePool) {
        let config = AppConfig::for_tests();
        let page = list_players(&pool, &config, query(&[("paymentStatus", "")]))
            .await
            .expect("list ok");
        assert_eq!(page.total, 8);

        let page = list_players(&pool, &config, query(&[("paymentStatus", "false")]))
            .await
            .expect("list ok");
        assert_eq!(page.total, 4);
        assert!(page.results.iter().all(|p| !p.payment_status));
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_list_stats_ignore_filters(pool: sqlx::SqlitePool) {
        let config = AppConfig::for_tests();
        let page = list_players(&pool, &config, query(&[("paymentStatus", "true")]))
            .await
            .expect("list ok");
        assert_eq!(page.total, 4);
        assert!(page.results.iter().all(|p| p.payment_status));
        // Filter narrows the page, not the dashboard totals.
        assert_eq!(page.totals.paid + page.totals.unpaid, 8);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_list_combined_filters(pool: sqlx::SqlitePool) {
        let config = AppConfig::for_tests();
        let page = list_players(
            &pool,
            &config,
            query(&[
                ("category", "40+"),
                ("paymentStatus", "true"),
                ("ageMin", "40"),
                ("ageMax", "45"),
            ]),
        )
        .await
        .expect("list ok");
        let names: Vec<&str> = page.results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Hari Das", "Anil Sharma"]);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_update_marks_payment_one_way(pool: sqlx::SqlitePool) {
        let update = PlayerUpdate {
            payment_status: Some(true),
            ..Default::default()
        };
        let player = update_player(&pool, 2, update).await.expect("marked paid");
        assert!(player.payment_status);

        let revert = PlayerUpdate {
            payment_status: Some(false),
            ..Default::default()
        };
        assert!(matches!(
            update_player(&pool, 2, revert).await,
            Err(AppError::PaymentStatusLocked)
        ));
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_update_validates_enum_fields(pool: sqlx::SqlitePool) {
        let update = PlayerUpdate {
            category: Some("60+".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            update_player(&pool, 1, update).await,
            Err(AppError::InvalidCategory(_))
        ));

        let update = PlayerUpdate {
            dob: Some("21/08/1982".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            update_player(&pool, 1, update).await,
            Err(AppError::InvalidDate(_))
        ));
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_update_and_get_missing_player(pool: sqlx::SqlitePool) {
        assert!(matches!(
            get_player(&pool, 999).await,
            Err(AppError::PlayerNotFound(999))
        ));
        assert!(matches!(
            update_player(&pool, 999, PlayerUpdate::default()).await,
            Err(AppError::PlayerNotFound(999))
        ));
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_delete_then_get_is_not_found(pool: sqlx::SqlitePool) {
        delete_player(&pool, 3).await.expect("deleted");
        assert!(matches!(
            get_player(&pool, 3).await,
            Err(AppError::PlayerNotFound(3))
        ));
        assert!(matches!(
            delete_player(&pool, 3).await,
            Err(AppError::PlayerNotFound(3))
        ));
    }
}
