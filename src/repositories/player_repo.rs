use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, prelude::FromRow};

use crate::{
    models::player::{NewPlayer, RegistrationState},
    payloads::PlayerUpdate,
};

#[derive(Clone, Debug, FromRow)]
pub struct DbPlayer {
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
    pub created_at: i64,
    pub updated_at: i64,
}

pub async fn create_player(pool: &sqlx::SqlitePool, player: &NewPlayer) -> sqlx::Result<i64> {
    let now = Utc::now().timestamp();
    let result = sqlx::query(
        "insert into players
            (name, player_image_url, valid_document_url, email, mobile, dob, age, adhar,
             category, payment_status, playing_style, created_at, updated_at)
            values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, false, 'UNKNOWN', ?10, ?10)
        ",
    )
    .bind(&player.name)
    .bind(&player.player_image_url)
    .bind(&player.valid_document_url)
    .bind(&player.email)
    .bind(&player.mobile)
    .bind(&player.dob)
    .bind(player.age)
    .bind(&player.adhar)
    .bind(player.category.to_string())
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_player(pool: &sqlx::SqlitePool, id: i64) -> sqlx::Result<Option<DbPlayer>> {
    sqlx::query_as("select * from players where id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Partial update: absent fields keep their current value. Callers are
/// responsible for validating enum-valued fields before getting here.
pub async fn update_player(
    pool: &sqlx::SqlitePool,
    id: i64,
    update: &PlayerUpdate,
) -> sqlx::Result<u64> {
    let now = Utc::now().timestamp();
    let result = sqlx::query(
        "update players set
            name = coalesce(?1, name),
            player_image_url = coalesce(?2, player_image_url),
            valid_document_url = coalesce(?3, valid_document_url),
            email = coalesce(?4, email),
            mobile = coalesce(?5, mobile),
            dob = coalesce(?6, dob),
            age = coalesce(?7, age),
            adhar = coalesce(?8, adhar),
            category = coalesce(?9, category),
            upi_or_barcode = coalesce(?10, upi_or_barcode),
            payment_screenshot_url = coalesce(?11, payment_screenshot_url),
            payment_status = coalesce(?12, payment_status),
            achievements = coalesce(?13, achievements),
            playing_style = coalesce(?14, playing_style),
            remark = coalesce(?15, remark),
            updated_at = ?16
        where id = ?17",
    )
    .bind(&update.name)
    .bind(&update.player_image_url)
    .bind(&update.valid_document_url)
    .bind(&update.email)
    .bind(&update.mobile)
    .bind(&update.dob)
    .bind(update.age)
    .bind(&update.adhar)
    .bind(&update.category)
    .bind(&update.upi_or_barcode)
    .bind(&update.payment_screenshot_url)
    .bind(update.payment_status)
    .bind(&update.achievements)
    .bind(&update.playing_style)
    .bind(&update.remark)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_player(pool: &sqlx::SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("delete from players where id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Admin list filters, combined with AND. Category and style are matched as
/// raw strings: an off-enum value simply matches nothing.
#[derive(Debug, Default)]
pub struct PlayerFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub payment_status: Option<bool>,
    pub style: Option<String>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
    pub state: Option<RegistrationState>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Name,
    Mobile,
    Dob,
    Age,
    Category,
    PaymentStatus,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Mobile => "mobile",
            SortField::Dob => "dob",
            SortField::Age => "age",
            SortField::Category => "category",
            SortField::PaymentStatus => "payment_status",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            descending: true,
        }
    }
}

impl SortSpec {
    /// Parses a `field:direction` pair against the sortable-field whitelist.
    /// Anything unrecognized falls back to created-at descending.
    pub fn parse(sort: Option<&str>) -> Self {
        let Some(sort) = sort else {
            return Self::default();
        };
        let (field, direction) = sort.split_once(':').unwrap_or((sort, "asc"));
        let field = match field.trim() {
            "name" => SortField::Name,
            "mobile" => SortField::Mobile,
            "dob" => SortField::Dob,
            "age" => SortField::Age,
            "category" => SortField::Category,
            "paymentStatus" => SortField::PaymentStatus,
            "createdAt" => SortField::CreatedAt,
            "updatedAt" => SortField::UpdatedAt,
            _ => return Self::default(),
        };
        Self {
            field,
            descending: direction.trim() == "desc",
        }
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &PlayerFilter) {
    query.push(" where 1 = 1");
    if let Some(term) = &filter.search {
        let pattern = format!("%{}%", term.trim());
        query.push(" and (name like ");
        query.push_bind(pattern.clone());
        query.push(" or email like ");
        query.push_bind(pattern.clone());
        query.push(" or mobile like ");
        query.push_bind(pattern.clone());
        query.push(" or adhar like ");
        query.push_bind(pattern);
        query.push(")");
    }
    if let Some(category) = &filter.category {
        query.push(" and category = ");
        query.push_bind(category.clone());
    }
    if let Some(paid) = filter.payment_status {
        query.push(" and payment_status = ");
        query.push_bind(paid);
    }
    if let Some(style) = &filter.style {
        query.push(" and playing_style = ");
        query.push_bind(style.clone());
    }
    if let Some(age_min) = filter.age_min {
        query.push(" and age >= ");
        query.push_bind(age_min);
    }
    if let Some(age_max) = filter.age_max {
        query.push(" and age <= ");
        query.push_bind(age_max);
    }
    match filter.state {
        Some(RegistrationState::Draft) => {
            query.push(
                " and payment_status = false
                  and upi_or_barcode is null
                  and payment_screenshot_url is null",
            );
        }
        Some(RegistrationState::Finalized) => {
            query.push(
                " and (payment_status = true
                  or upi_or_barcode is not null
                  or payment_screenshot_url is not null)",
            );
        }
        None => {}
    }
}

pub async fn list_players(
    pool: &sqlx::SqlitePool,
    filter: &PlayerFilter,
    sort: SortSpec,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<DbPlayer>> {
    let mut query = QueryBuilder::new("select * from players");
    push_filters(&mut query, filter);
    query.push(" order by ");
    query.push(sort.field.column());
    query.push(if sort.descending { " desc" } else { " asc" });
    query.push(" limit ");
    query.push_bind(limit);
    query.push(" offset ");
    query.push_bind(offset);
    query.build_query_as().fetch_all(pool).await
}

pub async fn count_players(pool: &sqlx::SqlitePool, filter: &PlayerFilter) -> sqlx::Result<i64> {
    let mut query = QueryBuilder::new("select count(*) from players");
    push_filters(&mut query, filter);
    query.build_query_scalar().fetch_one(pool).await
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PaymentTotals {
    pub paid: i64,
    pub unpaid: i64,
}

#[derive(FromRow)]
struct StatusCount {
    payment_status: bool,
    count: i64,
}

/// Grouped counts over the whole collection, never scoped by list filters.
pub async fn payment_totals(pool: &sqlx::SqlitePool) -> sqlx::Result<PaymentTotals> {
    let counts: Vec<StatusCount> = sqlx::query_as(
        "select payment_status, count(*) as count from players group by payment_status",
    )
    .fetch_all(pool)
    .await?;
    let mut totals = PaymentTotals::default();
    for row in counts {
        if row.payment_status {
            totals.paid = row.count;
        } else {
            totals.unpaid = row.count;
        }
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use crate::models::player::Category;

    use super::*;

    fn new_player() -> NewPlayer {
        NewPlayer {
            name: "A Kumar".to_string(),
            player_image_url: "https://cdn.example/p.jpg".to_string(),
            valid_document_url: "https://cdn.example/d.jpg".to_string(),
            email: None,
            mobile: "9876543210".to_string(),
            dob: "1984-02-11".to_string(),
            age: 41,
            adhar: None,
            category: Category::FortyPlus,
        }
    }

    #[sqlx::test]
    async fn test_create_and_get_player(pool: sqlx::SqlitePool) {
        let id = create_player(&pool, &new_player())
            .await
            .expect("player inserted");
        let player = get_player(&pool, id)
            .await
            .expect("query ok")
            .expect("player found");
        assert_eq!(player.name, "A Kumar");
        assert_eq!(player.category, "40+");
        assert!(!player.payment_status);
        assert_eq!(player.playing_style, "UNKNOWN");
        assert_eq!(player.created_at, player.updated_at);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_default_sort_is_created_at_desc(pool: sqlx::SqlitePool) {
        let players = list_players(&pool, &PlayerFilter::default(), SortSpec::default(), 20, 0)
            .await
            .expect("list ok");
        assert_eq!(players.len(), 8);
        assert_eq!(players[0].name, "Hari Das");
        assert_eq!(players[7].name, "Anil Sharma");
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_category_filter_is_exact(pool: sqlx::SqlitePool) {
        let filter = PlayerFilter {
            category: Some("40+".to_string()),
            ..Default::default()
        };
        let players = list_players(&pool, &filter, SortSpec::default(), 20, 0)
            .await
            .expect("list ok");
        assert_eq!(players.len(), 3);
        assert!(players.iter().all(|p| p.category == "40+"));
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_payment_and_age_filters(pool: sqlx::SqlitePool) {
        let filter = PlayerFilter {
            payment_status: Some(true),
            ..Default::default()
        };
        let paid = list_players(&pool, &filter, SortSpec::default(), 20, 0)
            .await
            .expect("list ok");
        assert_eq!(paid.len(), 4);
        assert!(paid.iter().all(|p| p.payment_status));

        let filter = PlayerFilter {
            age_min: Some(40),
            age_max: Some(50),
            ..Default::default()
        };
        let in_range = list_players(&pool, &filter, SortSpec::default(), 20, 0)
            .await
            .expect("list ok");
        assert_eq!(in_range.len(), 4);
        assert!(in_range.iter().all(|p| (40..=50).contains(&p.age)));
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_search_matches_name_mobile_and_adhar(pool: sqlx::SqlitePool) {
        let by_name = PlayerFilter {
            search: Some("Patel".to_string()),
            ..Default::default()
        };
        let players = list_players(&pool, &by_name, SortSpec::default(), 20, 0)
            .await
            .expect("list ok");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Bina Patel");

        let by_mobile = PlayerFilter {
            search: Some("500006".to_string()),
            ..Default::default()
        };
        let players = list_players(&pool, &by_mobile, SortSpec::default(), 20, 0)
            .await
            .expect("list ok");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Farhan Khan");

        let by_adhar = PlayerFilter {
            search: Some("123456".to_string()),
            ..Default::default()
        };
        let players = list_players(&pool, &by_adhar, SortSpec::default(), 20, 0)
            .await
            .expect("list ok");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Farhan Khan");
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_draft_state_filter_finds_orphaned_drafts(pool: sqlx::SqlitePool) {
        let filter = PlayerFilter {
            state: Some(RegistrationState::Draft),
            ..Default::default()
        };
        let drafts = list_players(&pool, &filter, SortSpec::default(), 20, 0)
            .await
            .expect("list ok");
        assert_eq!(drafts.len(), 3);
        assert!(drafts.iter().all(|p| !p.payment_status
            && p.upi_or_barcode.is_none()
            && p.payment_screenshot_url.is_none()));

        let filter = PlayerFilter {
            state: Some(RegistrationState::Finalized),
            ..Default::default()
        };
        assert_eq!(count_players(&pool, &filter).await.expect("count ok"), 5);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_pagination_offsets(pool: sqlx::SqlitePool) {
        let second_page = list_players(&pool, &PlayerFilter::default(), SortSpec::default(), 3, 3)
            .await
            .expect("list ok");
        assert_eq!(second_page.len(), 3);
        assert_eq!(second_page[0].name, "Esha Verma");
        assert_eq!(second_page[2].name, "Chetan Rao");
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_sort_by_age_ascending(pool: sqlx::SqlitePool) {
        let sort = SortSpec::parse(Some("age:asc"));
        let players = list_players(&pool, &PlayerFilter::default(), sort, 20, 0)
            .await
            .expect("list ok");
        assert_eq!(players[0].age, 28);
        assert_eq!(players[7].age, 56);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_payment_totals_are_global(pool: sqlx::SqlitePool) {
        let totals = payment_totals(&pool).await.expect("totals ok");
        assert_eq!(totals, PaymentTotals { paid: 4, unpaid: 4 });
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_partial_update_leaves_other_fields(pool: sqlx::SqlitePool) {
        let update = PlayerUpdate {
            remark: Some("seeded".to_string()),
            ..Default::default()
        };
        let rows = update_player(&pool, 1, &update).await.expect("update ok");
        assert_eq!(rows, 1);
        let player = get_player(&pool, 1)
            .await
            .expect("query ok")
            .expect("player found");
        assert_eq!(player.remark.as_deref(), Some("seeded"));
        assert_eq!(player.name, "Anil Sharma");
        assert!(player.payment_status);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("create_players")))]
    async fn test_delete_player(pool: sqlx::SqlitePool) {
        assert_eq!(delete_player(&pool, 2).await.expect("delete ok"), 1);
        assert!(get_player(&pool, 2).await.expect("query ok").is_none());
        assert_eq!(delete_player(&pool, 2).await.expect("delete ok"), 0);
    }

    #[test]
    fn sort_spec_parse_falls_back_on_garbage() {
        assert_eq!(SortSpec::parse(None), SortSpec::default());
        assert_eq!(SortSpec::parse(Some("wins:desc")), SortSpec::default());
        let by_name = SortSpec::parse(Some("name:asc"));
        assert_eq!(by_name.field, SortField::Name);
        assert!(!by_name.descending);
        let by_age = SortSpec::parse(Some("age:desc"));
        assert_eq!(by_age.field, SortField::Age);
        assert!(by_age.descending);
    }
}
