use bigdecimal::BigDecimal;
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub icon: String,
    pub services_count: i64,
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub base_price: BigDecimal,
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ItemProvider {
    pub provider_id: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub base_price: BigDecimal,
    pub rating: BigDecimal,
    pub is_available: bool,
}

pub async fn find_categories<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        "
        SELECT
            service_categories.id,
            service_categories.name,
            service_categories.icon,
            COUNT(service_items.id) AS services_count
        FROM service_categories
        LEFT JOIN service_items ON service_items.category_id = service_categories.id
        GROUP BY service_categories.id
        ORDER BY service_categories.id
        ",
    )
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching categories: {}", err);
        Error::UnexpectedError
    })
}

pub async fn category_exists<'e, E: PgExecutor<'e>>(e: E, id: i32) -> Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM service_categories WHERE id = $1)")
        .bind(id)
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while checking category {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_items<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<ServiceItem>> {
    sqlx::query_as::<_, ServiceItem>("SELECT * FROM service_items ORDER BY category_id, id")
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching service items: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_items_by_category<'e, E: PgExecutor<'e>>(
    e: E,
    category_id: i32,
) -> Result<Vec<ServiceItem>> {
    sqlx::query_as::<_, ServiceItem>(
        "SELECT * FROM service_items WHERE category_id = $1 ORDER BY name",
    )
    .bind(category_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching items of category {}: {}",
            category_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_item_by_id<'e, E: PgExecutor<'e>>(e: E, id: i32) -> Result<Option<ServiceItem>> {
    sqlx::query_as::<_, ServiceItem>("SELECT * FROM service_items WHERE id = $1")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching service item {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_category_name<'e, E: PgExecutor<'e>>(e: E, id: i32) -> Result<Option<String>> {
    sqlx::query_scalar::<_, String>("SELECT name FROM service_categories WHERE id = $1")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching category {}: {}", id, err);
            Error::UnexpectedError
        })
}

/// Matches `query` literally anywhere in a name; LIKE wildcards in it carry no meaning.
fn contains_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub async fn search_items<'e, E: PgExecutor<'e>>(e: E, query: String) -> Result<Vec<ServiceItem>> {
    sqlx::query_as::<_, ServiceItem>(
        r"
        SELECT * FROM service_items
        WHERE name ILIKE $1 ESCAPE '\'
        ORDER BY name
        LIMIT 50
        ",
    )
    .bind(contains_pattern(&query))
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while searching service items: {}", err);
        Error::UnexpectedError
    })
}

/// Active accounts actively offering the item, best rated first.
pub async fn find_item_providers<'e, E: PgExecutor<'e>>(
    e: E,
    item_id: i32,
) -> Result<Vec<ItemProvider>> {
    sqlx::query_as::<_, ItemProvider>(
        "
        SELECT
            users.id AS provider_id,
            users.full_name AS name,
            provider_profiles.photo_url,
            provider_services.base_price,
            users.rating,
            provider_profiles.is_available
        FROM provider_services
        INNER JOIN provider_profiles
            ON provider_profiles.user_id = provider_services.provider_user_id
        INNER JOIN users ON users.id = provider_profiles.user_id
        WHERE provider_services.service_item_id = $1
            AND provider_services.is_active = true
            AND users.status = 'active'
        ORDER BY users.rating DESC, users.full_name
        ",
    )
    .bind(item_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching providers of item {}: {}",
            item_id,
            err
        );
        Error::UnexpectedError
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(contains_pattern("fuite"), "%fuite%");
        assert_eq!(contains_pattern("100%"), r"%100\%%");
        assert_eq!(contains_pattern("a_b"), r"%a\_b%");
        assert_eq!(contains_pattern(r"c:\"), r"%c:\\%");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn wildcards_in_a_search_match_nothing(pool: sqlx::PgPool) {
        assert!(search_items(&pool, "%".to_string()).await.unwrap().is_empty());
        assert!(search_items(&pool, "_".to_string()).await.unwrap().is_empty());

        let found = search_items(&pool, "débouch".to_string()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Débouchage");
    }
}
