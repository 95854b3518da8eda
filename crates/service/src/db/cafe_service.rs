use models::cafe::{self, CafePatch, NewCafe};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::debug;

use crate::errors::ServiceError;

/// Search criteria. Every present field must match; `location` is a case-insensitive
/// substring test (an empty string matches every row), the flags are exact.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct CafeFilter {
    #[serde(default, alias = "loc")]
    pub location: Option<String>,
    pub has_wifi: Option<bool>,
    pub has_sockets: Option<bool>,
    pub has_toilet: Option<bool>,
    pub can_take_calls: Option<bool>,
}

impl CafeFilter {
    pub fn by_location(loc: &str) -> Self {
        Self { location: Some(loc.to_string()), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.has_wifi.is_none()
            && self.has_sockets.is_none()
            && self.has_toilet.is_none()
            && self.can_take_calls.is_none()
    }
}

/// Escape LIKE metacharacters so user input only ever matches literally.
fn like_contains(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    for c in needle.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

/// All cafes in insertion order.
pub async fn list_cafes(db: &DatabaseConnection) -> Result<Vec<cafe::Model>, ServiceError> {
    cafe::Entity::find()
        .order_by_asc(cafe::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::from_db)
}

/// Cafes matching every criterion of `filter`, in insertion order.
pub async fn search_cafes(db: &DatabaseConnection, filter: &CafeFilter) -> Result<Vec<cafe::Model>, ServiceError> {
    let mut q = cafe::Entity::find();
    if let Some(loc) = filter.location.as_deref() {
        q = q.filter(Expr::expr(Func::lower(Expr::col(cafe::Column::Location))).like(like_contains(loc)));
    }
    if let Some(v) = filter.has_wifi { q = q.filter(cafe::Column::HasWifi.eq(v)); }
    if let Some(v) = filter.has_sockets { q = q.filter(cafe::Column::HasSockets.eq(v)); }
    if let Some(v) = filter.has_toilet { q = q.filter(cafe::Column::HasToilet.eq(v)); }
    if let Some(v) = filter.can_take_calls { q = q.filter(cafe::Column::CanTakeCalls.eq(v)); }
    q.order_by_asc(cafe::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::from_db)
}

pub async fn count_cafes(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    cafe::Entity::find().count(db).await.map_err(ServiceError::from_db)
}

/// The cafe at zero-based `offset` in insertion order.
pub async fn nth_cafe(db: &DatabaseConnection, offset: u64) -> Result<Option<cafe::Model>, ServiceError> {
    cafe::Entity::find()
        .order_by_asc(cafe::Column::Id)
        .offset(offset)
        .limit(1)
        .one(db)
        .await
        .map_err(ServiceError::from_db)
}

/// Get cafe by id.
pub async fn get_cafe(db: &DatabaseConnection, id: i32) -> Result<Option<cafe::Model>, ServiceError> {
    cafe::Entity::find_by_id(id).one(db).await.map_err(ServiceError::from_db)
}

/// Insert a cafe after checking the name is free. The check and the insert share a
/// transaction; the unique index catches anything that slips between them.
pub async fn create_cafe(db: &DatabaseConnection, input: NewCafe) -> Result<cafe::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await.map_err(ServiceError::from_db)?;

    let name = input.name.trim().to_string();
    let taken = cafe::Entity::find()
        .filter(cafe::Column::Name.eq(name.clone()))
        .one(&txn)
        .await
        .map_err(ServiceError::from_db)?;
    if taken.is_some() {
        return Err(ServiceError::Conflict(format!("a cafe named '{}' already exists", name)));
    }

    let created = input.into_active_model().insert(&txn).await.map_err(ServiceError::from_db)?;
    txn.commit().await.map_err(ServiceError::from_db)?;
    debug!(id = created.id, "cafe row inserted");
    Ok(created)
}

/// Apply a sparse update. Unknown id is `NotFound`; renaming onto another cafe's name is
/// `Conflict`.
pub async fn update_cafe(db: &DatabaseConnection, id: i32, patch: CafePatch) -> Result<cafe::Model, ServiceError> {
    patch.validate()?;
    let txn = db.begin().await.map_err(ServiceError::from_db)?;

    let existing = cafe::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(ServiceError::from_db)?
        .ok_or_else(|| ServiceError::not_found("cafe"))?;
    if patch.is_empty() {
        return Ok(existing);
    }

    if let Some(name) = patch.name.as_deref().map(str::trim).filter(|n| *n != existing.name) {
        let clash = cafe::Entity::find()
            .filter(cafe::Column::Name.eq(name))
            .filter(cafe::Column::Id.ne(id))
            .one(&txn)
            .await
            .map_err(ServiceError::from_db)?;
        if clash.is_some() {
            return Err(ServiceError::Conflict(format!("a cafe named '{}' already exists", name)));
        }
    }

    let mut am: cafe::ActiveModel = existing.into();
    patch.apply(&mut am);
    let updated = am.update(&txn).await.map_err(ServiceError::from_db)?;
    txn.commit().await.map_err(ServiceError::from_db)?;
    Ok(updated)
}

/// Hard delete; returns whether a row existed.
pub async fn delete_cafe(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = cafe::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::from_db)?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn sample(name: &str, location: &str) -> NewCafe {
        NewCafe {
            name: name.into(),
            map_url: "https://maps.example.com".into(),
            img_url: "https://img.example.com/x.jpg".into(),
            location: location.into(),
            seats: "10-20".into(),
            has_toilet: true,
            has_wifi: false,
            has_sockets: true,
            can_take_calls: false,
            coffee_price: Some("£2.50".into()),
        }
    }

    #[tokio::test]
    async fn list_returns_insertion_order() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        assert!(list_cafes(&db).await?.is_empty());

        for (n, l) in [("C", "x"), ("A", "y"), ("B", "z")] {
            create_cafe(&db, sample(n, l)).await?;
        }
        let names: Vec<_> = list_cafes(&db).await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict_and_leaves_store_unchanged() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        create_cafe(&db, sample("Blue Bottle", "Downtown")).await?;

        let err = create_cafe(&db, sample("Blue Bottle", "Uptown")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(count_cafes(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        create_cafe(&db, sample("One", "Downtown")).await?;
        create_cafe(&db, sample("Two", "Uptown")).await?;
        create_cafe(&db, sample("Three", "Riverside")).await?;

        let hits = search_cafes(&db, &CafeFilter::by_location("DOWN")).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "One");

        let towns = search_cafes(&db, &CafeFilter::by_location("town")).await?;
        assert_eq!(towns.len(), 2);

        assert!(search_cafes(&db, &CafeFilter::by_location("harbour")).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        create_cafe(&db, sample("One", "Downtown")).await?;
        assert!(search_cafes(&db, &CafeFilter::by_location("%")).await?.is_empty());
        assert!(search_cafes(&db, &CafeFilter::by_location("d_wn")).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn empty_location_matches_every_row() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        create_cafe(&db, sample("One", "Downtown")).await?;
        create_cafe(&db, sample("Two", "Uptown")).await?;
        let filter = CafeFilter::by_location("");
        assert!(!filter.is_empty());
        assert_eq!(search_cafes(&db, &filter).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn search_combines_amenity_flags() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        let mut wifi = sample("Wifi", "Downtown");
        wifi.has_wifi = true;
        create_cafe(&db, wifi).await?;
        create_cafe(&db, sample("NoWifi", "Downtown")).await?;

        let filter = CafeFilter { location: Some("down".into()), has_wifi: Some(true), ..Default::default() };
        let hits = search_cafes(&db, &filter).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Wifi");
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_touches_only_supplied_fields() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        let before = create_cafe(&db, sample("Blue Bottle", "Downtown")).await?;

        let patch = CafePatch { coffee_price: Some(Some("£3".into())), ..Default::default() };
        let after = update_cafe(&db, before.id, patch).await?;

        assert_eq!(after.coffee_price.as_deref(), Some("£3"));
        assert_eq!(cafe::Model { coffee_price: before.coffee_price.clone(), ..after.clone() }, before);
        assert_eq!(get_cafe(&db, before.id).await?, Some(after));
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        let patch = CafePatch { seats: Some("5".into()), ..Default::default() };
        assert!(matches!(update_cafe(&db, 42, patch).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn rename_onto_existing_name_is_conflict() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        create_cafe(&db, sample("A", "x")).await?;
        let b = create_cafe(&db, sample("B", "y")).await?;
        let patch = CafePatch { name: Some("A".into()), ..Default::default() };
        assert!(matches!(update_cafe(&db, b.id, patch).await, Err(ServiceError::Conflict(_))));
        assert_eq!(get_cafe(&db, b.id).await?.map(|c| c.name), Some("B".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        let c = create_cafe(&db, sample("Gone", "x")).await?;
        assert!(delete_cafe(&db, c.id).await?);
        assert!(!delete_cafe(&db, c.id).await?);
        assert_eq!(count_cafes(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        let first = create_cafe(&db, sample("First", "x")).await?;
        let second = create_cafe(&db, sample("Second", "x")).await?;
        delete_cafe(&db, second.id).await?;
        let third = create_cafe(&db, sample("Third", "x")).await?;
        assert!(third.id > second.id);
        assert!(second.id > first.id);
        Ok(())
    }

    #[tokio::test]
    async fn nth_walks_insertion_order() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        create_cafe(&db, sample("A", "x")).await?;
        create_cafe(&db, sample("B", "x")).await?;
        assert_eq!(nth_cafe(&db, 1).await?.map(|c| c.name), Some("B".to_string()));
        assert_eq!(nth_cafe(&db, 2).await?, None);
        Ok(())
    }
}
