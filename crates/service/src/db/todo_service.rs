use chrono::{Local, NaiveDate};
use models::todo::{self, NewTodo};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::errors::ServiceError;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// All to-dos in insertion order.
pub async fn list_todos(db: &DatabaseConnection) -> Result<Vec<todo::Model>, ServiceError> {
    todo::Entity::find()
        .order_by_asc(todo::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::from_db)
}

pub async fn count_todos(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    todo::Entity::find().count(db).await.map_err(ServiceError::from_db)
}

/// Create a to-do. A missing or malformed `day` becomes `today`.
pub async fn create_todo(db: &DatabaseConnection, input: NewTodo, today: NaiveDate) -> Result<todo::Model, ServiceError> {
    let am = input.into_active_model(today)?;
    am.insert(db).await.map_err(ServiceError::from_db)
}

/// Flip `completed`. Unknown ids are a silent no-op (`Ok(None)`).
pub async fn toggle_completed(db: &DatabaseConnection, id: i32) -> Result<Option<todo::Model>, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::from_db)?;
    let Some(found) = todo::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::from_db)? else {
        return Ok(None);
    };
    let flipped = !found.completed;
    let mut am: todo::ActiveModel = found.into();
    am.completed = Set(flipped);
    let updated = am.update(&txn).await.map_err(ServiceError::from_db)?;
    txn.commit().await.map_err(ServiceError::from_db)?;
    Ok(Some(updated))
}

/// Hard delete; unknown ids are a silent no-op. Returns whether a row existed.
pub async fn delete_todo(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = todo::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::from_db)?;
    Ok(res.rows_affected > 0)
}

/// Insert the three demo to-dos if the table is empty. Returns whether anything was added.
pub async fn add_sample_todos(db: &DatabaseConnection) -> Result<bool, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::from_db)?;
    let existing = todo::Entity::find().one(&txn).await.map_err(ServiceError::from_db)?;
    if existing.is_some() {
        return Ok(false);
    }

    let samples = [
        ("Complete Rust Project", "Finish the to-do application with a clean frontend", (2025, 10, 25)),
        ("Learn Tailwind CSS", "Master utility-first CSS framework for modern web design", (2025, 10, 23)),
        ("Deploy Application", "Deploy the to-do app to a cloud platform", (2025, 10, 30)),
    ];
    let rows = samples
        .into_iter()
        .filter_map(|(title, description, (y, m, d))| {
            Some(todo::ActiveModel {
                title: Set(title.to_string()),
                description: Set(Some(description.to_string())),
                day: Set(NaiveDate::from_ymd_opt(y, m, d)?),
                completed: Set(false),
                ..Default::default()
            })
        })
        .collect::<Vec<_>>();
    let n = rows.len();
    todo::Entity::insert_many(rows).exec(&txn).await.map_err(ServiceError::from_db)?;
    txn.commit().await.map_err(ServiceError::from_db)?;
    info!(count = n, "sample todos added");
    Ok(true)
}
