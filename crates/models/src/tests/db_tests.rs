use anyhow::Result;
use chrono::NaiveDate;
use configs::DatabaseConfig;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::{cafe, db, todo};

async fn setup_test_db(dir: &tempfile::TempDir) -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("models.db").display()),
        ..Default::default()
    };
    db::connect_and_migrate(&cfg).await
}

#[tokio::test]
async fn cafe_insert_assigns_increasing_ids() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db = setup_test_db(&dir).await?;

    let mut ids = vec![];
    for name in ["One", "Two", "Three"] {
        let am = cafe::NewCafe {
            name: name.into(),
            map_url: "https://m".into(),
            img_url: "https://i".into(),
            location: "Here".into(),
            seats: "1".into(),
            has_toilet: false,
            has_wifi: false,
            has_sockets: false,
            can_take_calls: false,
            coffee_price: None,
        }
        .into_active_model();
        ids.push(am.insert(&db).await?.id);
    }
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(cafe::Entity::find().count(&db).await?, 3);
    assert!(db::ping(&db).await);
    Ok(())
}

#[tokio::test]
async fn todo_date_and_flag_survive_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db = setup_test_db(&dir).await?;

    let today = NaiveDate::from_ymd_opt(2025, 10, 23).unwrap();
    let created = todo::NewTodo {
        title: "Learn Tailwind CSS".into(),
        description: Some("utility-first".into()),
        day: Some("2025-10-25".into()),
    }
    .into_active_model(today)?
    .insert(&db)
    .await?;

    let found = todo::Entity::find_by_id(created.id).one(&db).await?.unwrap();
    assert_eq!(found.day, NaiveDate::from_ymd_opt(2025, 10, 25).unwrap());
    assert!(!found.completed);
    assert_eq!(found.description.as_deref(), Some("utility-first"));
    Ok(())
}
