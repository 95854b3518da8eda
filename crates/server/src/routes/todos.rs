use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use common::types::Health;
use models::todo::NewTodo;
use serde::Serialize;
use service::db::todo_service;
use tracing::{info, warn};

use crate::errors::PageError;
use crate::html;
use crate::routes::TodoState;

const LIST_PATH: &str = "/all";

#[derive(Debug, Serialize)]
pub struct TodoHealth {
    #[serde(flatten)]
    pub health: Health,
    pub todo_count: u64,
}

pub fn router() -> Router<TodoState> {
    Router::new()
        .route("/", get(list))
        .route("/all", get(list))
        .route("/add", get(add_form).post(add))
        .route("/add-sample", get(add_sample))
        .route("/complete/:id", get(complete).post(complete))
        .route("/delete/:id", get(remove).post(remove))
        .route("/health", get(health))
}

pub async fn list(State(state): State<TodoState>) -> Result<Html<String>, PageError> {
    let todos = todo_service::list_todos(&state.db).await?;
    Ok(Html(html::index_page(&todos, todo_service::today())?))
}

pub async fn add_form() -> Result<Html<String>, PageError> {
    Ok(Html(html::add_page(None, &NewTodo::default(), todo_service::today())?))
}

/// Create and redirect to the list; a blank title re-renders the form with 422.
pub async fn add(State(state): State<TodoState>, form: Result<Form<NewTodo>, FormRejection>) -> Result<Response, PageError> {
    let Form(input) = form?;
    let today = todo_service::today();
    match todo_service::create_todo(&state.db, input.clone(), today).await {
        Ok(created) => {
            info!(id = created.id, day = %created.day, "created todo");
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) if e.is_validation() => {
            let page = html::add_page(Some(&e.to_string()), &input, today)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Flip `completed`; an unknown or malformed id just redirects.
pub async fn complete(State(state): State<TodoState>, id: Result<Path<i32>, PathRejection>) -> Result<Redirect, PageError> {
    let Ok(Path(id)) = id else {
        return Ok(Redirect::to(LIST_PATH));
    };
    match todo_service::toggle_completed(&state.db, id).await? {
        Some(t) => info!(id, completed = t.completed, "toggled todo"),
        None => warn!(id, "toggle on missing todo ignored"),
    }
    Ok(Redirect::to(LIST_PATH))
}

/// Remove; an unknown or malformed id just redirects.
pub async fn remove(State(state): State<TodoState>, id: Result<Path<i32>, PathRejection>) -> Result<Redirect, PageError> {
    let Ok(Path(id)) = id else {
        return Ok(Redirect::to(LIST_PATH));
    };
    if todo_service::delete_todo(&state.db, id).await? {
        info!(id, "deleted todo");
    } else {
        warn!(id, "delete on missing todo ignored");
    }
    Ok(Redirect::to(LIST_PATH))
}

pub async fn add_sample(State(state): State<TodoState>) -> Result<Html<String>, PageError> {
    let msg = if todo_service::add_sample_todos(&state.db).await? {
        "Sample to-dos added!"
    } else {
        "To-dos already exist!"
    };
    Ok(Html(html::message_page(msg)?))
}

pub async fn health(State(state): State<TodoState>) -> Json<TodoHealth> {
    if !models::db::ping(&state.db).await {
        warn!("health: database ping failed");
        return Json(TodoHealth { health: Health::degraded(), todo_count: 0 });
    }
    match todo_service::count_todos(&state.db).await {
        Ok(todo_count) => Json(TodoHealth { health: Health::ok(), todo_count }),
        Err(e) => {
            warn!(error = %e, "health: todo count failed");
            Json(TodoHealth { health: Health::degraded(), todo_count: 0 })
        }
    }
}
