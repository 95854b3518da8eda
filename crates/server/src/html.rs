//! Server-rendered pages for the to-do app.

use axum::http::StatusCode;
use chrono::NaiveDate;
use models::todo::{self, NewTodo};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tera::{Context, Tera};

static TEMPLATES: OnceCell<Tera> = OnceCell::new();

/// Compiled page templates. `.html` names get Tera's default autoescaping.
fn templates() -> tera::Result<&'static Tera> {
    TEMPLATES.get_or_try_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("add.html", include_str!("../templates/add.html")),
            ("message.html", include_str!("../templates/message.html")),
            ("error.html", include_str!("../templates/error.html")),
        ])?;
        Ok(tera)
    })
}

fn render(name: &str, ctx: &Context) -> tera::Result<String> {
    templates()?.render(name, ctx)
}

#[derive(Serialize)]
struct TodoView<'a> {
    id: i32,
    title: &'a str,
    description: Option<&'a str>,
    day: String,
    completed: bool,
    classes: &'static str,
}

impl<'a> TodoView<'a> {
    fn new(t: &'a todo::Model, today: NaiveDate) -> Self {
        let classes = if t.completed {
            "todo completed"
        } else if t.day < today {
            "todo overdue"
        } else {
            "todo"
        };
        Self {
            id: t.id,
            title: &t.title,
            description: t.description.as_deref(),
            day: t.day.format("%Y-%m-%d").to_string(),
            completed: t.completed,
            classes,
        }
    }
}

/// The list page. Overdue open items get an `overdue` class.
pub fn index_page(todos: &[todo::Model], today: NaiveDate) -> tera::Result<String> {
    let views: Vec<_> = todos.iter().map(|t| TodoView::new(t, today)).collect();
    let mut ctx = Context::new();
    ctx.insert("todos", &views);
    ctx.insert("done", &todos.iter().filter(|t| t.completed).count());
    render("index.html", &ctx)
}

/// The add form, optionally re-rendered with an error and the user's previous input.
pub fn add_page(error: Option<&str>, input: &NewTodo, today: NaiveDate) -> tera::Result<String> {
    let day = input
        .day
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
    let mut ctx = Context::new();
    ctx.insert("error", &error);
    ctx.insert("title", &input.title);
    ctx.insert("description", input.description.as_deref().unwrap_or_default());
    ctx.insert("day", &day);
    render("add.html", &ctx)
}

pub fn message_page(message: &str) -> tera::Result<String> {
    let mut ctx = Context::new();
    ctx.insert("message", message);
    render("message.html", &ctx)
}

pub fn error_page(status: StatusCode, message: &str) -> tera::Result<String> {
    let mut ctx = Context::new();
    ctx.insert("status", &status.as_u16());
    ctx.insert("message", message);
    render("error.html", &ctx)
}
