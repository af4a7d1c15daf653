//! Request handlers
//!
//! Pure mappings from validated requests to responses; no handler keeps
//! state across requests. Domain failures are translated into
//! [`HttpError`]s and rendered by the shared error page.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use chrono::{NaiveDateTime, Timelike, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::MutexGuard;
use tera::Context;

use crate::config::FormLimits;
use crate::store::record::{self, Contact, Record};
use crate::store::Store;
use crate::templates;

use super::error::HttpError;
use super::SharedState;

/// GET / - first page of posts.
pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, HttpError> {
    render_post_page(&state, 1)
}

/// GET /page/:page - a later page of posts.
pub async fn page(
    State(state): State<SharedState>,
    Path(page): Path<String>,
) -> Result<Html<String>, HttpError> {
    let page: usize = page
        .parse()
        .map_err(|_| HttpError::not_found("no such page"))?;

    let total_pages = state.blog.repository().total_pages()?;
    if page < 1 || page > total_pages {
        return Err(HttpError::not_found("no such page"));
    }

    render_post_page(&state, page)
}

/// GET /post/:slug - a single post with its comments.
pub async fn blog_post(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, HttpError> {
    let post = state
        .blog
        .repository()
        .find_by_slug(&slug)?
        .ok_or_else(|| HttpError::not_found("no such post"))?;

    let comments = {
        let store = lock_store(&state)?;
        record::comments_for_post(&store, &post.slug)
            .map_err(|e| HttpError::internal(e.to_string()))?
    };

    let mut context = base_context(&state);
    context.insert("post", &post);
    context.insert("comments", &comments);
    render("post.html", &context)
}

/// GET /contact - the contact form.
pub async fn contact(State(state): State<SharedState>) -> Result<Html<String>, HttpError> {
    render("contact.html", &base_context(&state))
}

/// GET /about - static about page.
pub async fn about(State(state): State<SharedState>) -> Result<Html<String>, HttpError> {
    render("about.html", &base_context(&state))
}

#[derive(Debug, Deserialize)]
struct ContactForm {
    name: String,
    email: String,
    message: String,
}

/// POST /contact - persist a contact form submission.
pub async fn submit_contact(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let form: ContactForm = parse_form(&body)?;
    check_limits(
        &state.blog.config.limits,
        &form.name,
        &form.email,
        &form.message,
    )?;

    let contact = Contact {
        email: form.email,
        name: form.name,
        message: form.message,
        date: utc_now(),
    };
    let stored = record::to_record(&Record::Contact(contact))
        .map_err(|e| HttpError::internal(e.to_string()))?;
    lock_store(&state)?.insert(stored)?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct CommentForm {
    post_slug: String,
    name: String,
    email: String,
    message: String,
}

/// POST /comment - persist a comment on an existing post.
///
/// The slug must name a currently loaded post. A post with comments
/// disabled still accepts submissions here; only the template hides the
/// form (pending a product decision, matching the observed behavior).
pub async fn submit_comment(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let form: CommentForm = parse_form(&body)?;
    check_limits(
        &state.blog.config.limits,
        &form.name,
        &form.email,
        &form.message,
    )?;

    if state.blog.repository().find_by_slug(&form.post_slug)?.is_none() {
        return Err(HttpError::bad_request("unknown post slug"));
    }

    let comment = record::Comment {
        author: form.name,
        date: utc_now(),
        content: form.message,
        email: form.email,
        post_slug: form.post_slug,
    };
    let stored = record::to_record(&Record::Comment(comment))
        .map_err(|e| HttpError::internal(e.to_string()))?;
    lock_store(&state)?.insert(stored)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unmatched routes.
pub async fn not_found() -> HttpError {
    HttpError::not_found("page not found")
}

fn render_post_page(state: &SharedState, page: usize) -> Result<Html<String>, HttpError> {
    let repo = state.blog.repository();
    let total_pages = repo.total_pages()?;
    let posts = repo.list_posts_page(page)?;

    let mut context = base_context(state);
    context.insert("posts", &posts);
    context.insert("page", &page);
    context.insert("total_pages", &total_pages);
    render("index.html", &context)
}

fn base_context(state: &SharedState) -> Context {
    let mut context = Context::new();
    context.insert("site", &state.blog.config);
    context
}

fn render(template: &str, context: &Context) -> Result<Html<String>, HttpError> {
    templates::renderer()
        .render(template, context)
        .map(Html)
        .map_err(HttpError::from)
}

fn lock_store(state: &SharedState) -> Result<MutexGuard<'_, Store>, HttpError> {
    state
        .store
        .lock()
        .map_err(|_| HttpError::internal("store lock poisoned"))
}

fn parse_form<T: DeserializeOwned>(body: &Bytes) -> Result<T, HttpError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| HttpError::bad_request("request body is not valid JSON"))?;
    serde_json::from_value(value).map_err(|_| HttpError::bad_request("missing or invalid fields"))
}

fn check_limits(
    limits: &FormLimits,
    name: &str,
    email: &str,
    message: &str,
) -> Result<(), HttpError> {
    if name.chars().count() > limits.name {
        return Err(HttpError::bad_request("name is too long"));
    }
    if email.chars().count() > limits.email {
        return Err(HttpError::bad_request("email is too long"));
    }
    if message.chars().count() > limits.message {
        return Err(HttpError::bad_request("message is too long"));
    }
    Ok(())
}

/// Current UTC time at second precision, matching the stored date format.
fn utc_now() -> NaiveDateTime {
    Utc::now()
        .naive_utc()
        .with_nanosecond(0)
        .expect("zero nanoseconds is always valid")
}
