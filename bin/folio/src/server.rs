//! Development server rendering pages from an in-memory snapshot

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    extract::{Path as UrlPath, State},
    handler::Handler,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use folio_core::{ContentKind, SiteContent};
use folio_generator::{HtmlError, HtmlGenerator};
use tower_http::services::ServeDir;

/// Shared, read-only server state.
#[derive(Debug)]
pub struct AppState {
    /// Content snapshot loaded at startup.
    pub site: SiteContent,
    /// Page renderer.
    pub html: HtmlGenerator,
}

impl AppState {
    /// Create a new server state.
    pub fn new(site: SiteContent, html: HtmlGenerator) -> Self {
        Self { site, html }
    }
}

/// Errors a handler can hit while rendering.
#[derive(Debug)]
pub enum ServerError {
    /// A page failed to render.
    Render(HtmlError),
}

impl From<HtmlError> for ServerError {
    fn from(err: HtmlError) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Render(err) => {
                tracing::error!(error = %err, "failed to render page");
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
            }
        }
    }
}

type HandlerResult = Result<Response, ServerError>;

/// Create the development server router.
///
/// Pages answer with or without a trailing slash, matching the directory
/// index URLs of a static build. Unmatched paths are looked up in
/// `static_dir`, then fall through to the site-wide not-found page.
pub fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let static_files =
        ServeDir::new(static_dir).not_found_service(not_found.with_state(state.clone()));

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/books") }))
        .route("/books", get(book_list))
        .route("/books/", get(book_list))
        .route("/books/{slug}", get(book_detail))
        .route("/books/{slug}/", get(book_detail))
        .route("/courses", get(course_list))
        .route("/courses/", get(course_list))
        .route("/courses/{slug}", get(course_detail))
        .route("/courses/{slug}/", get(course_detail))
        .route("/blog", get(|| async { Redirect::permanent("/books") }))
        .route("/blog/", get(|| async { Redirect::permanent("/books") }))
        .route("/blog/{slug}", get(legacy_book))
        .route("/blog/{slug}/", get(legacy_book))
        .fallback_service(static_files)
        .with_state(state)
}

async fn book_list(State(state): State<Arc<AppState>>) -> HandlerResult {
    Ok(Html(state.html.generate_book_list(&state.site)?).into_response())
}

async fn book_detail(
    State(state): State<Arc<AppState>>,
    UrlPath(slug): UrlPath<String>,
) -> HandlerResult {
    match state.html.render_book(&state.site, &slug)? {
        Some(page) => Ok(Html(page).into_response()),
        None => not_found_page(&state, ContentKind::Book, &slug),
    }
}

async fn course_list(State(state): State<Arc<AppState>>) -> HandlerResult {
    Ok(Html(state.html.generate_course_list(&state.site)?).into_response())
}

async fn course_detail(
    State(state): State<Arc<AppState>>,
    UrlPath(slug): UrlPath<String>,
) -> HandlerResult {
    match state.html.render_course(&state.site, &slug)? {
        Some(page) => Ok(Html(page).into_response()),
        None => not_found_page(&state, ContentKind::Course, &slug),
    }
}

/// Old `/blog/{slug}` URLs now live under `/books`.
async fn legacy_book(
    State(state): State<Arc<AppState>>,
    UrlPath(slug): UrlPath<String>,
) -> HandlerResult {
    match state.site.books.get_by_slug(&slug) {
        Some(book) => Ok(Redirect::permanent(&book.url_path()).into_response()),
        None => not_found_page(&state, ContentKind::Book, &slug),
    }
}

async fn not_found(State(state): State<Arc<AppState>>) -> HandlerResult {
    let page = state.html.generate_not_found(None)?;
    Ok((StatusCode::NOT_FOUND, Html(page)).into_response())
}

fn not_found_page(state: &AppState, kind: ContentKind, slug: &str) -> HandlerResult {
    tracing::debug!(slug, kind = kind.label(), "no such item");
    let page = state.html.generate_not_found(Some(kind))?;
    Ok((StatusCode::NOT_FOUND, Html(page)).into_response())
}
