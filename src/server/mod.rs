//! HTTP server - serves composed pages, the contact endpoint and static assets

use anyhow::Result;
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{ContentStore, MarkdownRenderer};
use crate::generator::{build_sitemap, ComposedPage, PageComposer};
use crate::helpers::url_for;
use crate::relay::{ContactRelay, ContactSubmission, RelayError};
use crate::templates::TemplateRenderer;
use crate::Folio;

/// Shared, immutable server state
pub struct AppState {
    pub config: SiteConfig,
    pub store: ContentStore,
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub markdown: MarkdownRenderer,
    pub templates: TemplateRenderer,
    pub relay: ContactRelay,
}

impl AppState {
    pub fn new(folio: &Folio, relay: ContactRelay) -> Result<Self> {
        Ok(Self {
            config: folio.config.clone(),
            store: folio.store.clone(),
            content_dir: folio.content_dir.clone(),
            static_dir: folio.static_dir.clone(),
            markdown: MarkdownRenderer::from_config(&folio.config.highlight),
            templates: TemplateRenderer::new(&folio.config)?,
            relay,
        })
    }

    fn composer(&self) -> PageComposer<'_> {
        PageComposer::new(&self.config, &self.store, &self.content_dir, &self.markdown)
    }

    /// Render a page; the not-found page is served with a 404 status
    fn render(&self, page: &ComposedPage) -> Response {
        let status = if page.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::OK
        };

        match self.templates.render_page(&self.config, page) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render {}: {:#}", page.template(), e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(blog_list_handler))
        .route("/blog/:slug", get(blog_post_handler))
        .route("/projects", get(projects_handler))
        .route("/projects/:id", get(project_handler))
        .route("/skills", get(skills_handler))
        .route("/contact", get(contact_page_handler))
        .route("/cv", get(cv_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/api/contact", post(contact_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, relay: ContactRelay) -> Result<()> {
    let state = Arc::new(AppState::new(folio, relay)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Response {
    state.render(&state.composer().home())
}

async fn blog_list_handler(State(state): State<Arc<AppState>>) -> Response {
    state.render(&state.composer().blog_list())
}

async fn blog_post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let page = state.composer().blog_post_async(&slug).await;
    state.render(&page)
}

async fn projects_handler(State(state): State<Arc<AppState>>) -> Response {
    state.render(&state.composer().projects())
}

async fn project_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.composer().project(&id) {
        Ok(page) => state.render(&page),
        Err(e) => {
            tracing::debug!("Redirecting to project list: {}", e);
            Redirect::to(&url_for(&state.config, "/projects")).into_response()
        }
    }
}

async fn skills_handler(State(state): State<Arc<AppState>>) -> Response {
    state.render(&state.composer().skills())
}

async fn contact_page_handler(State(state): State<Arc<AppState>>) -> Response {
    state.render(&state.composer().contact())
}

async fn cv_handler(State(state): State<Arc<AppState>>) -> Response {
    state.render(&state.composer().cv())
}

async fn sitemap_handler(State(state): State<Arc<AppState>>) -> Response {
    let today = chrono::Local::now().date_naive();
    let xml = build_sitemap(&state.config, &state.store, &state.content_dir, today);
    ([(header::CONTENT_TYPE, "application/xml")], xml).into_response()
}

/// Relay a contact submission and translate the outcome into JSON
async fn contact_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Malformed contact submission: {}", rejection);
            return (
                rejection.status(),
                Json(json!({ "message": rejection.body_text() })),
            )
                .into_response();
        }
    };

    match state.relay.submit(&submission).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Form submitted successfully!" })),
        )
            .into_response(),
        Err(e) => {
            let message = if matches!(e, RelayError::Rejected { .. }) {
                "Form submission failed."
            } else {
                "An error occurred."
            };
            (e.status(), Json(json!({ "message": message, "kind": e.kind() }))).into_response()
        }
    }
}

/// Serve files from the static directory, or the 404 page
async fn fallback_handler(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => state.render(&state.composer().not_found()),
        Err(e) => {
            tracing::error!("Static file error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
