//! Live HTTP server.
//!
//! Serves the same logical page set as the prerenderer, but on demand: every
//! GET re-renders its template with freshly computed data, including a fresh
//! catalog load per category-page request. No caching — editing a workbook is
//! visible on the next refresh.
//!
//! The three client assets are embedded at compile time from `public/`, so
//! the live server and the static build serve identical bytes.
//!
//! POST `/contact` relays the submission by email: one attempt, success
//! renders the confirmation state, failure logs the cause and renders a
//! generic retry-later message. A mail failure never crashes the process.

use crate::catalog;
use crate::config::SmtpConfig;
use crate::mailer::{self, ContactSubmission};
use crate::templates::{self, ContactState};
use axum::Router;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use maud::Markup;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared, read-only request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub smtp: SmtpConfig,
}

const STYLES_CSS: &str = include_str!("../public/styles.css");
const APP_JS: &str = include_str!("../public/app.js");
const LOGO_SVG: &str = include_str!("../public/logo.svg");

/// Build the router over the full page set plus assets and the form handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/products", get(products_index))
        .route("/products/:slug", get(category_page))
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/styles.css", get(styles_css))
        .route("/app.js", get(app_js))
        .route("/logo.svg", get(logo_svg))
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, port: u16) -> Result<(), ServerError> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn home() -> Markup {
    templates::home(catalog::categories())
}

async fn about() -> Markup {
    templates::about()
}

async fn products_index() -> Markup {
    templates::products_index(catalog::categories())
}

async fn category_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match catalog::find_category(&slug) {
        Some(category) => {
            let products = catalog::load_product_data(&state.data_dir, category.key);
            templates::category_page(category, &products).into_response()
        }
        None => (StatusCode::NOT_FOUND, "No such product category").into_response(),
    }
}

async fn contact_page() -> Markup {
    templates::contact(&ContactState::default())
}

async fn contact_submit(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ContactSubmission>, FormRejection>,
) -> Markup {
    // A malformed submission gets the same page back, not a bare 422
    let Form(submission) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!(%rejection, "malformed contact submission");
            return templates::contact(&ContactState {
                sent: Some(false),
                error: Some(
                    "Please fill in your name, email and message, then try again.".to_string(),
                ),
            });
        }
    };
    match mailer::send_contact(&state.smtp, &submission).await {
        Ok(()) => {
            info!(name = %submission.name, "contact form relayed");
            templates::contact(&ContactState {
                sent: Some(true),
                error: None,
            })
        }
        Err(err) => {
            error!(%err, "contact form relay failed");
            templates::contact(&ContactState {
                sent: Some(false),
                error: Some("Failed to send message. Please try again later.".to_string()),
            })
        }
    }
}

async fn styles_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLES_CSS)
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}

async fn logo_svg() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], LOGO_SVG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            data_dir: PathBuf::from("no-such-data-dir"),
            // Nothing listens here — mail sends fail fast
            smtp: SmtpConfig {
                host: "127.0.0.1".to_string(),
                port: 1,
                secure: false,
                user: "user".to_string(),
                pass: "pass".to_string(),
                from: "from@example.com".to_string(),
                company_email: "to@example.com".to_string(),
            },
        }
    }

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn every_registry_route_serves_ok() {
        for page in crate::pages::all_pages() {
            let (status, body) = get_body(router(test_state()), page.route()).await;
            assert_eq!(status, StatusCode::OK, "route {}", page.route());
            assert!(body.contains(&page.title()), "route {}", page.route());
        }
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let (status, _) = get_body(router(test_state()), "/products/no-such-slug").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn assets_serve_with_content_types() {
        let response = router(test_state())
            .oneshot(Request::get("/styles.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/css; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn category_page_serves_even_without_data() {
        let (status, body) = get_body(router(test_state()), "/products/granules").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Product list coming soon"));
    }

    #[tokio::test]
    async fn incomplete_submission_renders_the_contact_page() {
        // Missing `message` field — the Form extractor rejects it
        let request = Request::post("/contact")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from("name=Ada&email=ada%40example.com"))
            .unwrap();
        let response = router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("banner-error"));
        assert!(body.contains("fill in your name"));
        assert!(!body.contains("banner-sent"));
    }

    #[tokio::test]
    async fn failed_mail_relay_renders_error_state() {
        let request = Request::post("/contact")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(
                "name=Ada&email=ada%40example.com&message=Hello",
            ))
            .unwrap();
        let response = router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("banner-error"));
        assert!(body.contains("try again later"));
        assert!(!body.contains("banner-sent"));
    }
}
