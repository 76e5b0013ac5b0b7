use askama::Template;
use askama_web::WebTemplate;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::WebConfig;
use crate::fetcher::FetchError;

pub mod health;
pub mod results;
pub mod search;
pub mod unlock;

/// Values every page layout needs.
#[derive(Debug, Clone)]
pub struct Layout {
    pub feedback_email: String,
    pub analytics_id: Option<String>,
}

impl Layout {
    pub fn from_config(config: &WebConfig) -> Self {
        Self {
            feedback_email: config.feedback_email.clone(),
            analytics_id: config.analytics_id.clone(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub layout: Layout,
    pub message: String,
}

/// A page that could not be built; rendered as an inline error message.
pub struct PageError {
    status: StatusCode,
    page: ErrorTemplate,
}

impl PageError {
    pub fn fetch(layout: &Layout, err: &FetchError) -> Self {
        if err.is_not_found() {
            return Self::not_found(layout);
        }
        tracing::error!("Backend read failed: {}", err);
        Self {
            status: StatusCode::BAD_GATEWAY,
            page: ErrorTemplate {
                layout: layout.clone(),
                message: "failed to load".to_string(),
            },
        }
    }

    pub fn not_found(layout: &Layout) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            page: ErrorTemplate {
                layout: layout.clone(),
                message: "Search request not found".to_string(),
            },
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, self.page).into_response()
    }
}
