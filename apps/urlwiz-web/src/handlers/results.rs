use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use urlwiz_shared::models::DomainSearchResult;
use urlwiz_shared::unlock::UnlockDialog;
use urlwiz_shared::view::{ResultView, SummaryRow};

use super::unlock::DialogView;
use super::{Layout, PageError};
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "requests.html")]
pub struct RequestsTemplate {
    pub layout: Layout,
    pub rows: Vec<SummaryRow>,
}

#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub layout: Layout,
    pub view: ResultView,
    pub dialog: DialogView,
}

#[derive(Template, WebTemplate)]
#[template(path = "pending.html")]
pub struct PendingTemplate {
    pub layout: Layout,
    pub prompt: String,
    pub refresh_secs: u64,
}

/// Public collection of searches, in the order the backend returns them.
pub async fn list_requests(State(state): State<AppState>) -> Result<RequestsTemplate, PageError> {
    let results = state
        .fetcher
        .searches()
        .await
        .into_result()
        .map_err(|e| PageError::fetch(&state.layout, &e))?;

    Ok(RequestsTemplate {
        layout: state.layout.clone(),
        rows: results.iter().map(SummaryRow::from_result).collect(),
    })
}

pub async fn show_request(
    Path(uuid): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, PageError> {
    let result = state
        .fetcher
        .search(&uuid)
        .await
        .into_result()
        .map_err(|e| PageError::fetch(&state.layout, &e))?;

    if result.is_pending() {
        tracing::debug!("Search {} is still being scored", uuid);
        return Ok(PendingTemplate {
            layout: state.layout.clone(),
            prompt: result.prompt,
            refresh_secs: state.config.poll_interval_secs,
        }
        .into_response());
    }

    Ok(result_page(&state, &result, &UnlockDialog::default()).into_response())
}

pub(crate) fn result_page(
    state: &AppState,
    result: &DomainSearchResult,
    dialog: &UnlockDialog,
) -> ResultTemplate {
    if !result.is_consistent() {
        tracing::warn!(
            "Search {} has inconsistent rows ({} listings, {} skeletons, total {})",
            result.uuid,
            result.domains.len(),
            result.skeletons.len(),
            result.total_domains
        );
    }

    let view = ResultView::build(result, Utc::now());
    tracing::debug!(
        "Rendering search {} with {} of {} rows redacted",
        result.uuid,
        view.redacted_count(),
        view.rows.len()
    );

    ResultTemplate {
        layout: state.layout.clone(),
        view,
        dialog: DialogView::from_dialog(dialog),
    }
}
