use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info};
use urlwiz_shared::models::DomainSearchResult;
use urlwiz_shared::search_form::Navigation;
use urlwiz_shared::unlock::{UnlockDialog, UnlockForm};

use super::PageError;
use super::results::result_page;
use crate::AppState;

/// Unlock dialog as the result template renders it.
#[derive(Debug, Clone, Default)]
pub struct DialogView {
    pub open: bool,
    pub name: String,
    pub email: String,
    pub name_error: Option<String>,
    pub email_error: Option<String>,
    pub failure: Option<String>,
}

impl DialogView {
    pub fn from_dialog(dialog: &UnlockDialog) -> Self {
        let failure = dialog.error_message().map(str::to_string);
        Self {
            open: failure.is_some() || !dialog.errors.is_empty(),
            name: dialog.form.name.clone(),
            email: dialog.form.email.clone(),
            name_error: dialog.errors.name.clone(),
            email_error: dialog.errors.email.clone(),
            failure,
        }
    }
}

pub async fn unlock_request(
    Path(uuid): Path<String>,
    State(state): State<AppState>,
    Form(form): Form<UnlockForm>,
) -> Result<Response, PageError> {
    let result = state
        .fetcher
        .search(&uuid)
        .await
        .into_result()
        .map_err(|e| PageError::fetch(&state.layout, &e))?;

    if result.is_unlocked {
        info!("Search {} is already unlocked, skipping checkout", uuid);
        return Ok(Redirect::to(Navigation::result_page(&uuid).target()).into_response());
    }

    let mut dialog = UnlockDialog::default();
    let Some(request) = dialog.begin_submit(form) else {
        tracing::debug!("Unlock form for {} rejected: {:?}", uuid, dialog.errors);
        return Ok(reopen(&state, &result, &dialog, StatusCode::UNPROCESSABLE_ENTITY));
    };

    let outcome = state.api.unlock(&uuid, &request).await;
    if let Err(e) = &outcome {
        error!("Unlock request for {} failed: {}", uuid, e);
    }

    match dialog.finish_submit(outcome) {
        Some(navigation) => {
            info!("Handing {} over to checkout", uuid);
            Ok(Redirect::to(navigation.target()).into_response())
        }
        None => {
            error!("No redirect URL provided in the unlock response for {}", uuid);
            Ok(reopen(&state, &result, &dialog, StatusCode::BAD_GATEWAY))
        }
    }
}

/// Renders the result page again with the dialog open on its errors.
fn reopen(
    state: &AppState,
    result: &DomainSearchResult,
    dialog: &UnlockDialog,
    status: StatusCode,
) -> Response {
    (status, result_page(state, result, dialog)).into_response()
}
