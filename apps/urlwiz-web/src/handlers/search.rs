use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};
use urlwiz_shared::models::ExampleSummary;
use urlwiz_shared::search_form::SearchForm;

use super::{Layout, PageError};
use crate::AppState;
use crate::fetcher::FetchState;

const MAX_EXAMPLES: usize = 5;

#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub layout: Layout,
    /// `None` when the listing count could not be loaded.
    pub count: Option<u64>,
    pub prompt: String,
    pub editable: bool,
    pub busy: bool,
    pub examples: Vec<ExampleLink>,
    pub show_browse_link: bool,
}

pub struct ExampleLink {
    pub href: String,
    pub label: String,
}

#[derive(Deserialize)]
pub struct SearchSubmission {
    #[serde(default)]
    pub prompt: String,
}

pub async fn home(State(state): State<AppState>) -> SearchTemplate {
    search_page(&state, &SearchForm::default(), true).await
}

pub async fn edit_search(
    Path(uuid): Path<String>,
    State(state): State<AppState>,
) -> Result<SearchTemplate, PageError> {
    let result = state
        .fetcher
        .search(&uuid)
        .await
        .into_result()
        .map_err(|e| PageError::fetch(&state.layout, &e))?;

    Ok(search_page(&state, &SearchForm::from_result(&result), false).await)
}

pub async fn create_search(
    State(state): State<AppState>,
    Form(submission): Form<SearchSubmission>,
) -> Response {
    let mut form = SearchForm::new(submission.prompt);
    let Some(request) = form.begin_submit() else {
        return search_page(&state, &form, true).await.into_response();
    };

    let outcome = state.api.create_search(&request).await;
    if let Err(e) = &outcome {
        warn!("Search creation failed: {}", e);
    }

    match form.finish_submit(outcome) {
        Some(navigation) => {
            info!("Search created, redirecting to {}", navigation.target());
            Redirect::to(navigation.target()).into_response()
        }
        None => {
            warn!("Search creation returned no uuid, form reopened");
            search_page(&state, &form, true).await.into_response()
        }
    }
}

async fn search_page(state: &AppState, form: &SearchForm, with_examples: bool) -> SearchTemplate {
    let (count, examples) = if with_examples {
        let (count, examples) =
            tokio::join!(state.fetcher.listing_count(), state.fetcher.examples());
        (count, example_links(examples))
    } else {
        (state.fetcher.listing_count().await, Vec::new())
    };

    if let Some(err) = count.error() {
        warn!("Listing count unavailable: {}", err);
    }

    SearchTemplate {
        layout: state.layout.clone(),
        count: count.data().copied(),
        prompt: form.prompt.clone(),
        editable: form.is_editable(),
        busy: form.is_busy(),
        examples,
        show_browse_link: with_examples,
    }
}

fn example_links(examples: FetchState<Vec<ExampleSummary>>) -> Vec<ExampleLink> {
    match examples.into_result() {
        Ok(examples) => examples
            .into_iter()
            .take(MAX_EXAMPLES)
            .map(|example| ExampleLink {
                href: format!("/requests/{}", example.uuid),
                label: example
                    .summary
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(example.prompt),
            })
            .collect(),
        Err(e) => {
            tracing::debug!("Examples unavailable: {}", e);
            Vec::new()
        }
    }
}
