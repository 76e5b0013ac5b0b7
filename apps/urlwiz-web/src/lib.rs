use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub mod api_client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod handlers;

use api_client::ApiClient;
use config::WebConfig;
use fetcher::Fetcher;
use handlers::Layout;

#[derive(Clone)]
pub struct AppState {
    pub config: WebConfig,
    pub api: ApiClient,
    pub fetcher: Fetcher,
    pub layout: Layout,
}

impl AppState {
    pub fn new(config: WebConfig) -> Self {
        let api = ApiClient::new(config.api_url.clone());
        let fetcher = Fetcher::new(api.clone());
        let layout = Layout::from_config(&config);

        Self {
            config,
            api,
            fetcher,
            layout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Search form
        .route("/", get(handlers::search::home))
        .route(
            "/requests",
            get(handlers::results::list_requests).post(handlers::search::create_search),
        )
        // Result pages
        .route("/requests/{uuid}", get(handlers::results::show_request))
        .route("/requests/{uuid}/edit", get(handlers::search::edit_search))
        .route("/requests/{uuid}/unlock", post(handlers::unlock::unlock_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
