use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use urlwiz_shared::models::{
    CreateSearchRequest, DomainSearchResult, ExampleFlagUpdate, UnlockRequest, UnlockResponse,
};

use crate::error::ApiError;

/// Backend paths, relative to the configured API origin.
pub mod paths {
    pub const SEARCHES: &str = "/api/requests";
    pub const COUNT: &str = "/api/count";
    pub const EXAMPLES: &str = "/api/examples";

    pub fn search(uuid: &str) -> String {
        format!("{}/{}", SEARCHES, urlencoding::encode(uuid))
    }

    pub fn unlock(uuid: &str) -> String {
        format!("{}/unlock", search(uuid))
    }
}

/// Thin JSON adapter over the search API. No retries, auth or caching.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> (String, RequestBuilder) {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        (url, builder)
    }

    async fn send<T: DeserializeOwned>(url: String, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (url, builder) = self.request(Method::GET, path);
        Self::send(url, builder).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let (url, builder) = self.request(Method::POST, path);
        Self::send(url, builder.json(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let (url, builder) = self.request(Method::PUT, path);
        Self::send(url, builder.json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (url, builder) = self.request(Method::DELETE, path);
        Self::send(url, builder).await
    }

    /// Creates (or reuses) the search for `prompt`. Success is judged by the
    /// caller from the returned `uuid`.
    pub async fn create_search(
        &self,
        request: &CreateSearchRequest,
    ) -> Result<DomainSearchResult, ApiError> {
        self.post(paths::SEARCHES, request).await
    }

    pub async fn unlock(&self, uuid: &str, request: &UnlockRequest) -> Result<UnlockResponse, ApiError> {
        self.post(&paths::unlock(uuid), request).await
    }

    /// Flags a search as a public example (or clears the flag).
    pub async fn set_example(&self, uuid: &str, is_example: bool) -> Result<DomainSearchResult, ApiError> {
        self.put(&paths::search(uuid), &ExampleFlagUpdate { is_example })
            .await
    }
}
