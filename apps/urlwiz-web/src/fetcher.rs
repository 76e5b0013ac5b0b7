//! Read side of the backend client.
//!
//! Concurrent reads of the same path share one in-flight request. Nothing is
//! kept once a request settles, so every page render revalidates against the
//! backend. Writes go straight through [`ApiClient`].

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use urlwiz_shared::models::{DomainSearchResult, ExampleSummary};

use crate::api_client::{ApiClient, paths};
use crate::error::ApiError;

pub type FetchError = Arc<ApiError>;

type InFlight = Shared<BoxFuture<'static, Result<Arc<Value>, FetchError>>>;

/// Settled outcome of one keyed read.
#[derive(Debug)]
pub struct FetchState<T> {
    result: Result<T, FetchError>,
}

impl<T> FetchState<T> {
    pub fn data(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.result.as_ref().err()
    }

    pub fn into_result(self) -> Result<T, FetchError> {
        self.result
    }
}

#[derive(Clone)]
pub struct Fetcher {
    api: ApiClient,
    in_flight: Arc<Mutex<HashMap<String, InFlight>>>,
}

impl Fetcher {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> FetchState<T> {
        let request = self.join_or_start(key).await;
        let outcome = request.clone().await;

        {
            let mut in_flight = self.in_flight.lock().await;
            if in_flight
                .get(key)
                .is_some_and(|current| current.ptr_eq(&request))
            {
                in_flight.remove(key);
            }
        }

        let result = outcome.and_then(|value| {
            T::deserialize(value.as_ref()).map_err(|source| {
                Arc::new(ApiError::Decode {
                    url: format!("{}{}", self.api.base_url(), key),
                    source,
                })
            })
        });
        FetchState { result }
    }

    async fn join_or_start(&self, key: &str) -> InFlight {
        let mut in_flight = self.in_flight.lock().await;
        if let Some(existing) = in_flight.get(key) {
            tracing::debug!("Joining in-flight read of {}", key);
            return existing.clone();
        }

        let api = self.api.clone();
        let path = key.to_string();
        let request = async move { api.get::<Value>(&path).await.map(Arc::new).map_err(Arc::new) }
            .boxed()
            .shared();
        in_flight.insert(key.to_string(), request.clone());
        request
    }

    pub async fn search(&self, uuid: &str) -> FetchState<DomainSearchResult> {
        self.get(&paths::search(uuid)).await
    }

    pub async fn searches(&self) -> FetchState<Vec<DomainSearchResult>> {
        self.get(paths::SEARCHES).await
    }

    pub async fn listing_count(&self) -> FetchState<u64> {
        self.get(paths::COUNT).await
    }

    pub async fn examples(&self) -> FetchState<Vec<ExampleSummary>> {
        self.get(paths::EXAMPLES).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn concurrent_reads_share_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/count"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!(1234))
                    .set_delay(Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(ApiClient::new(server.uri()));
        let (a, b, c) = tokio::join!(
            fetcher.listing_count(),
            fetcher.listing_count(),
            fetcher.listing_count()
        );

        assert_eq!(a.data(), Some(&1234));
        assert_eq!(b.data(), Some(&1234));
        assert_eq!(c.data(), Some(&1234));
        assert!(fetcher.in_flight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn sequential_reads_revalidate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/requests/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uuid": "abc"})))
            .expect(2)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(ApiClient::new(server.uri()));
        assert!(fetcher.search("abc").await.data().is_some());
        assert!(fetcher.search("abc").await.data().is_some());
    }

    #[tokio::test]
    async fn failure_is_reported_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/requests"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(ApiClient::new(server.uri()));
        let state = fetcher.searches().await;
        assert!(state.data().is_none());
        assert!(state.error().is_some());
        assert!(state.into_result().is_err());
        assert!(fetcher.in_flight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn shape_mismatch_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/examples"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"oops": true})))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(ApiClient::new(server.uri()));
        let err = fetcher.examples().await.into_result().unwrap_err();
        assert!(matches!(*err, ApiError::Decode { .. }));
    }
}
