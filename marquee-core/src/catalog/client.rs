use std::{fmt, sync::Arc};

use async_trait::async_trait;
use marquee_config::CatalogConfig;
use marquee_model::{ListResponse, MovieSummary, Page};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error, warn};

use super::error::CatalogError;

const NOW_PLAYING_PATH: &str = "/movie/now_playing";
const TRENDING_WEEK_PATH: &str = "/trending/movie/week";
const POPULAR_PATH: &str = "/movie/popular";

/// The three catalog feeds the home screen consumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Movies currently in theatres (single, non-paginated list).
    async fn now_playing(&self) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Weekly trending movies, page-indexed from 1.
    async fn trending_week(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError>;

    /// Popular movies, page-indexed from 1.
    async fn popular(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError>;
}

#[async_trait]
impl<A> CatalogApi for Arc<A>
where
    A: CatalogApi + ?Sized,
{
    async fn now_playing(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        (**self).now_playing().await
    }

    async fn trending_week(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError> {
        (**self).trending_week(page).await
    }

    async fn popular(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError> {
        (**self).popular(page).await
    }
}

#[derive(Debug, Clone, Serialize)]
struct CatalogQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CatalogErrorBody {
    #[serde(default)]
    status_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the remote catalog.
///
/// Every request carries the configured credential and language, runs under
/// the configured timeout, and fails with exactly one [`CatalogError`] kind.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: Arc<CatalogConfig>,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("language", &self.config.language)
            .field("has_credential", &self.config.has_credential())
            .finish()
    }
}

impl CatalogClient {
    pub fn new(config: Arc<CatalogConfig>) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| CatalogError::transport(err.to_string()))?;

        if !config.has_credential() {
            warn!("catalog client created without an API key");
        }

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn get_json<T>(
        &self,
        path: &str,
        page: Option<u32>,
    ) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let query = CatalogQuery {
            api_key: self.config.api_key.as_ref().map(|key| key.expose()),
            language: &self.config.language,
            page,
        };

        debug!(%path, ?page, "catalog request");

        let result = self.send(&url, &query).await;
        if let Err(err) = &result {
            error!(
                %path,
                ?page,
                kind = %err.kind(),
                "catalog request failed: {err}"
            );
        }
        result
    }

    async fn send<T>(
        &self,
        url: &str,
        query: &CatalogQuery<'_>,
    ) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| CatalogError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| CatalogError::transport(err.to_string()))?;

        if status.is_success() {
            return serde_json::from_slice::<T>(&body)
                .map_err(CatalogError::from);
        }

        let message = serde_json::from_slice::<CatalogErrorBody>(&body)
            .ok()
            .and_then(|body| body.status_message.or(body.message))
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| {
                format!("TMDB request failed with status {}", status.as_u16())
            });

        Err(CatalogError::api(status.as_u16(), message))
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn now_playing(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        let response: ListResponse<MovieSummary> =
            self.get_json(NOW_PLAYING_PATH, None).await?;
        Ok(response.results)
    }

    async fn trending_week(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError> {
        self.get_json(TRENDING_WEEK_PATH, Some(page.max(1))).await
    }

    async fn popular(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError> {
        self.get_json(POPULAR_PATH, Some(page.max(1))).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use marquee_config::ApiKey;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;
    use crate::catalog::error::CatalogErrorKind;

    fn client_for(server: &MockServer) -> CatalogClient {
        let base =
            url::Url::parse(&format!("{}/3", server.uri())).expect("url");
        let mut config =
            CatalogConfig::new(ApiKey::new("test-key")).with_base_url(base);
        config.request_timeout = Duration::from_millis(500);
        CatalogClient::new(Arc::new(config)).expect("client")
    }

    fn movie_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Movie {id}"),
            "overview": "",
            "poster_path": format!("/{id}.jpg"),
            "backdrop_path": null,
            "release_date": "2024-05-01",
            "vote_average": 7.1
        })
    }

    #[tokio::test]
    async fn popular_attaches_credential_language_and_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("language", "en-US"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2,
                "results": [movie_json(1), movie_json(2)],
                "total_pages": 5,
                "total_results": 100
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).popular(2).await.expect("page");

        assert_eq!(page.page_number(), 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page.total_pages, 5);
    }

    #[tokio::test]
    async fn now_playing_returns_results_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/now_playing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dates": {"maximum": "2024-06-01", "minimum": "2024-04-01"},
                "results": [movie_json(10), movie_json(11), movie_json(12)]
            })))
            .mount(&server)
            .await;

        let movies = client_for(&server).now_playing().await.expect("list");
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].title, "Movie 10");
    }

    #[tokio::test]
    async fn error_status_uses_status_message_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/trending/movie/week"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key.",
                "success": false
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .trending_week(1)
            .await
            .expect_err("should fail");

        assert_eq!(
            err,
            CatalogError::api(
                401,
                "Invalid API key: You must be granted a valid key."
            )
        );
    }

    #[tokio::test]
    async fn error_status_without_body_falls_back_to_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client_for(&server).popular(1).await.expect_err("fail");
        assert_eq!(
            err,
            CatalogError::api(429, "TMDB request failed with status 429")
        );
        assert_eq!(err.message(), "429: TMDB request failed with status 429");
    }

    #[tokio::test]
    async fn blank_status_message_falls_back_to_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/now_playing"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_json(json!({ "status_message": "  " })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).now_playing().await.expect_err("fail");
        assert_eq!(
            err,
            CatalogError::api(502, "TMDB request failed with status 502")
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{\"page\": \"one\"}", "application/json"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).popular(1).await.expect_err("fail");
        assert_eq!(err.kind(), CatalogErrorKind::Decode);
    }

    #[tokio::test]
    async fn slow_server_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(json!({
                        "page": 1,
                        "results": [],
                        "total_pages": 1,
                        "total_results": 0,
                    })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).popular(1).await.expect_err("fail");
        assert_eq!(err.kind(), CatalogErrorKind::Transport);
    }

    #[tokio::test]
    async fn page_zero_is_raised_to_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1, "results": [], "total_pages": 1, "total_results": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).popular(0).await.expect("page");
        assert!(page.is_last());
    }
}
