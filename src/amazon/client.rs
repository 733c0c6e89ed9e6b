//! HTTP client for Amazon requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::error::FetchError;
use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;
use wreq::Client;
use wreq_util::Emulation;

/// Trait for page fetching - enables mocking for tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and returns its body.
    ///
    /// Any HTTP response is returned as-is; only transport failures are errors.
    async fn get(&self, url: &Url) -> Result<String, FetchError>;
}

/// Amazon HTTP client with browser impersonation.
pub struct AmazonClient {
    client: Client,
}

impl AmazonClient {
    /// Creates a new Amazon client with the given configuration.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder().cookie_store(true).gzip(true).brotli(true);

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|source| FetchError::Proxy { proxy: proxy_url.clone(), source })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for AmazonClient {
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let network = |source: wreq::Error| FetchError::Network { url: url.to_string(), source };

        let response = self
            .client
            .get(url.as_str())
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "en-IN,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Ch-Ua", "\"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"")
            .header("Sec-Ch-Ua-Mobile", "?0")
            .header("Sec-Ch-Ua-Platform", "\"macOS\"")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Sec-Fetch-User", "?1")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503) on {}. Consider using a proxy or increasing delay.", url);
        } else if !status.is_success() {
            warn!("{} returned status {}", url, status);
        }

        response.text().await.map_err(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config { delay_ms: 0, ..Config::default() }
    }

    fn url(server: &MockServer, rest: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), rest)).unwrap()
    }

    #[tokio::test]
    async fn test_get_listing_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/s"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>page 2</html>"))
            .mount(&mock_server)
            .await;

        let client = AmazonClient::new(&make_test_config()).unwrap();
        let body = client.get(&url(&mock_server, "/s?k=bags&page=2")).await.unwrap();
        assert!(body.contains("page 2"));
    }

    #[tokio::test]
    async fn test_get_product_page() {
        let mock_server = MockServer::start().await;

        let html = r#"<html><body><a id="bylineInfo">Visit the Acme Store</a></body></html>"#;

        Mock::given(method("GET"))
            .and(path("/dp/B08N5WRWNW"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&mock_server)
            .await;

        let client = AmazonClient::new(&make_test_config()).unwrap();
        let body = client.get(&url(&mock_server, "/dp/B08N5WRWNW")).await.unwrap();
        assert!(body.contains("Acme Store"));
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/dp/INVALIDASIN"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<html>not found</html>"))
            .mount(&mock_server)
            .await;

        let client = AmazonClient::new(&make_test_config()).unwrap();
        let body = client.get(&url(&mock_server, "/dp/INVALIDASIN")).await.unwrap();
        assert!(body.contains("not found"));
    }

    #[tokio::test]
    async fn test_rate_limited_503_is_not_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/s"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = AmazonClient::new(&make_test_config()).unwrap();
        let body = client.get(&url(&mock_server, "/s?k=bags&page=1")).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind and drop a listener to get a port nothing listens on.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let client = AmazonClient::new(&make_test_config()).unwrap();
        let dead_url = Url::parse(&format!("http://{}/dp/B0DEAD0000", addr)).unwrap();
        let err = client.get(&dead_url).await.unwrap_err();
        assert!(err.is_network());
        assert!(err.to_string().contains("request to"));
    }
}
