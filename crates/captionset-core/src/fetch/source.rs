//! Caption source trait and the HTTP file server implementation.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Url;

use crate::config::ServerConfig;
use crate::error::{FetchError, FetchResult};

/// Something that can return the text of a caption file by name.
///
/// Uses `async_trait` so sources can be shared as `Arc<dyn CaptionSource>`
/// across spawned fetch tasks.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Read the full text of `file`.
    async fn read_text(&self, file: &str) -> FetchResult<String>;
}

/// Reads caption files from the local file server with `GET /<file>`.
///
/// Every request carries `Cache-Control: no-cache` so edits on disk show up
/// on the next pass.
pub struct HttpCaptionSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpCaptionSource {
    /// Build a source for a base URL such as `http://localhost:8080/`.
    pub fn new(base_url: &str) -> FetchResult<Self> {
        let base = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            file: base_url.to_string(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl {
                file: base_url.to_string(),
                message: "not a base URL".to_string(),
            });
        }
        Ok(Self {
            base,
            client: reqwest::Client::new(),
        })
    }

    pub fn from_config(server: &ServerConfig) -> FetchResult<Self> {
        Self::new(&server.base_url())
    }

    /// URL for a file, with the name encoded as a single path segment.
    pub fn url_for(&self, file: &str) -> FetchResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl {
                file: file.to_string(),
                message: "base URL cannot take path segments".to_string(),
            })?
            .pop_if_empty()
            .push(file);
        Ok(url)
    }
}

#[async_trait]
impl CaptionSource for HttpCaptionSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn read_text(&self, file: &str) -> FetchResult<String> {
        let url = self.url_for(file)?;

        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                file: file.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                file: file.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| FetchError::Transport {
            file: file.to_string(),
            message: e.to_string(),
        })?;

        String::from_utf8(bytes.to_vec()).map_err(|_| FetchError::NotText {
            file: file.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_for_encodes_file_as_one_segment() {
        let source = HttpCaptionSource::new("http://localhost:8080/").unwrap();

        assert_eq!(
            source.url_for("dog.txt").unwrap().as_str(),
            "http://localhost:8080/dog.txt"
        );
        assert_eq!(
            source.url_for("my dog#1.txt").unwrap().as_str(),
            "http://localhost:8080/my%20dog%231.txt"
        );
    }

    #[test]
    fn test_url_for_without_trailing_slash() {
        let source = HttpCaptionSource::new("http://localhost:8080").unwrap();
        assert_eq!(
            source.url_for("a.txt").unwrap().as_str(),
            "http://localhost:8080/a.txt"
        );
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(matches!(
            HttpCaptionSource::new("not a url"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpCaptionSource::new("mailto:someone@example.com"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_from_config() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };
        let source = HttpCaptionSource::from_config(&server).unwrap();
        assert_eq!(
            source.url_for("x.txt").unwrap().as_str(),
            "http://127.0.0.1:9000/x.txt"
        );
    }

    #[tokio::test]
    async fn test_read_text_sends_no_cache_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dog.txt"))
            .and(header("cache-control", "no-cache"))
            .and(header("pragma", "no-cache"))
            .respond_with(ResponseTemplate::new(200).set_body_string("bark, woof "))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpCaptionSource::new(&server.uri()).unwrap();
        let text = source.read_text("dog.txt").await.unwrap();

        // Verbatim, no trimming
        assert_eq!(text, "bark, woof ");
    }

    #[tokio::test]
    async fn test_read_text_maps_404_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpCaptionSource::new(&server.uri()).unwrap();
        let err = source.read_text("missing.txt").await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.file(), "missing.txt");
    }

    #[tokio::test]
    async fn test_read_text_rejects_binary_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blob.bin"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x00, 0x9f]))
            .mount(&server)
            .await;

        let source = HttpCaptionSource::new(&server.uri()).unwrap();
        let err = source.read_text("blob.bin").await.unwrap_err();

        assert!(matches!(err, FetchError::NotText { .. }));
    }

    #[tokio::test]
    async fn test_read_text_unreachable_server() {
        // Port 9 (discard) is essentially never listening on loopback
        let source = HttpCaptionSource::new("http://127.0.0.1:9/").unwrap();
        let err = source.read_text("dog.txt").await.unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
