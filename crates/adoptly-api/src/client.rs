// Pet resource HTTP client
//
// Wraps `reqwest::Client` with URL construction, status classification,
// and body decoding. Stateless apart from the configured client: no retry,
// no caching, no de-duplication. Resilience belongs to the caller.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::pet::{Pet, PetId};
use crate::transport::{ClientConfig, REQUEST_TIMEOUT};

const BODY_PREVIEW_CHARS: usize = 200;

/// Async client for the `/pets` resource.
#[derive(Debug, Clone)]
pub struct PetClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl PetClient {
    /// Create a client from a resolved [`ClientConfig`].
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url: config.base_url().clone(),
            timeout: config.timeout(),
        })
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages its timeout).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List every pet in the catalog, in server order.
    ///
    /// `GET {base}/pets`
    pub async fn list_pets(&self) -> Result<Vec<Pet>, Error> {
        let url = self.url(&["pets"])?;
        debug!("listing pets");
        self.get(url).await
    }

    /// Fetch a single pet. The id is forwarded verbatim as one path segment.
    ///
    /// `GET {base}/pets/{id}`. Ids that cannot form a segment (`""`, `"."`,
    /// `".."`) fail with [`Error::InvalidId`] without a request.
    pub async fn get_pet(&self, id: &PetId) -> Result<Pet, Error> {
        let segment = id_segment(id)?;
        let url = self.url(&["pets", &segment])?;
        debug!(%id, "fetching pet");
        self.get(url).await
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL, keeping any base path prefix.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                path: resp.url().path().to_owned(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// URL normalization collapses dot segments (encoded or not), so such ids
/// would address a different resource.
fn id_segment(id: &PetId) -> Result<String, Error> {
    let segment = id.to_string();
    if matches!(segment.as_str(), "" | "." | "..") {
        return Err(Error::InvalidId { id: segment });
    }
    Ok(segment)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> PetClient {
        PetClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn list_url_appends_pets() {
        let url = client("http://localhost:3000").url(&["pets"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/pets");
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let url = client("http://localhost:3000/").url(&["pets"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/pets");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = client("https://host.example/api/v2/")
            .url(&["pets", "9"])
            .unwrap();
        assert_eq!(url.as_str(), "https://host.example/api/v2/pets/9");
    }

    #[test]
    fn id_stays_a_single_segment() {
        let url = client("http://localhost:3000")
            .url(&["pets", "a/b c"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/pets/a%2Fb%20c");
    }

    #[test]
    fn dot_ids_are_rejected_instead_of_collapsing() {
        for raw in ["", ".", ".."] {
            let err = id_segment(&PetId::from(raw)).unwrap_err();
            assert!(matches!(err, Error::InvalidId { ref id } if id == raw));
        }
        assert_eq!(id_segment(&PetId::from("...")).unwrap(), "...");
        assert_eq!(id_segment(&PetId::from(".x")).unwrap(), ".x");
        assert_eq!(id_segment(&PetId::from(7_u64)).unwrap(), "7");
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), BODY_PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }
}
