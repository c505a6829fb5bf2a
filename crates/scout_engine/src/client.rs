use std::sync::{Arc, Mutex, PoisonError};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, SET_COOKIE};
use reqwest::{Method, RequestBuilder};
use scout_logging::{scout_debug, scout_error, scout_warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::error::map_reqwest_error;
use crate::{ApiError, ApiSettings};

const XSRF_COOKIE: &str = "XSRF-TOKEN";
const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// HTTP gateway to the recipe backend.
///
/// Keeps the session cookie in reqwest's cookie store and echoes the
/// `XSRF-TOKEN` cookie back as the `X-XSRF-TOKEN` header on every request,
/// which is what the backend's CSRF middleware expects from browser clients.
/// Cloning is cheap and clones share the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    api_prefix: Vec<String>,
    xsrf: Arc<Mutex<Option<String>>>,
}

/// Resource bodies arrive either wrapped in `{"data": ...}` or bare.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Payload::Wrapped { data } => data,
            Payload::Bare(inner) => inner,
        }
    }
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(settings.base_url.trim())
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(settings.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Requested-With",
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let api_prefix = settings
            .api_prefix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        Ok(Self {
            http,
            base,
            api_prefix,
            xsrf: Arc::new(Mutex::new(None)),
        })
    }

    /// URL of a JSON resource endpoint under the API prefix.
    pub fn api_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        self.build_url(true, segments)
    }

    /// URL of a session endpoint at the site root (login, logout, ...).
    pub fn root_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        self.build_url(false, segments)
    }

    fn build_url(&self, prefixed: bool, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?;
            path.pop_if_empty();
            if prefixed {
                path.extend(self.api_prefix.iter());
            }
            path.extend(segments.iter());
        }
        Ok(url)
    }

    /// Current XSRF token, if the backend has issued one.
    pub fn xsrf_token(&self) -> Option<String> {
        self.xsrf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.xsrf_token() {
            Some(token) => builder.header(XSRF_HEADER, token),
            None => builder,
        }
    }

    /// Sends the request and returns the body of a successful response.
    ///
    /// Non-success statuses become [`ApiError`]s; auth and server failures are
    /// logged here so call sites only deal with user-facing handling.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        self.capture_xsrf(response.headers());

        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if status.is_success() {
            scout_debug!("{} -> {} ({} bytes)", url.path(), status, body.len());
            return Ok(body.to_vec());
        }

        let code = status.as_u16();
        if code == 401 || code == 419 {
            scout_warn!(
                "Session is no longer valid (http {}) for {}; sign in again",
                code,
                url.path()
            );
        } else if status.is_server_error() {
            scout_error!("Server error (http {}) for {}", code, url.path());
        }
        Err(ApiError::from_status(status, &body))
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute(builder).await?;
        decode(&body)
    }

    fn capture_xsrf(&self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else {
                continue;
            };
            if let Some(token) = parse_xsrf_cookie(raw) {
                *self.xsrf.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
            }
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Extracts the decoded token from a `Set-Cookie: XSRF-TOKEN=...` header value.
fn parse_xsrf_cookie(raw: &str) -> Option<String> {
    let pair = raw.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name.trim() != XSRF_COOKIE {
        return None;
    }
    let encoded = format!("v={}", value.trim());
    let (_, decoded) = url::form_urlencoded::parse(encoded.as_bytes()).next()?;
    let decoded = decoded.into_owned();
    (!decoded.is_empty()).then_some(decoded)
}
