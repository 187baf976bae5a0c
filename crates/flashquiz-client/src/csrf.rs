//! Request layer with CSRF protection.
//!
//! The server sets a `csrftoken` cookie; every mutating request must echo it
//! back in the `X-CSRFToken` header. All requests go through one
//! [`reqwest::Client`] with a shared cookie jar, so the session cookie is
//! always sent.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use reqwest::{Method, Response, Url};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Name of the cookie carrying the CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the token is echoed in.
pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

pub const CSRF_PATH: &str = "/api/auth/csrf/";

/// Extract the CSRF token from a `Cookie`-style string (`a=1; b=2`).
///
/// Returns `None` when the cookie is missing, empty, or not valid
/// percent-encoded UTF-8.
pub fn csrf_token_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| key.trim() == CSRF_COOKIE && !value.trim().is_empty())
        .and_then(|(_, value)| urlencoding::decode(value.trim()).ok())
        .map(|decoded| decoded.into_owned())
}

/// Options for [`CsrfClient::request_with`].
///
/// Cookies are always sent; there is no option to omit them.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method; `None` means GET.
    pub method: Option<Method>,
    /// Extra headers. A caller `Cookie` header is merged with the jar's
    /// cookies, never sent in place of them.
    pub headers: HeaderMap,
    /// Query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    /// JSON request body.
    pub json: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn post() -> Self {
        Self::method(Method::POST)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.json = Some(value);
        Ok(self)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// The method that will actually be used.
    pub fn effective_method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }
}

/// Merge caller headers with the CSRF header.
///
/// The token is added only when present and the method is not GET.
pub fn prepare_headers(method: &Method, headers: &HeaderMap, token: Option<&str>) -> HeaderMap {
    let mut merged = headers.clone();
    if let Some(token) = token {
        if *method != Method::GET {
            match HeaderValue::from_str(token) {
                Ok(value) => {
                    merged.insert(CSRF_HEADER, value);
                }
                Err(_) => warn!("CSRF token is not a valid header value, not sending it"),
            }
        }
    }
    merged
}

/// Fold the jar's cookies into a caller-supplied `Cookie` header.
///
/// reqwest skips the cookie store when a `Cookie` header is already set, so
/// without this the session cookie would be lost.
fn merge_cookie_header(headers: &mut HeaderMap, jar_cookies: Option<&str>) {
    let Some(jar_cookies) = jar_cookies.filter(|c| !c.is_empty()) else {
        return;
    };
    let caller: Vec<String> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect();
    if caller.is_empty() {
        headers.remove(COOKIE);
        return;
    }
    let combined = format!("{}; {jar_cookies}", caller.join("; "));
    match HeaderValue::from_str(&combined) {
        Ok(value) => {
            headers.insert(COOKIE, value);
        }
        Err(_) => {
            warn!("caller Cookie header is not a valid header value, dropping it");
            headers.remove(COOKIE);
        }
    }
}

/// HTTP client that carries session cookies and the CSRF token.
pub struct CsrfClient {
    base_url: Url,
    client: reqwest::Client,
    jar: Arc<Jar>,
    timeout_secs: u64,
}

impl CsrfClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| {
                ClientError::TransportFailure(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            jar,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an absolute API path against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Cookies the jar would send to the base URL, as a `Cookie` header string.
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// Current CSRF token from the cookie jar.
    pub fn csrf_token(&self) -> Option<String> {
        self.cookie_header()
            .as_deref()
            .and_then(csrf_token_from_cookies)
    }

    /// Store a `Set-Cookie`-style string for the base URL.
    pub fn set_cookie(&self, cookie: &str) {
        self.jar.add_cookie_str(cookie, &self.base_url);
    }

    /// Send a request to `path`, adding the CSRF header for non-GET methods.
    #[instrument(skip(self, options), fields(method = %options.effective_method()))]
    pub async fn request_with(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        let method = options.effective_method();
        let mut url = self.url(path)?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&options.query);
        }

        let token = self.csrf_token();
        let mut headers = prepare_headers(&method, &options.headers, token.as_deref());
        if headers.contains_key(COOKIE) {
            merge_cookie_header(&mut headers, self.cookie_header().as_deref());
        }
        debug!(%url, csrf = headers.contains_key(CSRF_HEADER), "sending request");

        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = &options.json {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout_secs))
    }

    /// Ask the server to set the CSRF cookie. Failures are logged, not raised.
    pub async fn initialize_csrf(&self) {
        match self.request_with(CSRF_PATH, RequestOptions::get()).await {
            Ok(response) if response.status().is_success() => {
                debug!(has_token = self.csrf_token().is_some(), "CSRF cookie initialized");
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "failed to initialize CSRF token");
            }
            Err(e) => warn!(error = %e, "failed to initialize CSRF token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn token_found_among_other_cookies() {
        assert_eq!(
            csrf_token_from_cookies("foo=bar; csrftoken=abc123; baz=qux"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn token_absent() {
        assert_eq!(csrf_token_from_cookies("foo=bar"), None);
        assert_eq!(csrf_token_from_cookies(""), None);
        assert_eq!(csrf_token_from_cookies("csrftoken="), None);
        assert_eq!(csrf_token_from_cookies("xcsrftoken=abc"), None);
    }

    #[test]
    fn token_is_percent_decoded() {
        assert_eq!(
            csrf_token_from_cookies("csrftoken=a%2Bb%3D%3D"),
            Some("a+b==".to_string())
        );
    }

    #[test]
    fn post_gets_token_header() {
        let mut caller = HeaderMap::new();
        caller.insert("x-trace", HeaderValue::from_static("1"));
        let headers = prepare_headers(&Method::POST, &caller, Some("abc123"));
        assert_eq!(headers.get(CSRF_HEADER).unwrap(), "abc123");
        assert_eq!(headers.get("x-trace").unwrap(), "1");
    }

    #[test]
    fn get_never_gets_token_header() {
        let headers = prepare_headers(&Method::GET, &HeaderMap::new(), Some("abc123"));
        assert!(!headers.contains_key(CSRF_HEADER));
    }

    #[test]
    fn no_token_no_header() {
        let headers = prepare_headers(&Method::DELETE, &HeaderMap::new(), None);
        assert!(headers.is_empty());
    }

    #[test]
    fn default_options_are_get() {
        assert_eq!(RequestOptions::default().effective_method(), Method::GET);
        assert_eq!(RequestOptions::post().effective_method(), Method::POST);
    }

    #[tokio::test]
    async fn post_sends_token_from_cookie_jar() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cards/"))
            .and(header("x-csrftoken", "abc123"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = CsrfClient::new(&ClientConfig::with_base_url(server.uri())).unwrap();
        client.set_cookie("csrftoken=abc123; Path=/");

        let response = client
            .request_with("/api/cards/", RequestOptions::post())
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201);
    }

    #[tokio::test]
    async fn get_omits_token_but_sends_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/cards/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = CsrfClient::new(&ClientConfig::with_base_url(server.uri())).unwrap();
        client.set_cookie("csrftoken=abc123; Path=/");
        client
            .request_with("/api/cards/", RequestOptions::get())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("x-csrftoken"));
        let cookie = requests[0].headers.get("cookie").unwrap().to_str().unwrap();
        assert!(cookie.contains("csrftoken=abc123"));
    }

    #[tokio::test]
    async fn caller_cookie_header_keeps_session_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cards/"))
            .and(header("x-csrftoken", "abc123"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = CsrfClient::new(&ClientConfig::with_base_url(server.uri())).unwrap();
        client.set_cookie("sessionid=s1; Path=/");
        client.set_cookie("csrftoken=abc123; Path=/");

        let mut options = RequestOptions::post();
        options.headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        client.request_with("/api/cards/", options).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let cookies: Vec<&str> = requests[0]
            .headers
            .get_all("cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        let cookie = cookies.join("; ");
        assert!(cookie.contains("theme=dark"), "cookie header: {cookie}");
        assert!(cookie.contains("sessionid=s1"), "cookie header: {cookie}");
        assert!(cookie.contains("csrftoken=abc123"), "cookie header: {cookie}");
    }

    #[test]
    fn merge_without_jar_cookies_keeps_caller_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        merge_cookie_header(&mut headers, None);
        assert_eq!(headers.get(COOKIE).unwrap(), "theme=dark");
    }

    #[tokio::test]
    async fn query_parameters_are_appended() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/search/"))
            .and(wiremock::matchers::query_param("q", "al ice"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = CsrfClient::new(&ClientConfig::with_base_url(server.uri())).unwrap();
        client
            .request_with("/api/users/search/", RequestOptions::get().query("q", "al ice"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn initialize_stores_the_server_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CSRF_PATH))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "csrftoken=tok42; Path=/"),
            )
            .mount(&server)
            .await;

        let client = CsrfClient::new(&ClientConfig::with_base_url(server.uri())).unwrap();
        assert_eq!(client.csrf_token(), None);
        client.initialize_csrf().await;
        assert_eq!(client.csrf_token().as_deref(), Some("tok42"));
    }

    #[tokio::test]
    async fn transport_failure_is_classified() {
        // Nothing listens on port 1.
        let client = CsrfClient::new(&ClientConfig::with_base_url("http://127.0.0.1:1")).unwrap();
        let err = client
            .request_with("/api/auth/check/", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(err.is_transport(), "unexpected error: {err}");
    }

    #[test]
    fn invalid_base_url() {
        let err = CsrfClient::new(&ClientConfig::with_base_url("not a url")).err().unwrap();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
