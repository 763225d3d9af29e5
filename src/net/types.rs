use bytes::Bytes;
use url::Url;

use crate::net::error::{invalid_url, NetworkResult};

/// HTTP request methods the interceptor distinguishes.
///
/// Only `GET` requests are ever cached or intercepted; the remaining variants
/// exist so pass-through decisions can be made without guessing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a response, mirroring the `Response.type` values a
/// browser reports. Only [`ResponseKind::Basic`] responses are cacheable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response with full header visibility.
    Basic,
    /// Cross-origin response delivered under CORS.
    Cors,
    /// Cross-origin response with no visibility into status or body.
    Opaque,
    /// Response produced by a redirect followed opaquely.
    OpaqueRedirect,
    /// Network-level error surfaced as a response object.
    Error,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Basic => "basic",
            ResponseKind::Cors => "cors",
            ResponseKind::Opaque => "opaque",
            ResponseKind::OpaqueRedirect => "opaqueredirect",
            ResponseKind::Error => "error",
        }
    }
}

/// An outgoing request as seen by the fetch interceptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::Get, url)
    }

    /// Parses `url` and builds a `GET` request for it.
    pub fn get_str(url: &str) -> NetworkResult<Self> {
        let parsed = Url::parse(url).map_err(|err| invalid_url(format!("{url}: {err}")))?;
        Ok(Self::get(parsed))
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Whether the request travels over HTTP(S). Non-HTTP schemes
    /// (`chrome-extension:`, `data:`, ...) are never intercepted.
    pub fn is_http(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Identity of the request inside a cache store.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// A response as returned by the network or the cache store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub kind: ResponseKind,
    /// Final URL after redirects, when the transport reports one.
    pub url: Option<Url>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
            kind: ResponseKind::Basic,
            url: None,
        }
    }

    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Whether the cache store may retain this response: a plain HTTP 200
    /// from the same origin. Redirects, errors and opaque cross-origin
    /// payloads are excluded.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }
}
