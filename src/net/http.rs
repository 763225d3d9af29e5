use async_trait::async_trait;

use crate::net::error::{request_failed, NetworkResult};
use crate::net::types::{FetchRequest, FetchResponse, Method, ResponseKind};
use crate::net::Network;

/// Live [`Network`] implementation backed by `reqwest`.
///
/// The client applies no timeout of its own: deadline handling is a policy
/// decision made by the fetch interceptor, which races the returned future
/// against a timer.
#[derive(Clone, Debug, Default)]
pub struct HttpNetwork {
    client: reqwest::Client,
}

impl HttpNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn method_for(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &FetchRequest) -> NetworkResult<FetchResponse> {
        let mut builder = self
            .client
            .request(Self::method_for(request.method), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| request_failed(format!("{} {}: {err}", request.method, request.url)))?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let kind = if final_url.origin() == request.url.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        };
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|err| request_failed(format!("reading body of {}: {err}", request.url)))?;

        Ok(FetchResponse {
            status,
            headers,
            body,
            kind,
            url: Some(final_url),
        })
    }
}
