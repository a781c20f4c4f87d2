use crate::body::RequestBody;
use crate::http_client::{HttpClient, RawResponse};
use crate::model::{Headers, Method, Request};
use crate::{ClientConfig, Error, Result};
use reqwest::blocking::{Body, Client, RequestBuilder};
use reqwest::cookie::CookieStore;
use reqwest::redirect::Policy;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use std::sync::Arc;
use tracing::debug;

/// The production transport, a thin layer over `reqwest`'s blocking client.
///
/// Cloning is cheap and clones share the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl HttpClient for ReqwestHttpClient {
    fn create(config: ClientConfig) -> Result<ReqwestHttpClient>
    where
        Self: Sized,
    {
        let ClientConfig {
            ssl_check,
            cookie_store,
        } = config;
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(!ssl_check)
            .redirect(Policy::none());
        if let Some(store) = cookie_store {
            builder = builder.cookie_provider(Arc::new(SharedCookieStore(store)));
        }
        let client = builder.build()?;

        Ok(ReqwestHttpClient { client })
    }

    fn execute(&self, request: Request) -> Result<RawResponse> {
        let content_type = request
            .body
            .content_type()
            .filter(|_| !request.has_header(CONTENT_TYPE.as_str()));
        let Request {
            method,
            url,
            headers,
            body,
        } = request;
        debug!(%method, %url, "sending request");

        let mut request_builder = self.client.request(method.into(), url);
        request_builder = set_headers(&headers, request_builder);
        if let Some(content_type) = content_type {
            request_builder = request_builder.header(CONTENT_TYPE, content_type);
        }
        request_builder = set_body(body, request_builder)?;
        let response = request_builder.send()?;
        debug!(status = response.status().as_u16(), "received response");

        RawResponse::try_from(response)
    }
}

fn set_headers(
    headers: &[(String, String)],
    mut request_builder: RequestBuilder,
) -> RequestBuilder {
    for (key, value) in headers {
        request_builder = request_builder.header(key, value);
    }
    request_builder
}

fn set_body(body: RequestBody, request_builder: RequestBuilder) -> Result<RequestBuilder> {
    let request_builder = match body {
        RequestBody::Empty => request_builder,
        RequestBody::File(path) => {
            let file = std::fs::File::open(&path).map_err(|source| Error::Io { path, source })?;
            request_builder.body(Body::from(file))
        }
        RequestBody::Stream(reader) => request_builder.body(Body::new(reader)),
        body => match body.into_bytes()? {
            Some(bytes) => request_builder.body::<Body>(bytes.into()),
            None => request_builder,
        },
    };
    Ok(request_builder)
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

impl TryFrom<reqwest::blocking::Response> for RawResponse {
    type Error = Error;

    fn try_from(response: reqwest::blocking::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = Headers::from(response.headers());
        let body = response.bytes()?.to_vec();
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl From<&HeaderMap> for Headers {
    fn from(value: &HeaderMap) -> Self {
        let mut headers = Headers::new();
        for header_name in value.keys() {
            for header_value in value.get_all(header_name) {
                headers.append(
                    header_name.as_str(),
                    String::from_utf8_lossy(header_value.as_bytes()),
                );
            }
        }
        headers
    }
}

/// Lets a caller-supplied `dyn CookieStore` stand in where reqwest wants a sized one.
struct SharedCookieStore(Arc<dyn CookieStore>);

impl CookieStore for SharedCookieStore {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.0.set_cookies(cookie_headers, url)
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.0.cookies(url)
    }
}
