//! The request helper itself.
//!
//! One entry point per HTTP method, each taking the URL and a [`RequestOptions`].
//! The plain variants return a [`Body`] shaped by [`RequestOptions::shape`]; the
//! `_as` variants decode the body strictly into a caller-chosen type.

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::body::{decode_as, Body, RequestBody, ResponseShape};
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::HttpClient;
use crate::model::{Method, Request};
use crate::response::ResponseEnvelope;
use crate::{ClientConfig, Error, Result};


/// Headers, body and response shape for a single call.
#[derive(Debug, Default)]
pub struct RequestOptions {
    headers: Vec<String>,
    body: RequestBody,
    shape: ResponseShape,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(name.into());
        self.headers.push(value.into());
        self
    }

    /// Appends a flat `name, value, name, value, ...` list.
    ///
    /// The combined list must have an even length by the time the request is sent.
    pub fn headers<I, S>(mut self, flat: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers.extend(flat.into_iter().map(Into::into));
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Ignored by the `_as` entry points, which always decode JSON into the target type.
    pub fn shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Sends requests through one transport.
///
/// Clones share the transport, and with it the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct RequestClient<C = ReqwestHttpClient> {
    transport: C,
}

impl RequestClient<ReqwestHttpClient> {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_transport(ReqwestHttpClient::create(config)?))
    }
}

impl<C> RequestClient<C>
where
    C: HttpClient,
{
    pub fn from_transport(transport: C) -> Self {
        RequestClient { transport }
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    pub fn get(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope<Body>> {
        self.send(Method::Get, url, options)
    }

    pub fn get_as<T>(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        self.send_as(Method::Get, url, options)
    }

    pub fn post(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope<Body>> {
        self.send(Method::Post, url, options)
    }

    pub fn post_as<T>(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        self.send_as(Method::Post, url, options)
    }

    pub fn put(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope<Body>> {
        self.send(Method::Put, url, options)
    }

    pub fn put_as<T>(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        self.send_as(Method::Put, url, options)
    }

    pub fn delete(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope<Body>> {
        self.send(Method::Delete, url, options)
    }

    pub fn delete_as<T>(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        self.send_as(Method::Delete, url, options)
    }

    /// Sends one request and shapes the body as `options` asks.
    ///
    /// Any status code counts as success here.
    pub fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope<Body>> {
        let (request, shape) = prepare(method, url, options)?;
        let response = self.transport.execute(request)?;
        shape.decode(response)
    }

    pub fn send_as<T>(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let (request, _) = prepare(method, url, options)?;
        let response = self.transport.execute(request)?;
        decode_as(response)
    }
}

fn prepare(
    method: Method,
    url: &str,
    options: RequestOptions,
) -> Result<(Request, ResponseShape)> {
    let RequestOptions {
        headers,
        body,
        shape,
    } = options;
    let url = parse_url(url)?;
    let headers = pair_headers(headers)?;
    body.validate()?;
    debug!(%method, %url, headers = headers.len(), body = ?body, "prepared request");

    Ok((
        Request {
            method,
            url,
            headers,
            body,
        },
        shape,
    ))
}

fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::invalid_request(format!("invalid URL {:?}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::invalid_request(format!(
            "unsupported URL scheme {:?} in {:?}",
            scheme, url
        ))),
    }
}

fn pair_headers(flat: Vec<String>) -> Result<Vec<(String, String)>> {
    if flat.len() % 2 != 0 {
        return Err(Error::invalid_request(format!(
            "header list must alternate names and values, got {} entries",
            flat.len()
        )));
    }
    let mut headers = Vec::with_capacity(flat.len() / 2);
    let mut flat = flat.into_iter();
    while let (Some(name), Some(value)) = (flat.next(), flat.next()) {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::invalid_request(format!("invalid header name {:?}: {}", name, e)))?;
        HeaderValue::from_str(&value).map_err(|e| {
            Error::invalid_request(format!("invalid value for header {:?}: {}", name, e))
        })?;
        headers.push((name, value));
    }
    Ok(headers)
}
