//! # rest-request
//!
//! A small blocking helper for talking to REST services. It sends GET, POST, PUT
//! and DELETE requests through `reqwest` and hands the response back as an
//! immutable [`ResponseEnvelope`]: status, headers, and a body that is either
//! shaped by a [`ResponseShape`] or deserialized into a type of your choosing.
//!
//! ## Usage
//!
//! ```no_run
//! use rest_request::{RequestBody, RequestClient, RequestOptions, ResponseShape};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Todo {
//!     id: u64,
//!     title: String,
//! }
//!
//! # fn main() -> rest_request::Result<()> {
//! let client = RequestClient::new()?;
//!
//! // Raw text, whatever the status code
//! let page = client.get("https://example.com/", RequestOptions::new())?;
//! println!("{} {:?}", page.status(), page.body().as_text());
//!
//! // A generic JSON object
//! let map = client.post(
//!     "https://example.com/todos",
//!     RequestOptions::new()
//!         .headers(["Accept", "application/json"])
//!         .body(RequestBody::text(r#"{"title":"write docs"}"#))
//!         .shape(ResponseShape::Map),
//! )?;
//! println!("{:?}", map.body().as_map());
//!
//! // A typed value
//! let todo = client.get_as::<Todo>("https://example.com/todos/1", RequestOptions::new())?;
//! println!("{} {}", todo.body().id, todo.body().title);
//! # Ok(())
//! # }
//! ```
//!
//! ## Cookies
//!
//! Every client carries a cookie store that all of its requests (and those of its
//! clones) share. Pass your own store through [`ClientConfig::with_cookie_store`]
//! to share a session between clients, or turn cookies off with
//! [`ClientConfig::without_cookies`].
//!
//! ## Errors
//!
//! A 4xx or 5xx response is still a successful call; check
//! [`ResponseEnvelope::status`] or use [`ResponseEnvelope::error_for_status`].
//! See [`Error`] for what does fail.

mod body;
mod client;
mod config;
mod error;
mod http_client;
mod model;
mod response;

pub use body::{Body, RequestBody, ResponseShape};
pub use client::{RequestClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http_client::reqwest::ReqwestHttpClient;
pub use http_client::{HttpClient, RawResponse};
pub use model::{Headers, Method, Request};
pub use response::ResponseEnvelope;
