//! What goes out on the wire and what comes back.
//!
//! [`RequestBody`] picks the encoding of the outgoing payload, [`ResponseShape`]
//! picks how the incoming payload is decoded, and [`Body`] is the decoded result.
//! Both enums are closed: every variant has a defined behavior.

use std::fmt::{Debug, Formatter};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::http_client::RawResponse;
use crate::response::ResponseEnvelope;
use crate::{Error, Result};


/// The payload of an outgoing request.
#[derive(Default)]
pub enum RequestBody {
    /// Nothing is sent.
    #[default]
    Empty,
    /// UTF-8 text.
    Text(String),
    /// Raw octets.
    Bytes(Vec<u8>),
    /// `len` octets of `bytes`, starting at `offset`.
    ByteRange {
        bytes: Vec<u8>,
        offset: usize,
        len: usize,
    },
    /// Several buffers sent back to back.
    ByteChunks(Vec<Vec<u8>>),
    /// The contents of a file, opened when the request is sent.
    File(PathBuf),
    /// Whatever the reader yields, sent chunked.
    Stream(Box<dyn Read + Send>),
    /// A JSON document. Sets `Content-Type: application/json` unless one was given.
    Json(Value),
}

impl RequestBody {
    pub fn text(text: impl Into<String>) -> Self {
        RequestBody::Text(text.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        RequestBody::Bytes(bytes.into())
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        RequestBody::File(path.as_ref().to_path_buf())
    }

    pub fn stream<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        RequestBody::Stream(Box::new(reader))
    }

    /// Serializes `value` into a [`RequestBody::Json`].
    pub fn json<T>(value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| Error::invalid_request(format!("could not serialize JSON body: {}", e)))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    /// The content type implied by the body, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Json(_) => Some("application/json"),
            _ => None,
        }
    }

    /// Rejects bodies that can be known to be broken without touching I/O.
    pub(crate) fn validate(&self) -> Result<()> {
        if let RequestBody::ByteRange { bytes, offset, len } = self {
            byte_range(bytes, *offset, *len)?;
        }
        Ok(())
    }

    /// Turns every in-memory variant into octets, moving the buffer where it can.
    ///
    /// Returns `Ok(None)` for `Empty`, `File` and `Stream`, which the transport
    /// hands over without buffering.
    pub(crate) fn into_bytes(self) -> Result<Option<Vec<u8>>> {
        let bytes = match self {
            RequestBody::Text(text) => text.into_bytes(),
            RequestBody::Bytes(bytes) => bytes,
            RequestBody::ByteRange {
                mut bytes,
                offset,
                len,
            } => {
                byte_range(&bytes, offset, len)?;
                bytes.truncate(offset + len);
                bytes.drain(..offset);
                bytes
            }
            RequestBody::ByteChunks(chunks) => chunks.concat(),
            RequestBody::Json(value) => serde_json::to_vec(&value).map_err(|e| {
                Error::invalid_request(format!("could not serialize JSON body: {}", e))
            })?,
            RequestBody::Empty | RequestBody::File(_) | RequestBody::Stream(_) => return Ok(None),
        };
        Ok(Some(bytes))
    }
}

fn byte_range(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| {
            Error::invalid_request(format!(
                "byte range {}+{} is outside a body of {} bytes",
                offset,
                len,
                bytes.len()
            ))
        })
}

impl Debug for RequestBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            RequestBody::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            RequestBody::ByteRange { bytes, offset, len } => f
                .debug_struct("ByteRange")
                .field("bytes", &bytes.len())
                .field("offset", offset)
                .field("len", len)
                .finish(),
            RequestBody::ByteChunks(chunks) => {
                f.debug_tuple("ByteChunks").field(&chunks.len()).finish()
            }
            RequestBody::File(path) => f.debug_tuple("File").field(path).finish(),
            RequestBody::Stream(_) => f.write_str("Stream(..)"),
            RequestBody::Json(value) => f
                .debug_tuple("Json")
                .field(&value.to_string().len())
                .finish(),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

/// How the response body should be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// UTF-8 text; invalid sequences are replaced.
    #[default]
    Text,
    /// A JSON object. Arrays and scalars fail to decode; use [`ResponseShape::Json`] for those.
    Map,
    /// Any JSON document.
    Json,
    /// The raw octets.
    Bytes,
    /// Written to the given path.
    File(PathBuf),
    /// Read and dropped.
    Discard,
}

/// A response body decoded according to a [`ResponseShape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Map(Map<String, Value>),
    Json(Value),
    Bytes(Vec<u8>),
    File(PathBuf),
    Empty,
}

impl Body {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Body::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Body::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<Map<String, Value>> {
        match self {
            Body::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl ResponseShape {
    pub(crate) fn decode(&self, response: RawResponse) -> Result<ResponseEnvelope<Body>> {
        trace!(shape = ?self, bytes = response.body.len(), "decoding response body");
        let RawResponse {
            status,
            headers,
            body,
        } = response;
        let body = match self {
            ResponseShape::Text => Body::Text(String::from_utf8_lossy(&body).into_owned()),
            ResponseShape::Map => match serde_json::from_slice(&body) {
                Ok(map) => Body::Map(map),
                Err(source) => {
                    return Err(Error::Decode {
                        status,
                        headers,
                        source,
                    })
                }
            },
            ResponseShape::Json => match serde_json::from_slice(&body) {
                Ok(value) => Body::Json(value),
                Err(source) => {
                    return Err(Error::Decode {
                        status,
                        headers,
                        source,
                    })
                }
            },
            ResponseShape::Bytes => Body::Bytes(body),
            ResponseShape::File(path) => {
                if let Err(source) = std::fs::write(path, &body) {
                    return Err(Error::Save {
                        status,
                        headers,
                        path: path.clone(),
                        source,
                    });
                }
                Body::File(path.clone())
            }
            ResponseShape::Discard => Body::Empty,
        };
        Ok(ResponseEnvelope::new(status, headers, body))
    }
}

/// Strictly decodes the body as JSON into `T`.
pub(crate) fn decode_as<T>(response: RawResponse) -> Result<ResponseEnvelope<T>>
where
    T: DeserializeOwned,
{
    trace!(
        target_type = std::any::type_name::<T>(),
        "decoding response body"
    );
    let RawResponse {
        status,
        headers,
        body,
    } = response;
    match serde_json::from_slice(&body) {
        Ok(value) => Ok(ResponseEnvelope::new(status, headers, value)),
        Err(source) => Err(Error::Decode {
            status,
            headers,
            source,
        }),
    }
}
