use crate::model::Headers;
use crate::{Error, Result};

/// Status, headers and decoded body of one completed round trip.
///
/// Built once by [`RequestClient`](crate::RequestClient) and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope<B> {
    status: u16,
    headers: Headers,
    body: B,
}

impl<B> ResponseEnvelope<B> {
    pub(crate) fn new(status: u16, headers: Headers, body: B) -> Self {
        ResponseEnvelope {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }

    pub fn into_parts(self) -> (u16, Headers, B) {
        (self.status, self.headers, self.body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a 4xx or 5xx envelope into [`Error::Status`].
    pub fn error_for_status(self) -> Result<Self> {
        if (400..600).contains(&self.status) {
            return Err(Error::Status {
                status: self.status,
                headers: self.headers,
            });
        }
        Ok(self)
    }
}
