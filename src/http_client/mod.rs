use crate::model::{Headers, Request};
use crate::{ClientConfig, Result};

#[cfg(test)]
mod tests;

pub mod reqwest;

/// A response as it came off the wire, before any shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

/// Performs one round trip.
///
/// Implementations must be safe to share across threads; the cookie store and
/// connection pool behind them are shared by every call.
pub trait HttpClient: Send + Sync {
    fn create(config: ClientConfig) -> Result<Self>
    where
        Self: Sized;

    fn execute(&self, request: Request) -> Result<RawResponse>;
}
