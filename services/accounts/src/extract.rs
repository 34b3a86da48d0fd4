//! Request body extraction

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AccountError;

/// JSON body extractor that leaves field checks to the service.
///
/// An empty body deserializes as `T::default()` and the content type is not
/// required, so a missing parameter is reported by name instead of being
/// rejected up front. Unparseable JSON becomes `AccountError::MalformedBody`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AccountError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AccountError::MalformedBody(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Payload)
            .map_err(|e| AccountError::MalformedBody(e.to_string()))
    }
}
