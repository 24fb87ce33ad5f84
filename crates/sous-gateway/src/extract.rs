use crate::error::ApiError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use sous_core::FromPayload;
use tracing::debug;

/// JSON body extractor that validates before the handler runs.
///
/// Deserialises the wire payload of `T`, then converts it with
/// [`FromPayload::from_payload`]. Any failure rejects the request with a 422,
/// except a body over the size limit, which is a 413.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: FromPayload + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T::Payload>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection.body_text(), "Rejected unreadable body");
                ApiError::from(rejection)
            })?;
        let value = T::from_payload(payload).map_err(|errors| {
            debug!(%errors, "Rejected invalid body");
            ApiError::Validation(errors)
        })?;
        Ok(Self(value))
    }
}
