//! Extractors that report malformed input as validation errors.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    validate::{Validate, Validated, ValidationErrors},
};

/// Query-string parameters. A value that fails to parse is a 422.
#[derive(Debug, Clone)]
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationErrors::single("query", rejection.body_text()))?;

        Ok(Self(params))
    }
}

/// A JSON body that deserialized and passed [`Validate`].
#[derive(Debug, Clone)]
pub struct Payload<T>(pub Validated<T>);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationErrors::single("body", rejection.body_text()))?;

        Ok(Self(Validated::new(value)?))
    }
}
