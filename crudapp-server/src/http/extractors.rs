//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::{Form, Json};

use super::error::ApiError;
use crate::models::{parse_user_id, FormPayload, UserFields, UserPayload, ValidationError};

/// Extract and validate a user id from path.
///
/// Keeps the raw segment too: the update response echoes it verbatim.
pub struct UserId {
    pub id: i64,
    pub raw: String,
}

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Missing { field: "id" }))?;

        let id = parse_user_id(&raw)?;
        Ok(Self { id, raw })
    }
}

/// Extract a JSON or urlencoded form body and validate it into `UserFields`
pub struct ValidUser(pub UserFields);

impl<S> FromRequest<S> for ValidUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = if is_form(&req) {
            let Form(form) = Form::<FormPayload>::from_request(req, state)
                .await
                .map_err(|rejection| malformed(rejection.body_text()))?;
            UserPayload::from(form)
        } else {
            let Json(payload) = Json::<UserPayload>::from_request(req, state)
                .await
                .map_err(|rejection| malformed(rejection.body_text()))?;
            payload
        };

        Ok(Self(UserFields::from_payload(payload)?))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

fn malformed(reason: String) -> ApiError {
    ApiError::Validation(ValidationError::MalformedBody { reason })
}
