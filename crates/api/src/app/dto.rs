use axum::{
    extract::{Form, FromRequest, FromRequestParts, Query, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Request parameters read from a form-urlencoded body when the request
/// carries one, and from the query string otherwise.
#[derive(Debug)]
pub struct Params<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if has_form_body(&req) {
            let Form(params) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Params(params));
        }

        let (mut parts, _body) = req.into_parts();
        let Query(params) = Query::<T>::from_request_parts(&mut parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Params(params))
    }
}

fn has_form_body(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

// -------------------------
// Request DTOs (query string or form body)
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateItemParams {
    pub name: String,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityParams {
    pub total: i64,
}

/// Parameters shared by checkout and checkin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParams {
    pub item_name: String,
    pub student_name: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<String> for MessageResponse {
    fn from(message: String) -> Self {
        Self { message }
    }
}
