//! Posts endpoints: adapt HTTP requests to handler invocations.

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use quill_core::{Method, PostRequest};
use quill_shared::{HandlerResponse, InvocationEvent};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Any method on /api/posts and /api/posts/{id}
///
/// The body is taken as raw bytes so that unreadable or oversized payloads
/// still leave through `AppError` with the JSON and CORS headers.
pub async fn dispatch(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    body: Result<web::Bytes, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let body = body.map_err(|e| AppError::UnreadableBody(e.to_string()))?;
    let body = String::from_utf8(body.to_vec())?;

    let request = PostRequest {
        method: Method::parse(req.method().as_str()),
        path_id: req
            .match_info()
            .get("id")
            .filter(|id| !id.is_empty())
            .map(String::from),
        query: query.into_inner(),
        body: (!body.is_empty()).then_some(body),
    };

    let response = state.posts.handle(request).await?;
    Ok(to_http_response(response))
}

/// POST /api/invoke
///
/// Takes a raw invocation event and answers with the response descriptor.
pub async fn invoke(
    state: web::Data<AppState>,
    event: web::Json<InvocationEvent>,
) -> AppResult<HttpResponse> {
    let response = state.posts.handle(event.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Write a response descriptor out as a real HTTP response.
pub(crate) fn to_http_response(response: HandlerResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = HttpResponse::build(status);
    for (name, value) in response.headers {
        builder.insert_header((name, value));
    }
    builder.body(response.body)
}
