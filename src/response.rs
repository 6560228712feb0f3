//! Response helpers.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `201 Created` with a `Location` header pointing at the new resource.
pub fn created_at<T: Serialize>(location: &str, data: T) -> Response {
    let mut resp = (StatusCode::CREATED, Json(data)).into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        resp.headers_mut().insert(header::LOCATION, value);
    }
    resp
}

pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
