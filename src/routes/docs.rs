//! Generated OpenAPI document.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::students;
use crate::model::Student;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Management API",
        version = "v1",
        description = "An API for managing students."
    ),
    paths(
        students::list_students,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
    ),
    components(schemas(Student, ErrorBody, ErrorDetail)),
    tags((name = "students", description = "Student records"))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route(OPENAPI_PATH, get(openapi))
}
