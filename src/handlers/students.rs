//! Student CRUD handlers: list, read, create, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::model::Student;
use crate::response::{created_at, no_content};
use crate::service::StudentService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

pub const STUDENTS_PATH: &str = "/api/students";

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// List all students.
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "students",
    responses((status = 200, description = "All students", body = [Student]))
)]
pub async fn list_students(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let students = StudentService::list(state.store.as_ref()).await?;
    Ok(Json(students))
}

/// Get one student by id.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "No student with this id")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let student = StudentService::read(state.store.as_ref(), id).await?;
    Ok(Json(student))
}

/// Create a student. The caller supplies the id.
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "students",
    request_body = Student,
    responses(
        (status = 201, description = "Created", body = Student,
            headers(("Location" = String, description = "URL of the new student"))),
        (status = 400, description = "Body is not a valid student", body = ErrorBody),
        (status = 409, description = "A student with this id already exists", body = ErrorBody)
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Json<Student>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let student = StudentService::create(state.store.as_ref(), body).await?;
    let location = format!("{}/{}", STUDENTS_PATH, student.id);
    Ok(created_at(&location, student))
}

/// Replace a student. The body id must equal the path id.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    request_body = Student,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Path and body ids differ, or body is not a valid student", body = ErrorBody),
        (status = 404, description = "No student with this id")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Student>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let Json(body) = body?;
    StudentService::update(state.store.as_ref(), id, body).await?;
    Ok(no_content())
}

/// Delete a student.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No student with this id")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    StudentService::delete(state.store.as_ref(), id).await?;
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-1").unwrap(), -1);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(parse_id("99999999999").is_err());
    }
}
